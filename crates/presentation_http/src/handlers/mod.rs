//! HTTP request handlers

pub mod health;
pub mod speak;
pub mod translate;

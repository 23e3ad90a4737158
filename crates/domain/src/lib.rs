//! Domain layer for llm-translate
//!
//! Contains the request and result types exchanged with translation and
//! speech providers, the value objects describing languages, providers and
//! audio formats, and the structured error every failure is normalised into.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::{BoxError, ErrorKind, ServiceError, redact_secret};
pub use value_objects::*;

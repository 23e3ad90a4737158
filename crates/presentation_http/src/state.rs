//! Application state shared across handlers

use crate::config_reload::ReloadableConfig;

/// Shared application state
///
/// Handlers take a configuration snapshot per request and build their
/// adapters from it, so nothing provider-specific lives here.
#[derive(Clone)]
pub struct AppState {
    /// Hot-reloadable application configuration
    pub config: ReloadableConfig,
}

impl AppState {
    #[must_use]
    pub const fn new(config: ReloadableConfig) -> Self {
        Self { config }
    }
}

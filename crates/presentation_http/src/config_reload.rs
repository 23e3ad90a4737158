//! Hot-reloadable configuration
//!
//! Holds the current [`AppConfig`] behind an `ArcSwap`. On Unix a `SIGHUP`
//! re-reads the config file, the process environment and, when one was found
//! at startup, the `.env` file; its entries win over the process environment.
//! Requests already in flight keep the snapshot they started with.

use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use infrastructure::AppConfig;
use tracing::{error, info, warn};

/// A wrapper around `AppConfig` that supports atomic replacement
#[derive(Debug, Clone)]
pub struct ReloadableConfig {
    inner: Arc<ArcSwap<AppConfig>>,
    env_file: Option<PathBuf>,
}

impl ReloadableConfig {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::new(Arc::new(config))),
            env_file: None,
        }
    }

    /// Re-read this dotenv file on every reload
    #[must_use]
    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Snapshot of the current configuration
    #[must_use]
    pub fn load(&self) -> Arc<AppConfig> {
        self.inner.load_full()
    }

    /// Install a new configuration
    pub fn replace(&self, config: AppConfig) {
        let old = self.inner.swap(Arc::new(config));
        let current = self.inner.load();
        info!(
            old_ai_source = %old.ai_source,
            ai_source = %current.ai_source,
            old_tts_source = %old.tts_source,
            tts_source = %current.tts_source,
            "Configuration replaced"
        );
    }

    /// Reload configuration from the config file, `.env` file and environment
    ///
    /// Returns `true` if the reload was successful
    pub fn reload(&self) -> bool {
        let loaded = match &self.env_file {
            Some(path) => AppConfig::load_with_env_file(path),
            None => AppConfig::load(),
        };

        match loaded {
            Ok(config) => {
                self.replace(config);
                true
            },
            Err(e) => {
                error!(error = %e, "Failed to reload configuration");
                false
            },
        }
    }
}

/// Spawn a background task that reloads configuration on SIGHUP
#[cfg(unix)]
pub fn spawn_config_reload_handler(config: ReloadableConfig) -> ReloadableConfig {
    use tokio::signal::unix::{SignalKind, signal};

    let handle = config.clone();
    tokio::spawn(async move {
        let mut sighup = match signal(SignalKind::hangup()) {
            Ok(s) => s,
            Err(e) => {
                error!(error = %e, "Failed to install SIGHUP handler");
                return;
            },
        };

        while sighup.recv().await.is_some() {
            info!("Received SIGHUP, reloading configuration");
            if !handle.reload() {
                warn!("Configuration reload failed, keeping previous config");
            }
        }
    });

    config
}

/// No-op on non-Unix systems
#[cfg(not(unix))]
pub fn spawn_config_reload_handler(config: ReloadableConfig) -> ReloadableConfig {
    warn!("SIGHUP config reload not supported on this platform");
    config
}

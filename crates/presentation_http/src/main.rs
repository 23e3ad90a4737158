//! llm-translate HTTP server

use std::net::SocketAddr;

use ai_speech::AudioConverter;
use infrastructure::{AppConfig, init_logging};
use presentation_http::{
    AppState, ReloadableConfig, create_router, routes::cors_layer, spawn_config_reload_handler,
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::load()?;
    init_logging(&config.log_level, config.log_format)?;

    if let Err(e) = &dotenv {
        if !e.not_found() {
            warn!(error = %e, "Failed to read .env file");
        }
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        ai_source = %config.ai_source,
        tts_source = %config.tts_source,
        "llm-translate starting"
    );

    let converter = config
        .ffmpeg_path
        .as_deref()
        .map_or_else(AudioConverter::new, AudioConverter::with_ffmpeg_path);
    if !converter.is_available().await {
        warn!("FFmpeg not found, speech requests needing format conversion will fail");
    }

    let mut reloadable = ReloadableConfig::new(config.clone());
    if let Ok(path) = dotenv {
        reloadable = reloadable.with_env_file(path);
    }
    let reloadable = spawn_config_reload_handler(reloadable);
    let state = AppState::new(reloadable);

    let app = create_router(state)
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    let local: SocketAddr = listener.local_addr()?;

    info!("Server listening on http://{local}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

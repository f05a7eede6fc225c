use std::{net::SocketAddr, sync::Arc};

use intake::IntakeContext;
use intake_server::{
    build_router,
    config::{load_settings, resolve_static_dir},
    spa_service, AppState,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let static_dir = resolve_static_dir(settings.static_dir.as_deref()).map_err(|error| {
        error!(%error, "static directory is unusable; check static_dir / STATIC_DIR");
        error
    })?;
    let spa = static_dir.as_deref().map(spa_service);
    match static_dir.as_deref() {
        Some(dir) if !dir.join("index.html").is_file() => {
            warn!(dir = %dir.display(), "static directory has no index.html; SPA fallback will 404")
        }
        Some(dir) => info!(dir = %dir.display(), "serving frontend bundle"),
        None => info!("no static directory configured; serving API only"),
    }

    let state = AppState {
        intake: IntakeContext::new(),
        ping_message: settings.ping_message.clone(),
        spa,
    };
    let app = build_router(Arc::new(state), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            error!(%error, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                error!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}

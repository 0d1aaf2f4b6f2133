use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use request_logger::config::Config;
use request_logger::state::AppState;

async fn build_app() -> anyhow::Result<(axum::Router, AppState)> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // Create up front so a misconfigured directory shows at startup;
    // writes still recreate it if it disappears later.
    if let Err(e) = tokio::fs::create_dir_all(&config.log_dir).await {
        tracing::warn!(
            "Cannot create log directory {}: {}",
            config.log_dir.display(),
            e
        );
    }

    let state = AppState::new(config);

    let app = request_logger::create_router(state.clone())
        .layer(RequestBodyLimitLayer::new(10 * 1024 * 1024))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
        );

    Ok((app, state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .init();
    }

    let (app, state) = build_app().await?;

    let addr = state.config.bind_addr();
    tracing::info!(
        log_dir = %state.config.log_dir.display(),
        "Request logger listening on http://{}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Cannot install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

use crate::config::{Config, MetricsConfig};
use crate::gateway::{health, method_not_allowed, query, AppState};
use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use querygate_db::Database;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

pub async fn run(config: Config) -> anyhow::Result<()> {
    let database = Database::initialize(&config.database.pool_settings())?;
    database.verify_reachable().await?;
    info!(backend = database.backend(), "database reachable");

    if let Some(metrics) = &config.metrics {
        spawn_metrics_exporter(metrics).await?;
    }

    let listener = TcpListener::bind(&config.server.listen_addr).await?;
    info!("Querygate listening on {}", config.server.listen_addr);

    let app = router(AppState::new(Arc::new(database)));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Querygate stopped");
    Ok(())
}

/// `/` answers health for any method and also catches unmatched paths.
/// Query bodies are not size-capped.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(health))
        .route(
            "/query",
            post(query)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::disable()),
        )
        .fallback(health)
        .with_state(state)
}

async fn spawn_metrics_exporter(config: &MetricsConfig) -> anyhow::Result<()> {
    let metrics_handle = PrometheusBuilder::new().install_recorder()?;
    let listener = TcpListener::bind(&config.listen_addr).await?;
    info!("metrics listening on {}", config.listen_addr);
    let app = Router::new().route(
        "/metrics",
        get(|| async move { metrics_handle.render() }),
    );
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            error!("metrics server error: {err}");
        }
    });
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received, draining requests");
}

mod metrics;
mod routes;
mod state;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use chainrecord_lib::Store;
use tower_http::compression::CompressionLayer;
use tracing::info;

use crate::error::CliError;

use self::metrics::{handle_metrics, metrics, track_metrics};
use self::routes::{
    handle_deploy, handle_health, handle_invoke, handle_keys, handle_query, handle_record,
};
use self::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/metrics", get(handle_metrics))
        .route("/deploy", post(handle_deploy))
        .route("/invoke/{function}", post(handle_invoke))
        .route("/query/{function}", post(handle_query))
        .route("/records/{kind}/{key}", get(handle_record))
        .route("/keys", get(handle_keys))
        .layer(middleware::from_fn(track_metrics))
        .layer(CompressionLayer::new())
        .with_state(state)
}

pub async fn run_serve(
    store: Arc<dyn Store>,
    backend: &'static str,
    hostname: &str,
    port: u16,
) -> Result<(), CliError> {
    metrics()
        .storage_backend
        .with_label_values(&[backend])
        .set(1);

    let state = Arc::new(AppState::new(store, backend));
    let app = router(state);

    let addr = format!("{}:{}", hostname, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| CliError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, storage = backend, "serving ledger");

    let shutdown = async {
        let ctrl_c = tokio::signal::ctrl_c();
        #[cfg(unix)]
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(_) => {
                ctrl_c.await.ok();
            }
        }

        #[cfg(not(unix))]
        ctrl_c.await.ok();

        info!("shutdown signal received, finishing in-flight requests");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(CliError::Server)?;

    info!("server stopped");
    Ok(())
}

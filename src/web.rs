use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers::{AppState, info, recipes};

/// Handle on a server that is already accepting connections
#[derive(Debug, Clone)]
pub struct ServerHandle {
    pub local_addr: SocketAddr,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/cities/{city_id}/infos", get(info::get_city_infos))
        .route("/cities/{city_id}/recipes", post(recipes::create_recipe))
        .route(
            "/cities/{city_id}/recipes/{recipe_id}",
            delete(recipes::delete_recipe),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Bind, call `on_listening` once the listener is up, then serve until
/// `shutdown` resolves.
pub async fn run<F>(
    config: &ServerConfig,
    state: AppState,
    on_listening: impl FnOnce(&ServerHandle),
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let handle = ServerHandle {
        local_addr: listener
            .local_addr()
            .context("Failed to read bound address")?,
    };
    tracing::info!("Web server running at http://{}", handle.local_addr);
    on_listening(&handle);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    tracing::info!("Web server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

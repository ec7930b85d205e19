//! In-memory item CRUD service.
//!
//! # Overview
//! Serves create, list, get, update, and delete over a single `Item`
//! resource at `/items`. State lives only in process memory and is gone
//! when the process exits.
//!
//! # Design
//! - `ItemStore` owns the collection; handlers reach it only through its
//!   operations.
//! - Handlers translate `StoreError` straight into responses; nothing is
//!   retried and no failure stops the server.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;
pub mod telemetry;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::{ApiError, StoreError};
pub use routes::SharedStore;
pub use store::{IdAssignment, Item, ItemPatch, ItemStore, NewItem};

/// Router over a fresh, empty store.
pub fn app() -> Router {
    app_with_store(Arc::new(ItemStore::default()))
}

pub fn app_with_store(store: SharedStore) -> Router {
    Router::new()
        .route("/items", get(routes::list_items).post(routes::create_item))
        .route(
            "/items/{id}",
            get(routes::get_item)
                .put(routes::update_item)
                .delete(routes::delete_item),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Serve until Ctrl-C, then drain in-flight requests.
pub async fn run(listener: TcpListener, store: SharedStore) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_store(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

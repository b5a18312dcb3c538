//! HTTP API application wiring (Axum router + store injection).
//!
//! - `routes/`: HTTP routes + handlers
//! - `extract.rs`: shape-validating extractors (422)
//! - `dto.rs`: request/response DTOs and their declared constraints
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use pharmacy_inventory::InventoryStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;

/// Build the full HTTP router around an injected store.
///
/// The store is owned by the caller, so tests can hand every server its own
/// fresh instance.
pub fn build_app(store: Arc<dyn InventoryStore>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_logging))
                .layer(Extension(store)),
        )
}

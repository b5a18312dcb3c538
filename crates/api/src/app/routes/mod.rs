use axum::Router;

pub mod medicines;
pub mod system;

/// Router for the inventory endpoints.
pub fn router() -> Router {
    Router::new().nest("/medicines", medicines::router())
}

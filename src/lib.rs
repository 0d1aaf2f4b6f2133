pub mod auth;
pub mod config;
pub mod files;
pub mod handlers;
pub mod models;
pub mod state;

use axum::Router;
use axum::routing::{get, post};

use state::AppState;

/// Build the application router with the given state.
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a network port. The caller must serve it with
/// `into_make_service_with_connect_info::<SocketAddr>()` (or provide
/// `MockConnectInfo` in tests) so handlers can see the peer address.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::capture_request).post(handlers::capture_request))
        // POST-only alias kept for clients of the earlier /log endpoint
        .route("/log", post(handlers::capture_request))
        .with_state(state)
}

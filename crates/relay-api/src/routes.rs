//! # Routes
//!
//! Axum router configuration for the relay.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  `/` - liveness text
/// - POST `/api/paytm/create-order` - create order, initiate transaction
/// - POST `/api/paytm/callback` - gateway callback (form or JSON)
/// - POST `/api/paytm/status` - transaction status check
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let paytm_routes = Router::new()
        .route("/create-order", post(handlers::create_order))
        .route("/callback", post(handlers::callback))
        .route("/status", post(handlers::check_status));

    Router::new()
        .route("/", get(handlers::liveness))
        .nest("/api/paytm", paytm_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

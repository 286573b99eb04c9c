//! HTTP binding of the mock gateway.
//!
//! Serves both the short paths used by the test driver and the paths the
//! marketplace calls on a real payment provider.

pub mod dto;
pub mod handlers;

use crate::application::coordinator::RedirectCoordinator;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<RedirectCoordinator>,
    pub gateway_count: u32,
}

impl AppState {
    pub fn new(coordinator: RedirectCoordinator, gateway_count: u32) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            gateway_count,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/gateway-count", get(handlers::gateway_count))
        .route(
            "/api/product-providers/payment-gateways/count",
            get(handlers::gateway_count),
        )
        .route("/clear", post(handlers::clear))
        .route("/payment-start", post(handlers::payment_start))
        .route("/api/payment-start", post(handlers::payment_start))
        .route("/checkin", get(handlers::checkin))
        .route("/bad-checkin", get(handlers::bad_checkin))
        .route("/set-pending", get(handlers::set_pending))
        .with_state(state)
}

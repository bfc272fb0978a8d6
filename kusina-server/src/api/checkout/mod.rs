//! Checkout API Module

mod handler;

pub use handler::{CheckoutRequest, CheckoutResponse};

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Checkout router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/checkout", post(handler::checkout))
}

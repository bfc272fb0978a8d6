//! Order API Module
//!
//! Queries read the lifecycle manager's cache snapshot; the status-advance
//! route is the only mutation and is admin-gated.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Admin overview with aggregates
        .route("/", get(handler::list_all))
        // The calling customer's history
        .route("/history", get(handler::history))
        // Admin status advance (approve, cancel, kitchen/delivery stages)
        .route("/{id}/status", post(handler::advance_status))
        // Status poll; evaluates auto-escalation as a side effect
        .route("/{id}/payment_status", get(handler::payment_status))
}

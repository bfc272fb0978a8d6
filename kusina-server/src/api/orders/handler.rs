//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::{Order, OrderStatus};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Admin overview of every order
#[derive(Debug, Serialize)]
pub struct AdminOrdersView {
    pub orders: Vec<Order>,
    pub total_orders: usize,
    pub total_revenue: Decimal,
}

/// List all orders with aggregates (admin only)
pub async fn list_all(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<AdminOrdersView>>> {
    if !user.is_admin() {
        return Err(AppError::forbidden("Admin access required"));
    }
    let orders = state.lifecycle.all_orders();
    let total_revenue: Decimal = orders.iter().map(|o| o.total).sum();
    Ok(ok(AdminOrdersView {
        total_orders: orders.len(),
        total_revenue,
        orders,
    }))
}

/// One row of a customer's order history
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub order_id: String,
    pub date: String,
    pub items: Vec<String>,
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct HistoryView {
    pub order_history: Vec<HistoryEntry>,
    pub notifications: Vec<String>,
}

/// The calling customer's order history
///
/// Cancelled orders are hidden from the history list but still drive the
/// notification line (a cancellation is worth telling the customer about).
pub async fn history(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<HistoryView>>> {
    let orders = state.lifecycle.orders_for(&user.email);

    let notifications = vec![notification_for(orders.last())];
    let order_history = orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .map(|o| HistoryEntry {
            order_id: o.order_id.clone(),
            date: o.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            items: o.item_names(),
            status: o.status,
        })
        .collect();

    Ok(ok(HistoryView {
        order_history,
        notifications,
    }))
}

fn notification_for(latest: Option<&Order>) -> String {
    let Some(order) = latest else {
        return "Welcome! Start by browsing our menu.".to_string();
    };
    match order.status {
        OrderStatus::Processing => "Your order is being processed.",
        OrderStatus::Paid => "Your order has been confirmed!",
        OrderStatus::Preparing | OrderStatus::Cooking => "Your order is being prepared.",
        OrderStatus::OnTheWay => "Your order is on the way.",
        OrderStatus::Delivered => "Rate your recent order.",
        OrderStatus::Cancelled => "Your order has been cancelled.",
    }
    .to_string()
}

/// Advance request body
#[derive(Debug, Deserialize)]
pub struct AdvanceStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct StatusView {
    pub order_id: String,
    pub status: OrderStatus,
}

/// Advance an order to the requested status (admin only)
pub async fn advance_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    user: CurrentUser,
    Json(payload): Json<AdvanceStatusRequest>,
) -> AppResult<Json<AppResponse<StatusView>>> {
    let status = state
        .lifecycle
        .transition(&id, payload.status, user.is_admin())
        .await?;
    Ok(ok(StatusView {
        order_id: id,
        status,
    }))
}

#[derive(Debug, Serialize)]
pub struct PaymentStatusView {
    pub status: OrderStatus,
}

/// Current status of an order
///
/// Reading the status is what arms the auto-approval rule: an order left in
/// Processing past the threshold escalates here (or in the background sweep,
/// whichever observes it first).
pub async fn payment_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<PaymentStatusView>>> {
    let status = state.lifecycle.evaluate_auto_escalation(&id).await?;
    Ok(ok(PaymentStatusView { status }))
}

//! Checkout Handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::order::{CartItemInput, DeliveryDetails, Order, PaymentMethod};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// Checkout submission
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CartItemInput>,
    pub payment_method: PaymentMethod,
    pub delivery: DeliveryDetails,
}

/// Created order plus the wallet redirect, when one applies
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// Create an order from the submitted cart
pub async fn checkout(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<AppResponse<CheckoutResponse>>> {
    if payload.items.is_empty() {
        return Err(AppError::validation("Cart is empty"));
    }
    validate_delivery(&payload.delivery)?;

    let outcome = state
        .lifecycle
        .checkout(
            &user.email,
            &user.name,
            &payload.items,
            payload.payment_method,
            payload.delivery,
        )
        .await?;

    Ok(ok(CheckoutResponse {
        order: outcome.order,
        redirect_url: outcome.redirect_url,
    }))
}

/// All delivery fields are required for every payment method
fn validate_delivery(delivery: &DeliveryDetails) -> Result<(), AppError> {
    validate_email(&delivery.email, "email")?;
    validate_required_text(&delivery.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&delivery.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&delivery.postal, "postal", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&delivery.city, "city", MAX_NAME_LEN)?;
    Ok(())
}

use shared::order::OrderStatus;
use thiserror::Error;

use crate::db::store::StoreError;
use crate::utils::AppError;

/// Lifecycle manager errors
///
/// Rejections are guaranteed side-effect free: no write, no publish.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("unknown menu item: {0}")]
    InvalidItem(String),

    #[error("invalid quantity {quantity} for {item}: allowed 1..={max}")]
    InvalidQuantity {
        item: String,
        quantity: u32,
        max: u32,
    },

    #[error("payment initiation failed: {0}")]
    PaymentInitiationFailed(String),

    #[error("admin privileges required")]
    Unauthorized,

    #[error("order not found: {0}")]
    NotFound(String),

    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("persistence failure: {0}")]
    Persistence(StoreError),
}

impl From<StoreError> for LifecycleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => LifecycleError::NotFound(id),
            other => LifecycleError::Persistence(other),
        }
    }
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            e @ (LifecycleError::InvalidItem(_) | LifecycleError::InvalidQuantity { .. }) => {
                AppError::validation(e.to_string())
            }
            LifecycleError::PaymentInitiationFailed(msg) => AppError::payment(msg),
            LifecycleError::Unauthorized => AppError::forbidden("Admin privileges required"),
            LifecycleError::NotFound(id) => AppError::not_found(format!("Order {id} not found")),
            e @ LifecycleError::InvalidTransition { .. } => AppError::conflict(e.to_string()),
            LifecycleError::Persistence(e) => AppError::database(e.to_string()),
        }
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

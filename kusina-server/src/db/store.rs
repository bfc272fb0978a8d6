//! Order Store abstraction
//!
//! The lifecycle manager never talks to a database directly; it goes through
//! this narrow contract. Failures are surfaced distinctly from "not found" so
//! callers can tell a missing order apart from a broken store.

use async_trait::async_trait;
use dashmap::DashMap;
use shared::order::{Order, OrderStatus};
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("order not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for orders
///
/// 实现必须保证 `update_status` 只更新已存在的订单，
/// 对不存在的 id 返回 [`StoreError::NotFound`]。
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Load every persisted order
    async fn load_all(&self) -> StoreResult<Vec<Order>>;

    /// Persist a newly created order
    async fn insert(&self, order: &Order) -> StoreResult<()>;

    /// Overwrite the status of an existing order
    async fn update_status(&self, order_id: &str, status: OrderStatus) -> StoreResult<()>;
}

/// In-memory store (tests, `STORAGE_MODE=memory`)
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: DashMap<String, Order>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn load_all(&self) -> StoreResult<Vec<Order>> {
        Ok(self.orders.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn insert(&self, order: &Order) -> StoreResult<()> {
        self.orders.insert(order.order_id.clone(), order.clone());
        Ok(())
    }

    async fn update_status(&self, order_id: &str, status: OrderStatus) -> StoreResult<()> {
        match self.orders.get_mut(order_id) {
            Some(mut entry) => {
                entry.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound(order_id.to_string())),
        }
    }
}

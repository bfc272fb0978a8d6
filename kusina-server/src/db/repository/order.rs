//! Order Repository
//!
//! SurrealDB implementation of [`OrderStore`]. Orders are stored whole under
//! their own `order_id` as the record key; the lifecycle manager owns all
//! mutation rules, this layer only reads and writes.

use async_trait::async_trait;
use shared::order::{Order, OrderStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::store::{OrderStore, StoreError, StoreResult};

const ORDER_TABLE: &str = "orders";

#[derive(Clone)]
pub struct SurrealOrderStore {
    db: Surreal<Db>,
}

impl SurrealOrderStore {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderStore for SurrealOrderStore {
    async fn load_all(&self) -> StoreResult<Vec<Order>> {
        let orders: Vec<Order> = self.db.select(ORDER_TABLE).await?;
        Ok(orders)
    }

    async fn insert(&self, order: &Order) -> StoreResult<()> {
        let created: Option<Order> = self
            .db
            .create((ORDER_TABLE, order.order_id.clone()))
            .content(order.clone())
            .await?;
        created
            .map(|_| ())
            .ok_or_else(|| StoreError::Database(format!("insert of {} returned no record", order.order_id)))
    }

    async fn update_status(&self, order_id: &str, status: OrderStatus) -> StoreResult<()> {
        let mut result = self
            .db
            .query("UPDATE type::thing($tb, $id) SET status = $status RETURN AFTER")
            .bind(("tb", ORDER_TABLE))
            .bind(("id", order_id.to_string()))
            .bind(("status", status))
            .await?;
        let updated: Vec<Order> = result.take(0)?;
        if updated.is_empty() {
            return Err(StoreError::NotFound(order_id.to_string()));
        }
        Ok(())
    }
}

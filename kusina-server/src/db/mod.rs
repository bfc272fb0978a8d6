//! Database layer
//!
//! 嵌入式 SurrealDB 连接管理。订单的读写统一通过 [`store::OrderStore`]
//! 抽象，SurrealDB 实现见 [`repository`]。

pub mod repository;
pub mod store;

pub use repository::SurrealOrderStore;
pub use store::{MemoryOrderStore, OrderStore, StoreError, StoreResult};

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Embedded database handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at the given path
    pub async fn new(path: &str) -> Result<Self, surrealdb::Error> {
        let db = Surreal::new::<RocksDb>(path).await?;
        db.use_ns("kusina").use_db("kusina").await?;
        tracing::info!(path = %path, "Database initialized");
        Ok(Self { db })
    }
}

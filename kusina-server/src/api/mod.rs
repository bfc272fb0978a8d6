//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`checkout`] - 下单结算接口
//! - [`orders`] - 订单状态查询与管理接口

pub mod checkout;
pub mod health;
pub mod orders;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// The full HTTP surface
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(checkout::router())
        .merge(orders::router())
}

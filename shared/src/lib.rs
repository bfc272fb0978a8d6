//! Shared types for the Kusina order server and its connected clients.
//!
//! 本 crate 只包含纯数据类型 (serde 序列化)，不做任何 I/O：
//!
//! - [`order`] - 订单领域模型 (状态机、行项目、支付方式、状态事件)
//! - [`util`] - 时间戳等小工具

pub mod order;
pub mod util;

// Re-export 公共类型
pub use order::{
    CartItemInput, DeliveryDetails, LineItem, Order, OrderStatus, OrderUpdate, PaymentMethod,
};

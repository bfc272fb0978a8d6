//! Services Layer
//!
//! - [`catalog`] - 菜单目录 (固定、内存态、外部配置)

pub mod catalog;

pub use catalog::MenuCatalog;

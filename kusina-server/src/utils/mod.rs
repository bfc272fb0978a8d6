//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] / [`AppResult`] - 应用错误类型和统一响应
//! - [`logger`] - 日志初始化
//! - [`validation`] - 输入校验辅助函数

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{ok, ok_with_message, AppError, AppResponse, AppResult};

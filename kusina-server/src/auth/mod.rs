//! Identity
//!
//! 登录、OTP 下发都在上游认证层完成；请求到达本服务时身份已经过
//! 验证，通过网关注入的头部传递。本模块只负责提取。

pub mod extractor;

pub use extractor::CurrentUser;

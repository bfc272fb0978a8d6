//! Kusina Order Server - 在线订餐后端
//!
//! # 架构概述
//!
//! 本模块是订餐服务端的主入口，提供以下核心功能：
//!
//! - **订单生命周期** (`orders`): 固定转换表的状态机 + 超时自动确认
//! - **实时通知** (`notify`): Socket.IO 房间推送订单状态变更
//! - **支付** (`payment`): GCash / PayMaya mock 网关 + 货到付款
//! - **数据库** (`db`): 嵌入式 SurrealDB 订单存储
//! - **HTTP API** (`api`): 结算、状态查询、后台管理接口
//!
//! # 模块结构
//!
//! ```text
//! kusina-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── auth/          # 身份提取 (认证在上游完成)
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 存储抽象和 SurrealDB 实现
//! ├── orders/        # 订单生命周期管理器
//! ├── notify/        # 通知枢纽 + Socket.IO 转发
//! ├── payment/       # 支付网关
//! ├── services/      # 菜单目录
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod orders;
pub mod payment;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::CurrentUser;
pub use core::{Config, Server, ServerState};
pub use notify::NotificationHub;
pub use orders::{LifecycleError, OrderLifecycle};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __ __           _
   / //_/_  _______(_)___  ____ _
  / ,<  / / / / ___/ / __ \/ __ `/
 / /| |/ /_/ (__  ) / / / / /_/ /
/_/ |_|\__,_/____/_/_/ /_/\__,_/
    "#
    );
}

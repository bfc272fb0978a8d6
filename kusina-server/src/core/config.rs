use std::path::PathBuf;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/kusina | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | STORAGE_MODE | rocksdb | 订单存储: rocksdb \| memory |
/// | ESCALATION_THRESHOLD_SECS | 300 | Processing 超时自动确认阈值 (秒) |
/// | ESCALATION_SWEEP_SECS | 30 | 超时扫描周期 (秒) |
/// | MAX_ITEM_QUANTITY | 10 | 单品最大数量 |
/// | GCASH_APP_ID / GCASH_APP_SECRET | (空) | GCash 网关凭据 |
/// | PAYMAYA_PUBLIC_KEY / PAYMAYA_SECRET_KEY | (空) | PayMaya 网关凭据 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/kusina HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 订单存储模式
    pub storage_mode: String,
    /// 订单停留 Processing 超过该秒数后自动确认
    pub escalation_threshold_secs: u64,
    /// 后台超时扫描周期 (秒)
    pub escalation_sweep_secs: u64,
    /// 单个菜品允许的最大下单数量
    pub max_item_quantity: u32,

    // === 支付网关凭据 (mock 网关只做记录) ===
    pub gcash_app_id: String,
    pub gcash_app_secret: String,
    pub paymaya_public_key: String,
    pub paymaya_secret_key: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/kusina".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            storage_mode: std::env::var("STORAGE_MODE").unwrap_or_else(|_| "rocksdb".into()),
            escalation_threshold_secs: std::env::var("ESCALATION_THRESHOLD_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            escalation_sweep_secs: std::env::var("ESCALATION_SWEEP_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            max_item_quantity: std::env::var("MAX_ITEM_QUANTITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            gcash_app_id: std::env::var("GCASH_APP_ID").unwrap_or_default(),
            gcash_app_secret: std::env::var("GCASH_APP_SECRET").unwrap_or_default(),
            paymaya_public_key: std::env::var("PAYMAYA_PUBLIC_KEY").unwrap_or_default(),
            paymaya_secret_key: std::env::var("PAYMAYA_SECRET_KEY").unwrap_or_default(),
        }
    }

    /// 使用自定义值覆盖部分配置 (常用于测试场景)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

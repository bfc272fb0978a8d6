use std::sync::Arc;
use std::time::Duration;

use socketioxide::SocketIo;
use tokio::time::MissedTickBehavior;

use crate::core::{BackgroundTasks, Config, TaskKind};
use crate::db::store::OrderStore;
use crate::db::{DbService, MemoryOrderStore, SurrealOrderStore};
use crate::notify::{self, NotificationHub};
use crate::orders::OrderLifecycle;
use crate::payment::PaymentService;
use crate::services::MenuCatalog;

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | lifecycle | Arc<OrderLifecycle> | 订单生命周期管理器 |
/// | hub | NotificationHub | 状态事件发布枢纽 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 订单生命周期管理器
    pub lifecycle: Arc<OrderLifecycle>,
    /// 通知枢纽
    pub hub: NotificationHub,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 订单存储 (嵌入式 RocksDB，或 memory 模式)
    /// 2. 菜单目录、支付网关、通知枢纽
    /// 3. 生命周期管理器并预热订单缓存
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn OrderStore> = if config.storage_mode == "memory" {
            tracing::warn!("STORAGE_MODE=memory: orders will not survive a restart");
            Arc::new(MemoryOrderStore::new())
        } else {
            config.ensure_work_dir_structure()?;
            let db_path = config.database_dir().join("kusina.db");
            let db_service = DbService::new(&db_path.to_string_lossy()).await?;
            Arc::new(SurrealOrderStore::new(db_service.db))
        };

        let catalog = Arc::new(MenuCatalog::default_menu());
        let payments = PaymentService::from_config(config);
        let hub = NotificationHub::new();

        let lifecycle = Arc::new(OrderLifecycle::new(
            store,
            catalog,
            payments,
            hub.clone(),
            config.escalation_threshold_secs,
            config.max_item_quantity,
        ));
        let warmed = lifecycle.load().await?;
        tracing::info!(orders = warmed, "Order cache warmed");

        Ok(Self {
            config: config.clone(),
            lifecycle,
            hub,
        })
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 的服务循环之前调用。
    ///
    /// 启动的任务：
    /// - 超时扫描 (Processing 订单自动确认)
    /// - 通知转发 (hub → Socket.IO 房间)
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks, io: SocketIo) {
        let token = tasks.shutdown_token();

        let lifecycle = self.lifecycle.clone();
        let sweep_interval = Duration::from_secs(self.config.escalation_sweep_secs.max(1));
        let sweep_token = token.clone();
        tasks.spawn("escalation_sweep", TaskKind::Periodic, async move {
            let mut ticker = tokio::time::interval(sweep_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = sweep_token.cancelled() => break,
                    _ = ticker.tick() => {
                        lifecycle.sweep_escalations().await;
                    }
                }
            }
        });

        tasks.spawn(
            "notification_forwarder",
            TaskKind::Listener,
            notify::socket::forward_events(io, self.hub.clone(), token),
        );
    }
}

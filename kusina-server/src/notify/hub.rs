//! 通知枢纽
//!
//! 进程内的状态事件广播。生命周期管理器在持久化成功后向这里发布，
//! 转发任务把事件送进对应的 Socket.IO 房间；测试直接订阅断言。

use shared::order::OrderUpdate;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// A status event addressed to one recipient group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedUpdate {
    /// Recipient group key (the owning customer's identity)
    pub group: String,
    pub event: OrderUpdate,
}

/// In-process publish/subscribe hub for status-change events
#[derive(Debug, Clone)]
pub struct NotificationHub {
    tx: broadcast::Sender<GroupedUpdate>,
}

impl NotificationHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Publish an event to the named group (fire-and-forget)
    ///
    /// 没有订阅者时事件直接丢弃，这是约定行为而不是错误。
    pub fn publish(&self, group: &str, event: OrderUpdate) {
        let update = GroupedUpdate {
            group: group.to_string(),
            event,
        };
        if self.tx.send(update).is_err() {
            tracing::debug!(group = %group, "No notification subscribers, dropping status event");
        }
    }

    /// Subscribe to every published event (forwarder, tests)
    pub fn subscribe(&self) -> broadcast::Receiver<GroupedUpdate> {
        self.tx.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

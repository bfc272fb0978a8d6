//! Socket.IO transport
//!
//! 客户端连接时按自身身份加入同名房间；管理员额外加入共享的 `admin`
//! 房间。状态事件只发到下单客户的房间 (customer-only fan-out)。

use serde::Deserialize;
use socketioxide::SocketIo;
use socketioxide::extract::{SocketRef, TryData};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use super::hub::NotificationHub;

/// Shared room for administrator sessions
pub const ADMIN_ROOM: &str = "admin";

/// Socket event name for status changes
pub const ORDER_UPDATE_EVENT: &str = "order_update";

/// Handshake auth payload sent by clients
#[derive(Debug, Deserialize)]
struct ConnectAuth {
    email: String,
    #[serde(default)]
    role: Option<String>,
}

/// Register connection handling on the root namespace
pub fn register(io: &SocketIo) {
    io.ns("/", on_connect);
}

async fn on_connect(socket: SocketRef, TryData(auth): TryData<ConnectAuth>) {
    match auth {
        Ok(auth) => {
            socket.join(auth.email.clone());
            if auth.role.as_deref() == Some("admin") {
                socket.join(ADMIN_ROOM);
            }
            tracing::info!(sid = %socket.id, email = %auth.email, "Client connected");
        }
        Err(e) => {
            // Anonymous sockets stay connected but receive nothing
            tracing::debug!(sid = %socket.id, error = %e, "Client connected without identity");
        }
    }

    socket.on_disconnect(|socket: SocketRef| async move {
        tracing::debug!(sid = %socket.id, "Client disconnected");
    });
}

/// Bridge hub events into Socket.IO rooms until shutdown
///
/// Runs as a Listener background task. Lagging only skips events for slow
/// moments of this forwarder itself; clients observe current state on their
/// next poll either way.
pub async fn forward_events(io: SocketIo, hub: NotificationHub, shutdown: CancellationToken) {
    let mut rx = hub.subscribe();
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            msg = rx.recv() => match msg {
                Ok(update) => {
                    if let Err(e) = io
                        .to(update.group.clone())
                        .emit(ORDER_UPDATE_EVENT, &update.event)
                        .await
                    {
                        tracing::debug!(group = %update.group, error = %e, "Socket emit failed");
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Notification forwarder lagged behind publisher");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
    tracing::debug!("Notification forwarder stopped");
}

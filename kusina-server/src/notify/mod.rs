//! Notification Channel
//!
//! # 架构
//!
//! ```text
//! LifecycleManager ──▶ NotificationHub.publish(group, event)
//!                              │ broadcast::Sender<GroupedUpdate>
//!                              ▼
//!                      forward_events (Listener task)
//!                              │ io.to(group).emit("order_update")
//!                              ▼
//!                      Socket.IO room = customer email
//! ```
//!
//! Delivery is best-effort and fire-and-forget: no acks, no retry, no replay.
//! A client that is offline at publish time sees the current status on its
//! next poll instead.

pub mod hub;
pub mod socket;

pub use hub::{GroupedUpdate, NotificationHub};

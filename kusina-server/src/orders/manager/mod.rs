//! OrderLifecycle - order creation, status transitions and auto-escalation
//!
//! # Transition Flow
//!
//! ```text
//! transition(order_id, to, actor)
//!     ├─ 1. Authorization check (admin only; escalation is system-initiated)
//!     ├─ 2. Acquire per-order lock
//!     ├─ 3. Read current status from the cache snapshot
//!     ├─ 4. Validate (current, to) against the fixed transition table
//!     ├─ 5. Write-through to the order store
//!     ├─ 6. Rebuild and swap the cache snapshot
//!     ├─ 7. Publish order_update to the owning customer's group
//!     └─ 8. Return the new status
//! ```
//!
//! In-memory state is only mutated after the store write is confirmed, so a
//! persistence failure leaves memory and store consistent (both unchanged).

mod error;
pub use error::*;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use shared::order::{
    CartItemInput, DeliveryDetails, LineItem, Order, OrderStatus, OrderUpdate, PaymentMethod,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::db::store::{OrderStore, StoreError};
use crate::notify::NotificationHub;
use crate::payment::PaymentService;
use crate::services::MenuCatalog;

/// Lock map size warning threshold
const LOCK_MAP_WARN_THRESHOLD: usize = 10_000;

/// Result of a successful checkout
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub order: Order,
    /// Wallet flows redirect the customer here; absent for COD
    pub redirect_url: Option<String>,
}

/// Order lifecycle manager
///
/// 订单 `status` 的唯一修改入口。同一订单的并发转换通过按 id 的互斥锁
/// 串行化；全量订单快照在每次写入后整体重建并原子替换。
pub struct OrderLifecycle {
    store: Arc<dyn OrderStore>,
    catalog: Arc<MenuCatalog>,
    payments: PaymentService,
    hub: NotificationHub,
    /// Per-order transition locks (order_id -> mutex)
    locks: DashMap<String, Arc<Mutex<()>>>,
    /// Read-mostly snapshot of every order, swapped wholesale after writes
    cache: RwLock<Arc<HashMap<String, Order>>>,
    /// Serializes wholesale refreshes so the snapshot never regresses
    refresh_gate: Mutex<()>,
    /// How long an order may sit in Processing before auto-approval
    escalation_threshold: Duration,
    max_item_quantity: u32,
}

impl std::fmt::Debug for OrderLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderLifecycle")
            .field("store", &"<OrderStore>")
            .field("cached_orders", &self.cache.read().len())
            .field("escalation_threshold", &self.escalation_threshold)
            .finish()
    }
}

impl OrderLifecycle {
    pub fn new(
        store: Arc<dyn OrderStore>,
        catalog: Arc<MenuCatalog>,
        payments: PaymentService,
        hub: NotificationHub,
        escalation_threshold_secs: u64,
        max_item_quantity: u32,
    ) -> Self {
        Self {
            store,
            catalog,
            payments,
            hub,
            locks: DashMap::new(),
            cache: RwLock::new(Arc::new(HashMap::new())),
            refresh_gate: Mutex::new(()),
            escalation_threshold: Duration::seconds(escalation_threshold_secs as i64),
            max_item_quantity,
        }
    }

    /// Warm the cache from the store. Call once at startup.
    pub async fn load(&self) -> LifecycleResult<usize> {
        self.refresh_cache().await?;
        Ok(self.cache.read().len())
    }

    // ========== Checkout ==========

    /// Create an order from a validated cart
    ///
    /// Validation happens before any side effect: an invalid item or quantity
    /// leaves no partial order anywhere. A gateway rejection aborts creation
    /// entirely (nothing persisted, nothing published).
    pub async fn checkout(
        &self,
        customer_email: &str,
        customer_name: &str,
        items: &[CartItemInput],
        payment_method: PaymentMethod,
        delivery: DeliveryDetails,
    ) -> LifecycleResult<CheckoutOutcome> {
        let mut line_items = Vec::with_capacity(items.len());
        for item in items {
            let Some(unit_price) = self.catalog.price_of(&item.name) else {
                return Err(LifecycleError::InvalidItem(item.name.clone()));
            };
            if item.quantity < 1 || item.quantity > self.max_item_quantity {
                return Err(LifecycleError::InvalidQuantity {
                    item: item.name.clone(),
                    quantity: item.quantity,
                    max: self.max_item_quantity,
                });
            }
            line_items.push(LineItem {
                name: item.name.clone(),
                unit_price,
                quantity: item.quantity,
            });
        }

        let total = Order::compute_total(&line_items);
        let order_id = uuid::Uuid::new_v4().to_string();
        let description = format!("Order {order_id} for {customer_email}");

        let initiation = self
            .payments
            .initiate(payment_method, total, &order_id, &description)
            .await
            .map_err(|e| LifecycleError::PaymentInitiationFailed(e.to_string()))?;

        let order = Order {
            order_id,
            customer_email: customer_email.to_string(),
            customer_name: customer_name.to_string(),
            delivery,
            line_items,
            total,
            payment_method,
            payment_reference: initiation.payment_id,
            status: OrderStatus::Processing,
            created_at: Utc::now(),
        };

        self.store.insert(&order).await?;
        if let Err(e) = self.refresh_cache().await {
            // The insert is durable; a stale snapshot heals on the next refresh
            tracing::warn!(order_id = %order.order_id, error = %e, "Cache refresh failed after insert");
        }

        tracing::info!(
            order_id = %order.order_id,
            customer = %customer_email,
            total = %total,
            method = %payment_method,
            "Order created"
        );
        Ok(CheckoutOutcome {
            order,
            redirect_url: initiation.redirect_url,
        })
    }

    // ========== Transitions ==========

    /// Advance an order to the requested status (admin action)
    pub async fn transition(
        &self,
        order_id: &str,
        to: OrderStatus,
        actor_is_admin: bool,
    ) -> LifecycleResult<OrderStatus> {
        if !actor_is_admin {
            return Err(LifecycleError::Unauthorized);
        }
        self.apply_transition(order_id, to).await
    }

    /// Auto-approve an order stuck in Processing past the threshold
    ///
    /// System-initiated `Processing → Paid`, evaluated on every status read
    /// and by the background sweep. Idempotent: once escalated, further calls
    /// observe `Paid` and do nothing. Returns the current status either way.
    pub async fn evaluate_auto_escalation(&self, order_id: &str) -> LifecycleResult<OrderStatus> {
        let lock = self.order_lock(order_id);
        let _guard = lock.lock().await;

        let current = self
            .get(order_id)
            .ok_or_else(|| LifecycleError::NotFound(order_id.to_string()))?;
        if current.status != OrderStatus::Processing {
            return Ok(current.status);
        }
        let waited = Utc::now().signed_duration_since(current.created_at);
        if waited <= self.escalation_threshold {
            return Ok(OrderStatus::Processing);
        }

        tracing::info!(
            order_id = %order_id,
            waited_secs = waited.num_seconds(),
            "Auto-approving unattended order"
        );
        self.commit_status(&current, OrderStatus::Paid).await?;
        Ok(OrderStatus::Paid)
    }

    /// Evaluate every Processing order past threshold (background sweep)
    ///
    /// Returns how many orders were escalated this pass.
    pub async fn sweep_escalations(&self) -> usize {
        let now = Utc::now();
        let due: Vec<String> = self
            .snapshot()
            .values()
            .filter(|o| {
                o.status == OrderStatus::Processing
                    && now.signed_duration_since(o.created_at) > self.escalation_threshold
            })
            .map(|o| o.order_id.clone())
            .collect();

        let mut escalated = 0;
        for order_id in due {
            match self.evaluate_auto_escalation(&order_id).await {
                Ok(OrderStatus::Paid) => escalated += 1,
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(order_id = %order_id, error = %e, "Escalation sweep failed for order");
                }
            }
        }
        if escalated > 0 {
            tracing::info!(escalated, "Escalation sweep auto-approved orders");
        }
        escalated
    }

    async fn apply_transition(&self, order_id: &str, to: OrderStatus) -> LifecycleResult<OrderStatus> {
        let lock = self.order_lock(order_id);
        let _guard = lock.lock().await;

        let current = self
            .get(order_id)
            .ok_or_else(|| LifecycleError::NotFound(order_id.to_string()))?;
        if !current.status.can_transition_to(to) {
            return Err(LifecycleError::InvalidTransition {
                from: current.status,
                to,
            });
        }

        self.commit_status(&current, to).await?;
        if to.is_terminal() {
            self.locks.remove(order_id);
        }
        Ok(to)
    }

    /// Write-through, refresh, publish. Caller must hold the order's lock.
    async fn commit_status(&self, order: &Order, to: OrderStatus) -> LifecycleResult<()> {
        self.store.update_status(&order.order_id, to).await?;
        if let Err(e) = self.refresh_cache().await {
            tracing::warn!(order_id = %order.order_id, error = %e, "Cache refresh failed after status write");
        }
        // Publish only after the write is confirmed durable
        self.hub.publish(
            &order.customer_email,
            OrderUpdate::new(order.order_id.clone(), to, order.customer_email.clone()),
        );
        tracing::info!(order_id = %order.order_id, from = %order.status, to = %to, "Order status advanced");
        Ok(())
    }

    fn order_lock(&self, order_id: &str) -> Arc<Mutex<()>> {
        let lock = self.locks.entry(order_id.to_string()).or_default().clone();
        if self.locks.len() > LOCK_MAP_WARN_THRESHOLD {
            tracing::warn!(
                lock_count = self.locks.len(),
                "Order lock map exceeds threshold, possible order leak"
            );
        }
        lock
    }

    /// The hub this manager publishes into
    pub fn hub(&self) -> &NotificationHub {
        &self.hub
    }

    // ========== Queries ==========

    fn snapshot(&self) -> Arc<HashMap<String, Order>> {
        self.cache.read().clone()
    }

    /// Get an order by id from the cache snapshot
    pub fn get(&self, order_id: &str) -> Option<Order> {
        self.snapshot().get(order_id).cloned()
    }

    /// All orders, oldest first
    pub fn all_orders(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self.snapshot().values().cloned().collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        orders
    }

    /// One customer's orders, oldest first
    pub fn orders_for(&self, customer_email: &str) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .snapshot()
            .values()
            .filter(|o| o.customer_email == customer_email)
            .cloned()
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        orders
    }

    async fn refresh_cache(&self) -> Result<(), StoreError> {
        let _gate = self.refresh_gate.lock().await;
        let orders = self.store.load_all().await?;
        let map: HashMap<String, Order> = orders
            .into_iter()
            .map(|o| (o.order_id.clone(), o))
            .collect();
        *self.cache.write() = Arc::new(map);
        Ok(())
    }
}

#[cfg(test)]
mod tests;

use super::*;
use crate::db::store::{MemoryOrderStore, OrderStore, StoreError, StoreResult};
use crate::notify::NotificationHub;
use crate::payment::{
    GcashGateway, PaymayaGateway, PaymentError, PaymentGateway, PaymentInitiation, PaymentService,
};
use crate::services::MenuCatalog;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use shared::order::{
    CartItemInput, DeliveryDetails, LineItem, Order, OrderStatus, PaymentMethod,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

const CUSTOMER: &str = "john@example.com";
const CUSTOMER_NAME: &str = "John Doe";

fn test_catalog() -> Arc<MenuCatalog> {
    Arc::new(MenuCatalog::from_items([
        ("Burger", Decimal::from(800)),
        ("Pizza", Decimal::from(1200)),
        ("Sinigang", Decimal::from(150)),
    ]))
}

fn mock_payments() -> PaymentService {
    PaymentService::with_gateways(
        Arc::new(GcashGateway::new("test-app-id".to_string(), "test-secret".to_string())),
        Arc::new(PaymayaGateway::new("test-public".to_string(), "test-secret".to_string())),
    )
}

fn manager_with_store(store: Arc<dyn OrderStore>) -> OrderLifecycle {
    OrderLifecycle::new(
        store,
        test_catalog(),
        mock_payments(),
        NotificationHub::new(),
        300,
        10,
    )
}

fn create_test_manager() -> OrderLifecycle {
    manager_with_store(Arc::new(MemoryOrderStore::new()))
}

fn create_test_manager_with_store() -> (OrderLifecycle, Arc<MemoryOrderStore>) {
    let store = Arc::new(MemoryOrderStore::new());
    (manager_with_store(store.clone()), store)
}

fn delivery() -> DeliveryDetails {
    DeliveryDetails {
        email: CUSTOMER.to_string(),
        phone: "09171234567".to_string(),
        address: "12 Mabini St".to_string(),
        postal: "1100".to_string(),
        city: "Quezon City".to_string(),
    }
}

fn cart(items: &[(&str, u32)]) -> Vec<CartItemInput> {
    items
        .iter()
        .map(|(name, quantity)| CartItemInput {
            name: name.to_string(),
            quantity: *quantity,
        })
        .collect()
}

/// Checkout a COD order for the default customer
async fn checkout_cod(manager: &OrderLifecycle, items: &[(&str, u32)]) -> Order {
    manager
        .checkout(CUSTOMER, CUSTOMER_NAME, &cart(items), PaymentMethod::Cod, delivery())
        .await
        .expect("checkout failed")
        .order
}

/// Build an order directly, bypassing checkout (for seeding arbitrary states)
fn order_fixture(id: &str, status: OrderStatus, age_secs: i64) -> Order {
    let items = vec![LineItem {
        name: "Burger".to_string(),
        unit_price: Decimal::from(800),
        quantity: 1,
    }];
    Order {
        order_id: id.to_string(),
        customer_email: CUSTOMER.to_string(),
        customer_name: CUSTOMER_NAME.to_string(),
        delivery: delivery(),
        total: Order::compute_total(&items),
        line_items: items,
        payment_method: PaymentMethod::Cod,
        payment_reference: format!("cod_{id}"),
        status,
        created_at: Utc::now() - Duration::seconds(age_secs),
    }
}

/// Insert a fixture into the store and reload the manager cache
async fn seed_order(manager: &OrderLifecycle, store: &MemoryOrderStore, order: &Order) {
    store.insert(order).await.unwrap();
    manager.load().await.unwrap();
}

fn assert_order_status(manager: &OrderLifecycle, order_id: &str, expected: OrderStatus) {
    let order = manager.get(order_id).expect("order missing from cache");
    assert_eq!(
        order.status, expected,
        "Expected order status {expected:?}, got {:?}",
        order.status
    );
}

// ========================================================================
// Test doubles
// ========================================================================

/// Store wrapper that fails status writes on demand
struct FlakyStore {
    inner: MemoryOrderStore,
    fail_updates: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryOrderStore::new(),
            fail_updates: AtomicBool::new(false),
        }
    }

    fn fail_updates(&self, on: bool) {
        self.fail_updates.store(on, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderStore for FlakyStore {
    async fn load_all(&self) -> StoreResult<Vec<Order>> {
        self.inner.load_all().await
    }

    async fn insert(&self, order: &Order) -> StoreResult<()> {
        self.inner.insert(order).await
    }

    async fn update_status(&self, order_id: &str, status: OrderStatus) -> StoreResult<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Database("injected write failure".to_string()));
        }
        self.inner.update_status(order_id, status).await
    }
}

/// Gateway that rejects every initiation
struct RejectingGateway;

#[async_trait]
impl PaymentGateway for RejectingGateway {
    fn provider(&self) -> &'static str {
        "GCash"
    }

    async fn initiate_payment(
        &self,
        _amount: Decimal,
        order_id: &str,
        _description: &str,
    ) -> Result<PaymentInitiation, PaymentError> {
        Err(PaymentError::Rejected {
            provider: "GCash",
            order_id: order_id.to_string(),
            reason: "insufficient wallet balance".to_string(),
        })
    }
}

mod test_checkout;
mod test_concurrency;

//! SurrealDB store integration
//!
//! Exercises the RocksDB-backed [`SurrealOrderStore`] against the store
//! contract: insert, load, status update, and the not-found distinction.

use chrono::Utc;
use kusina_server::db::{DbService, OrderStore, StoreError, SurrealOrderStore};
use rust_decimal::Decimal;
use shared::order::{DeliveryDetails, LineItem, Order, OrderStatus, PaymentMethod};
use tempfile::TempDir;

fn sample_order(id: &str) -> Order {
    let items = vec![
        LineItem {
            name: "Chicken Adobo".to_string(),
            unit_price: Decimal::from(120),
            quantity: 2,
        },
        LineItem {
            name: "Halo-Halo".to_string(),
            unit_price: Decimal::from(80),
            quantity: 1,
        },
    ];
    Order {
        order_id: id.to_string(),
        customer_email: "alice@example.com".to_string(),
        customer_name: "Alice Johnson".to_string(),
        delivery: DeliveryDetails {
            email: "alice@example.com".to_string(),
            phone: "09181234567".to_string(),
            address: "7 Rizal Ave".to_string(),
            postal: "1000".to_string(),
            city: "Manila".to_string(),
        },
        total: Order::compute_total(&items),
        line_items: items,
        payment_method: PaymentMethod::Gcash,
        payment_reference: format!("gcash_{id}"),
        status: OrderStatus::Processing,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn store_contract_holds_on_rocksdb() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("kusina.db");
    let service = DbService::new(&db_path.to_string_lossy()).await.unwrap();
    let store = SurrealOrderStore::new(service.db);

    assert!(store.load_all().await.unwrap().is_empty());

    let order = sample_order("it-1");
    store.insert(&order).await.unwrap();
    store.insert(&sample_order("it-2")).await.unwrap();

    let mut loaded = store.load_all().await.unwrap();
    loaded.sort_by(|a, b| a.order_id.cmp(&b.order_id));
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].order_id, "it-1");
    assert_eq!(loaded[0].total, Decimal::from(320));
    assert_eq!(loaded[0].status, OrderStatus::Processing);
    assert_eq!(loaded[0].line_items, order.line_items);

    store.update_status("it-1", OrderStatus::Paid).await.unwrap();
    let loaded = store.load_all().await.unwrap();
    let updated = loaded.iter().find(|o| o.order_id == "it-1").unwrap();
    assert_eq!(updated.status, OrderStatus::Paid);

    // Missing orders are not-found, not a database failure
    let err = store.update_status("missing", OrderStatus::Paid).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

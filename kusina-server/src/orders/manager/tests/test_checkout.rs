use super::*;
use tokio::sync::broadcast::error::TryRecvError;

#[tokio::test]
async fn total_is_sum_of_catalog_prices() {
    let manager = create_test_manager();

    let order = checkout_cod(&manager, &[("Pizza", 1), ("Burger", 2), ("Sinigang", 3)]).await;

    // 1200*1 + 800*2 + 150*3
    assert_eq!(order.total, Decimal::from(3250));
    assert_eq!(order.total, Order::compute_total(&order.line_items));
    assert_eq!(order.line_items.len(), 3);
}

#[tokio::test]
async fn cod_checkout_scenario() {
    let manager = create_test_manager();

    let order = checkout_cod(&manager, &[("Burger", 2)]).await;

    assert_eq!(order.total, Decimal::from(1600));
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.payment_reference, format!("cod_{}", order.order_id));
    assert_eq!(order.customer_email, CUSTOMER);

    // Persisted and queryable
    assert_order_status(&manager, &order.order_id, OrderStatus::Processing);
}

#[tokio::test]
async fn wallet_checkout_gets_gateway_reference_and_redirect() {
    let manager = create_test_manager();

    let outcome = manager
        .checkout(CUSTOMER, CUSTOMER_NAME, &cart(&[("Pizza", 1)]), PaymentMethod::Gcash, delivery())
        .await
        .unwrap();
    let id = &outcome.order.order_id;
    assert_eq!(outcome.order.payment_reference, format!("gcash_{id}"));
    assert_eq!(
        outcome.redirect_url.as_deref(),
        Some(format!("https://gcash.com/pay/{id}").as_str())
    );

    let outcome = manager
        .checkout(CUSTOMER, CUSTOMER_NAME, &cart(&[("Pizza", 1)]), PaymentMethod::Paymaya, delivery())
        .await
        .unwrap();
    let id = &outcome.order.order_id;
    assert_eq!(outcome.order.payment_reference, format!("paymaya_{id}"));
}

#[tokio::test]
async fn unknown_item_rejected_before_any_write() {
    let (manager, store) = create_test_manager_with_store();

    let err = manager
        .checkout(
            CUSTOMER,
            CUSTOMER_NAME,
            &cart(&[("Burger", 1), ("Ramen", 1)]),
            PaymentMethod::Cod,
            delivery(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, LifecycleError::InvalidItem(name) if name == "Ramen"));
    assert!(store.is_empty());
    assert!(manager.all_orders().is_empty());
}

#[tokio::test]
async fn quantity_bounds_enforced() {
    let (manager, store) = create_test_manager_with_store();

    for quantity in [0u32, 11] {
        let err = manager
            .checkout(
                CUSTOMER,
                CUSTOMER_NAME,
                &cart(&[("Burger", quantity)]),
                PaymentMethod::Cod,
                delivery(),
            )
            .await
            .unwrap_err();
        assert!(
            matches!(err, LifecycleError::InvalidQuantity { quantity: q, max: 10, .. } if q == quantity)
        );
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn gateway_rejection_aborts_creation() {
    let store = Arc::new(MemoryOrderStore::new());
    let payments = PaymentService::with_gateways(
        Arc::new(RejectingGateway),
        Arc::new(PaymayaGateway::new("pk".to_string(), "sk".to_string())),
    );
    let manager = OrderLifecycle::new(
        store.clone(),
        test_catalog(),
        payments,
        NotificationHub::new(),
        300,
        10,
    );

    let err = manager
        .checkout(CUSTOMER, CUSTOMER_NAME, &cart(&[("Burger", 1)]), PaymentMethod::Gcash, delivery())
        .await
        .unwrap_err();

    assert!(matches!(err, LifecycleError::PaymentInitiationFailed(_)));
    assert!(store.is_empty());

    // COD never touches the gateway, so it still succeeds
    let order = checkout_cod(&manager, &[("Burger", 1)]).await;
    assert_eq!(order.status, OrderStatus::Processing);
}

#[tokio::test]
async fn checkout_publishes_nothing() {
    let manager = create_test_manager();
    let mut rx = manager.hub().subscribe();

    checkout_cod(&manager, &[("Burger", 1)]).await;

    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

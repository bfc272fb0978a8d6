use super::*;
use tokio::sync::broadcast::error::TryRecvError;

#[tokio::test]
async fn concurrent_transitions_admit_exactly_one_winner() {
    let manager = create_test_manager();
    let order = checkout_cod(&manager, &[("Burger", 1)]).await;

    // Both targets are valid from Processing; only one may win
    let (approve, cancel) = tokio::join!(
        manager.transition(&order.order_id, OrderStatus::Paid, true),
        manager.transition(&order.order_id, OrderStatus::Cancelled, true),
    );

    let outcomes = [approve, cancel];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one concurrent transition must succeed");

    let loser = outcomes.iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(
        loser,
        Err(LifecycleError::InvalidTransition { from, .. })
            if matches!(from, OrderStatus::Paid | OrderStatus::Cancelled)
    ));

    let final_status = manager.get(&order.order_id).unwrap().status;
    assert_eq!(final_status, *outcomes.iter().find_map(|r| r.as_ref().ok()).unwrap());
}

#[tokio::test]
async fn duplicate_concurrent_approvals_cannot_both_succeed() {
    let manager = create_test_manager();
    let order = checkout_cod(&manager, &[("Burger", 1)]).await;

    let (a, b) = tokio::join!(
        manager.transition(&order.order_id, OrderStatus::Paid, true),
        manager.transition(&order.order_id, OrderStatus::Paid, true),
    );

    assert_eq!([&a, &b].iter().filter(|r| r.is_ok()).count(), 1);
    assert_order_status(&manager, &order.order_id, OrderStatus::Paid);
}

#[tokio::test]
async fn escalation_racing_admin_approval_publishes_once() {
    let (manager, store) = create_test_manager_with_store();
    let order = order_fixture("race", OrderStatus::Processing, 301);
    seed_order(&manager, &store, &order).await;
    let mut rx = manager.hub().subscribe();

    let (escalation, approval) = tokio::join!(
        manager.evaluate_auto_escalation("race"),
        manager.transition("race", OrderStatus::Paid, true),
    );

    // Whichever side lost either observed Paid (escalation) or was rejected
    // (admin); the order ends up Paid with a single published event.
    assert_eq!(escalation.unwrap(), OrderStatus::Paid);
    if let Err(e) = approval {
        assert!(matches!(e, LifecycleError::InvalidTransition { from: OrderStatus::Paid, .. }));
    }
    assert_order_status(&manager, "race", OrderStatus::Paid);

    assert_eq!(rx.recv().await.unwrap().event.status, OrderStatus::Paid);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn failed_write_leaves_memory_untouched() {
    let store = Arc::new(FlakyStore::new());
    let manager = manager_with_store(store.clone());
    let order = checkout_cod(&manager, &[("Burger", 1)]).await;
    let mut rx = manager.hub().subscribe();

    store.fail_updates(true);
    let err = manager
        .transition(&order.order_id, OrderStatus::Paid, true)
        .await
        .unwrap_err();

    assert!(matches!(err, LifecycleError::Persistence(StoreError::Database(_))));
    // No in-memory mutation, no event: memory and store still agree
    assert_order_status(&manager, &order.order_id, OrderStatus::Processing);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));

    // Store recovers, the same transition now goes through
    store.fail_updates(false);
    let status = manager
        .transition(&order.order_id, OrderStatus::Paid, true)
        .await
        .unwrap();
    assert_eq!(status, OrderStatus::Paid);
    assert_eq!(rx.recv().await.unwrap().event.status, OrderStatus::Paid);
}

use super::*;

#[tokio::test]
async fn test_create_single_line() {
    let fx = create_test_service();
    fx.catalog.put("A1", money(10000), true);

    let created = fx
        .service
        .create(&order_request(vec![line("A1", 2)]), Some("1001"))
        .await
        .unwrap();

    assert_eq!(created.order.status, OrderStatus::Pending);
    assert_eq!(created.order.total, money(20000));
    assert_eq!(created.order.user_id.as_deref(), Some("1001"));
    assert_eq!(created.items.len(), 1);
    assert_eq!(created.items[0].subtotal, money(20000));
    assert_eq!(created.items[0].unit_price, money(10000));
    assert_consistent(&created);
}

#[tokio::test]
async fn test_create_without_acting_user() {
    let fx = create_test_service();
    fx.catalog.put("A1", money(1000), true);

    let created = fx
        .service
        .create(&order_request(vec![line("A1", 1)]), None)
        .await
        .unwrap();
    assert!(created.order.user_id.is_none());
}

#[tokio::test]
async fn test_create_trims_comment() {
    let fx = create_test_service();
    fx.catalog.put("A1", money(1000), true);

    let mut req = order_request(vec![line("A1", 1)]);
    req.comment = Some("  deliver friday  ".to_string());
    let created = fx.service.create(&req, None).await.unwrap();
    assert_eq!(created.order.comment.as_deref(), Some("deliver friday"));

    req.comment = Some("   ".to_string());
    let created = fx.service.create(&req, None).await.unwrap();
    assert!(created.order.comment.is_none());
}

#[tokio::test]
async fn test_create_unknown_product_writes_nothing() {
    let fx = create_test_service();
    fx.catalog.put("A1", money(10000), true);

    let result = fx
        .service
        .create(&order_request(vec![line("A1", 1), line("ZZ9", 1)]), None)
        .await;

    match result {
        Err(OrderError::ProductUnavailable(code)) => assert_eq!(code, "ZZ9"),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(fx.orders.order_count(), 0);
    assert_eq!(fx.orders.item_count(), 0);
}

#[tokio::test]
async fn test_create_inactive_line_in_the_middle_writes_nothing() {
    let fx = create_test_service();
    for code in ["P1", "P2", "P4", "P5"] {
        fx.catalog.put(code, money(100), true);
    }
    fx.catalog.put("P3", money(100), false);

    let lines = ["P1", "P2", "P3", "P4", "P5"]
        .into_iter()
        .map(|c| line(c, 1))
        .collect();
    let result = fx.service.create(&order_request(lines), None).await;

    assert!(matches!(result, Err(OrderError::ProductUnavailable(ref c)) if c == "P3"));
    assert_eq!(fx.orders.order_count(), 0);
    assert_eq!(fx.orders.item_count(), 0);
}

#[tokio::test]
async fn test_create_invalid_shapes() {
    let fx = create_test_service();
    fx.catalog.put("A1", money(100), true);

    let empty = fx.service.create(&order_request(vec![]), None).await;
    assert!(matches!(empty, Err(OrderError::InvalidInput(_))));

    let zero = fx.service.create(&order_request(vec![line("A1", 0)]), None).await;
    assert!(matches!(zero, Err(OrderError::InvalidInput(_))));

    let fractional = CreateOrderRequest {
        items: vec![OrderLineRequest {
            code: "A1".to_string(),
            quantity: json!(1.5),
        }],
        comment: None,
    };
    let result = fx.service.create(&fractional, None).await;
    assert!(matches!(result, Err(OrderError::InvalidInput(_))));

    // Validation happens before any catalog access
    assert_eq!(fx.catalog.batch_lookups(), 0);
    assert_eq!(fx.orders.order_count(), 0);
}

#[tokio::test]
async fn test_create_storage_failure_leaves_no_rows() {
    let fx = create_test_service();
    fx.catalog.put("A1", money(100), true);
    fx.catalog.put("B2", money(200), true);
    fx.orders.fail_item_writes();

    let result = fx
        .service
        .create(&order_request(vec![line("A1", 1), line("B2", 1)]), None)
        .await;

    assert!(matches!(result, Err(OrderError::StorageFailure(_))));
    assert_eq!(fx.orders.order_count(), 0);
    assert_eq!(fx.orders.item_count(), 0);
}

#[tokio::test]
async fn test_snapshot_price_survives_catalog_change() {
    let fx = create_test_service();
    let created = two_line_order(&fx).await;

    fx.catalog.update("A1", |p| p.price = money(99900));

    let stored = fx.service.get(created.order.id).await.unwrap();
    assert_eq!(stored.items[0].unit_price, money(10000));
    assert_eq!(stored.order.total, money(25000));
}

#[tokio::test]
async fn test_create_above_storable_total_writes_nothing() {
    let fx = create_test_service();
    fx.catalog.put("A1", money(10000), true);

    let result = fx
        .service
        .create(&order_request(vec![line("A1", 2_000_000_000)]), Some("1001"))
        .await;

    assert!(matches!(result, Err(OrderError::InvalidInput(_))));
    assert_eq!(fx.orders.order_count(), 0);
    assert_eq!(fx.orders.item_count(), 0);
}

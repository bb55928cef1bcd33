use super::*;
use crate::orders::repository::ProductSnapshot;

#[tokio::test]
async fn test_quantity_change_resums_total() {
    let fx = create_test_service();
    let created = two_line_order(&fx).await;
    assert_eq!(created.order.total, money(25000));
    let first = &created.items[0];

    let change = fx
        .service
        .update_item_quantity(created.order.id, first.id, 3)
        .await
        .unwrap();

    assert_eq!(change.item.quantity, 3);
    assert_eq!(change.item.subtotal, money(30000));
    assert_eq!(change.order_total, money(35000));

    let stored = fx.service.get(created.order.id).await.unwrap();
    assert_eq!(stored.order.total, money(35000));
    assert_eq!(stored.items[1].subtotal, money(5000));
    assert_consistent(&stored);
}

#[tokio::test]
async fn test_quantity_zero_is_rejected_without_changes() {
    let fx = create_test_service();
    let created = two_line_order(&fx).await;
    let first = created.items[0].id;

    for bad in [0, -1, i64::from(i32::MAX) + 1] {
        let result = fx
            .service
            .update_item_quantity(created.order.id, first, bad)
            .await;
        assert!(matches!(result, Err(OrderError::InvalidQuantity)), "{bad}");
    }

    let stored = fx.service.get(created.order.id).await.unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn test_item_of_another_order_is_not_found() {
    let fx = create_test_service();
    let first = two_line_order(&fx).await;
    let second = two_line_order(&fx).await;
    let foreign_item = second.items[0].id;

    let result = fx
        .service
        .update_item_quantity(first.order.id, foreign_item, 5)
        .await;

    assert!(matches!(
        result,
        Err(OrderError::ItemNotFound { order_id, item_id })
            if order_id == first.order.id && item_id == foreign_item
    ));
    assert_eq!(fx.service.get(second.order.id).await.unwrap(), second);
}

#[tokio::test]
async fn test_unknown_order_or_item_is_not_found() {
    let fx = create_test_service();
    let created = two_line_order(&fx).await;

    let result = fx.service.update_item_quantity(9999, created.items[0].id, 2).await;
    assert!(matches!(result, Err(OrderError::ItemNotFound { .. })));

    let result = fx.service.update_item_quantity(created.order.id, 9999, 2).await;
    assert!(matches!(result, Err(OrderError::ItemNotFound { .. })));
}

#[tokio::test]
async fn test_live_product_checks() {
    let fx = create_test_service();
    let created = two_line_order(&fx).await;
    let order_id = created.order.id;
    let item_id = created.items[0].id;

    fx.catalog.update("A1", |p| p.is_active = false);
    let result = fx.service.update_item_quantity(order_id, item_id, 3).await;
    assert!(matches!(result, Err(OrderError::ProductUnavailable(ref c)) if c == "A1"));

    fx.catalog.update("A1", |p| {
        p.is_active = true;
        p.in_stock = false;
    });
    let result = fx.service.update_item_quantity(order_id, item_id, 3).await;
    assert!(matches!(result, Err(OrderError::OutOfStock(ref c)) if c == "A1"));

    fx.catalog.remove("A1");
    let result = fx.service.update_item_quantity(order_id, item_id, 3).await;
    assert!(matches!(result, Err(OrderError::ProductUnavailable(_))));

    // every rejection left the order untouched
    assert_eq!(fx.service.get(order_id).await.unwrap(), created);
}

#[tokio::test]
async fn test_insufficient_stock_reports_available() {
    let fx = create_test_service();
    let created = two_line_order(&fx).await;
    fx.catalog.upsert(ProductSnapshot {
        code: "A1".to_string(),
        price: money(10000),
        is_active: true,
        in_stock: true,
        stock: Some(4),
    });

    let result = fx
        .service
        .update_item_quantity(created.order.id, created.items[0].id, 5)
        .await;
    assert!(matches!(
        result,
        Err(OrderError::InsufficientStock { available: 4, .. })
    ));

    // exactly the declared stock is fine
    let change = fx
        .service
        .update_item_quantity(created.order.id, created.items[0].id, 4)
        .await
        .unwrap();
    assert_eq!(change.order_total, money(45000));
}

#[tokio::test]
async fn test_quantity_change_keeps_snapshot_price() {
    let fx = create_test_service();
    let created = two_line_order(&fx).await;
    fx.catalog.update("A1", |p| p.price = money(12345));

    let change = fx
        .service
        .update_item_quantity(created.order.id, created.items[0].id, 2)
        .await
        .unwrap();

    assert_eq!(change.item.unit_price, money(10000));
    assert_eq!(change.item.subtotal, money(20000));
    assert_eq!(change.order_total, money(25000));
}

#[tokio::test]
async fn test_successive_changes_on_different_items() {
    let fx = create_test_service();
    let created = two_line_order(&fx).await;
    let (a, b) = (created.items[0].id, created.items[1].id);

    fx.service
        .update_item_quantity(created.order.id, a, 1)
        .await
        .unwrap();
    let last = fx
        .service
        .update_item_quantity(created.order.id, b, 4)
        .await
        .unwrap();

    // the last resum sees the first change
    assert_eq!(last.order_total, money(10000 + 20000));
    assert_consistent(&fx.service.get(created.order.id).await.unwrap());
}

#[tokio::test]
async fn test_concurrent_changes_on_different_items() {
    let fx = create_test_service();
    let created = two_line_order(&fx).await;
    let order_id = created.order.id;
    let (a, b) = (created.items[0].id, created.items[1].id);

    let (first, second) = tokio::join!(
        fx.service.update_item_quantity(order_id, a, 5),
        fx.service.update_item_quantity(order_id, b, 7),
    );
    first.unwrap();
    second.unwrap();

    let stored = fx.service.get(order_id).await.unwrap();
    assert_eq!(stored.order.total, money(50000 + 35000));
    assert_consistent(&stored);
}

#[tokio::test]
async fn test_concurrent_changes_from_many_tasks() {
    let fx = create_test_service();
    let created = two_line_order(&fx).await;
    let order_id = created.order.id;
    let (a, b) = (created.items[0].id, created.items[1].id);
    let service = std::sync::Arc::new(fx.service);

    let mut handles = Vec::new();
    for round in 1..=20_i64 {
        let service = service.clone();
        let item = if round % 2 == 0 { a } else { b };
        handles.push(tokio::spawn(async move {
            service.update_item_quantity(order_id, item, round).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_consistent(&service.get(order_id).await.unwrap());
}

#[tokio::test]
async fn test_quantity_above_storable_total_is_rejected() {
    let fx = create_test_service();
    let created = two_line_order(&fx).await;
    let first = created.items[0].id;

    let result = fx
        .service
        .update_item_quantity(created.order.id, first, 2_000_000_000)
        .await;
    assert!(matches!(result, Err(OrderError::InvalidQuantity)));
    assert_eq!(fx.service.get(created.order.id).await.unwrap(), created);

    // 99_999_999 x 100.00 plus the 50.00 line still fits
    let change = fx
        .service
        .update_item_quantity(created.order.id, first, 99_999_999)
        .await
        .unwrap();
    assert_eq!(change.order_total, money(999_999_995_000));
}

#[tokio::test]
async fn test_store_checks_stock_inside_the_write() {
    let fx = create_test_service();
    let created = two_line_order(&fx).await;
    let item_id = created.items[1].id;
    fx.catalog.update("B2", |p| p.stock = Some(2));

    // the repository enforces the live stock on its own
    let result = fx.orders.set_item_quantity(created.order.id, item_id, 3).await;
    assert!(matches!(
        result,
        Err(OrderError::InsufficientStock { available: 2, .. })
    ));

    let change = fx
        .orders
        .set_item_quantity(created.order.id, item_id, 2)
        .await
        .unwrap();
    assert_eq!(change.order_total, money(30000));
    assert_consistent(&fx.service.get(created.order.id).await.unwrap());
}

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use shared::models::{CreateOrderRequest, OrderLineRequest, OrderStatus};

use super::memory::{MemoryCatalog, MemoryOrders};
use super::*;

struct Fixture {
    orders: Arc<MemoryOrders>,
    catalog: Arc<MemoryCatalog>,
    service: OrderService,
}

fn create_test_service() -> Fixture {
    let catalog = Arc::new(MemoryCatalog::new());
    let orders = Arc::new(MemoryOrders::new(catalog.clone()));
    let service = OrderService::new(orders.clone(), catalog.clone());
    Fixture {
        orders,
        catalog,
        service,
    }
}

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn line(code: &str, quantity: i64) -> OrderLineRequest {
    OrderLineRequest {
        code: code.to_string(),
        quantity: json!(quantity),
    }
}

fn order_request(lines: Vec<OrderLineRequest>) -> CreateOrderRequest {
    CreateOrderRequest {
        items: lines,
        comment: None,
    }
}

/// Assert both consistency invariants for a stored order.
fn assert_consistent(order: &OrderWithItems) {
    let sum: Decimal = order.items.iter().map(|i| i.subtotal).sum();
    assert_eq!(order.order.total, sum, "total must equal the sum of subtotals");
    for item in &order.items {
        assert_eq!(
            item.subtotal,
            item.unit_price * Decimal::from(item.quantity),
            "subtotal of item {}",
            item.id
        );
    }
}

/// Order with two lines: A1 x2 @ 100.00 and B2 x1 @ 50.00 (total 250.00)
async fn two_line_order(fx: &Fixture) -> OrderWithItems {
    fx.catalog.put("A1", money(10000), true);
    fx.catalog.put("B2", money(5000), true);
    fx.service
        .create(&order_request(vec![line("A1", 2), line("B2", 1)]), Some("1001"))
        .await
        .unwrap()
}

mod test_create;
mod test_items;

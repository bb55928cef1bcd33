//! In-memory repository and catalog used by the order tests
//!
//! Writes are staged on a copy of the state and swapped in only when the
//! whole operation succeeded, which gives the same all-or-nothing
//! visibility as a database transaction.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::OrderStatus;

use super::error::OrderError;
use super::pricing::check_quantity;
use super::repository::{
    ListOrders, NewOrder, Order, OrderItem, OrderRepository, OrderWithItems, ProductCatalog,
    ProductSnapshot, QuantityChange, RepoResult,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    orders: BTreeMap<i64, Order>,
    items: BTreeMap<i64, OrderItem>,
    next_order_id: i64,
    next_item_id: i64,
}

impl Tables {
    fn with_items(&self, order: &Order) -> OrderWithItems {
        OrderWithItems {
            order: order.clone(),
            items: self
                .items
                .values()
                .filter(|i| i.order_id == order.id)
                .cloned()
                .collect(),
        }
    }

    fn matches(order: &Order, query: &ListOrders) -> bool {
        query.user_id.as_ref().is_none_or(|u| order.user_id.as_ref() == Some(u))
            && query.status.is_none_or(|s| order.status == s)
    }
}

pub struct MemoryOrders {
    tables: Mutex<Tables>,
    /// Read by quantity changes while the tables are locked
    catalog: Arc<MemoryCatalog>,
    /// Fail the next insert after the header was staged
    fail_item_writes: AtomicBool,
}

impl MemoryOrders {
    pub fn new(catalog: Arc<MemoryCatalog>) -> Self {
        Self {
            tables: Mutex::default(),
            catalog,
            fail_item_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_item_writes(&self) {
        self.fail_item_writes.store(true, Ordering::SeqCst);
    }

    pub fn order_count(&self) -> usize {
        self.tables.lock().unwrap().orders.len()
    }

    pub fn item_count(&self) -> usize {
        self.tables.lock().unwrap().items.len()
    }

    pub fn items_of(&self, order_id: i64) -> Vec<OrderItem> {
        let tables = self.tables.lock().unwrap();
        tables
            .items
            .values()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrders {
    async fn insert(&self, new: NewOrder) -> RepoResult<OrderWithItems> {
        let mut tables = self.tables.lock().unwrap();
        let mut staged = tables.clone();

        staged.next_order_id += 1;
        let order = Order {
            id: staged.next_order_id,
            user_id: new.user_id,
            status: OrderStatus::Pending,
            total: new.total,
            comment: new.comment,
            created_at: new.created_at,
        };
        staged.orders.insert(order.id, order.clone());

        for line in new.lines {
            if self.fail_item_writes.swap(false, Ordering::SeqCst) {
                return Err("simulated item write failure".into());
            }
            staged.next_item_id += 1;
            let item = OrderItem {
                id: staged.next_item_id,
                order_id: order.id,
                product_code: line.product_code,
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal: line.subtotal,
            };
            staged.items.insert(item.id, item);
        }

        let created = staged.with_items(&order);
        *tables = staged;
        Ok(created)
    }

    async fn find(&self, order_id: i64) -> RepoResult<Option<OrderWithItems>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.orders.get(&order_id).map(|o| tables.with_items(o)))
    }

    async fn list(&self, query: &ListOrders) -> RepoResult<Vec<OrderWithItems>> {
        let tables = self.tables.lock().unwrap();
        let mut orders: Vec<&Order> = tables
            .orders
            .values()
            .filter(|o| Tables::matches(o, query))
            .collect();
        orders.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(orders
            .into_iter()
            .skip(query.offset.max(0) as usize)
            .take(query.limit.max(0) as usize)
            .map(|o| tables.with_items(o))
            .collect())
    }

    async fn count(&self, query: &ListOrders) -> RepoResult<i64> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .orders
            .values()
            .filter(|o| Tables::matches(o, query))
            .count() as i64)
    }

    async fn set_item_quantity(
        &self,
        order_id: i64,
        item_id: i64,
        quantity: i32,
    ) -> Result<QuantityChange, OrderError> {
        let mut tables = self.tables.lock().unwrap();
        let not_found = || OrderError::ItemNotFound { order_id, item_id };

        let order_total = tables
            .orders
            .get(&order_id)
            .map(|o| o.total)
            .ok_or_else(not_found)?;
        let item = tables
            .items
            .get(&item_id)
            .filter(|i| i.order_id == order_id)
            .cloned()
            .ok_or_else(not_found)?;

        let product = self.catalog.get(&item.product_code);
        let subtotal = check_quantity(&item, product.as_ref(), quantity, order_total)?;

        let item = OrderItem {
            quantity,
            subtotal,
            ..item
        };
        tables.items.insert(item.id, item.clone());

        let total: Decimal = tables
            .items
            .values()
            .filter(|i| i.order_id == order_id)
            .map(|i| i.subtotal)
            .sum();
        if let Some(order) = tables.orders.get_mut(&order_id) {
            order.total = total;
        }

        Ok(QuantityChange {
            item,
            order_total: total,
        })
    }

    async fn set_status(&self, order_id: i64, status: OrderStatus) -> RepoResult<Option<Order>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.orders.get_mut(&order_id).map(|o| {
            o.status = status;
            o.clone()
        }))
    }

    async fn delete(&self, order_id: i64) -> RepoResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        tables.items.retain(|_, i| i.order_id != order_id);
        Ok(tables.orders.remove(&order_id).is_some())
    }
}

#[derive(Default)]
pub struct MemoryCatalog {
    products: Mutex<HashMap<String, ProductSnapshot>>,
    batch_lookups: AtomicUsize,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a product that is in stock with untracked quantity.
    pub fn put(&self, code: &str, price: Decimal, is_active: bool) {
        self.upsert(ProductSnapshot {
            code: code.to_string(),
            price,
            is_active,
            in_stock: true,
            stock: None,
        });
    }

    pub fn upsert(&self, product: ProductSnapshot) {
        self.products
            .lock()
            .unwrap()
            .insert(product.code.clone(), product);
    }

    /// Mutate a stored product in place.
    pub fn update(&self, code: &str, f: impl FnOnce(&mut ProductSnapshot)) {
        if let Some(p) = self.products.lock().unwrap().get_mut(code) {
            f(p);
        }
    }

    pub fn remove(&self, code: &str) {
        self.products.lock().unwrap().remove(code);
    }

    pub fn get(&self, code: &str) -> Option<ProductSnapshot> {
        self.products.lock().unwrap().get(code).cloned()
    }

    pub fn batch_lookups(&self) -> usize {
        self.batch_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog {
    async fn find_active(&self, codes: &[String]) -> RepoResult<Vec<ProductSnapshot>> {
        self.batch_lookups.fetch_add(1, Ordering::SeqCst);
        let products = self.products.lock().unwrap();
        Ok(codes
            .iter()
            .filter_map(|c| products.get(c))
            .filter(|p| p.is_active)
            .cloned()
            .collect())
    }
}

//! Order management
//!
//! - [`pricing`]: request validation and snapshot pricing
//! - [`repository`]: storage seams (`OrderRepository`, `ProductCatalog`)
//! - [`service`]: [`OrderService`], the lifecycle operations used by the API
//!
//! Invariants kept by every operation:
//! - `item.subtotal == item.quantity * item.unit_price`
//! - `order.total == sum(item.subtotal)`, recomputed from all lines

pub mod error;
pub mod pricing;
pub mod repository;
pub mod service;

#[cfg(test)]
pub mod memory;
#[cfg(test)]
mod tests;

pub use error::OrderError;
pub use repository::{
    ListOrders, Order, OrderItem, OrderRepository, OrderWithItems, ProductCatalog,
    ProductSnapshot, QuantityChange,
};
pub use service::OrderService;

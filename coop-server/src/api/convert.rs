//! Storage rows to wire models
//!
//! Amounts leave the server as JSON numbers and timestamps as RFC 3339
//! strings; this is the only place doing either conversion.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::models as wire;
use shared::util::millis_to_rfc3339;

use crate::db::news::NewsRow;
use crate::db::products::{ProductLabel, ProductRow};
use crate::db::sales::SaleRow;
use crate::db::users::UserRow;
use crate::orders::{Order, OrderItem, OrderWithItems};

pub fn money(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

impl From<&Order> for wire::Order {
    fn from(order: &Order) -> Self {
        wire::Order {
            id: order.id,
            user_id: order.user_id.clone(),
            status: order.status,
            total: money(order.total),
            comment: order.comment.clone(),
            created_at: millis_to_rfc3339(order.created_at),
        }
    }
}

impl From<&OrderItem> for wire::OrderItem {
    fn from(item: &OrderItem) -> Self {
        wire::OrderItem {
            id: item.id,
            order_id: item.order_id,
            product_code: item.product_code.clone(),
            quantity: item.quantity,
            unit_price: money(item.unit_price),
            subtotal: money(item.subtotal),
            product_name: None,
            product_info: None,
        }
    }
}

/// Display name of the ordering client
pub fn client_name(user_id: Option<&str>, names: &HashMap<String, String>) -> String {
    match user_id {
        None => "Sin cliente".to_string(),
        Some(id) => names
            .get(id)
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Usuario {id}")),
    }
}

/// Order view for staff; with `labels` each line also gets the product name
/// and technical info (`N/A` / empty when the product no longer exists).
pub fn order_detail(
    order: &OrderWithItems,
    names: &HashMap<String, String>,
    labels: Option<&HashMap<String, ProductLabel>>,
) -> wire::OrderDetail {
    let items = order
        .items
        .iter()
        .map(|item| {
            let mut view = wire::OrderItem::from(item);
            if let Some(labels) = labels {
                let label = labels.get(&item.product_code);
                view.product_name = Some(
                    label
                        .and_then(|l| l.articulo.clone())
                        .filter(|a| !a.is_empty())
                        .unwrap_or_else(|| "N/A".to_string()),
                );
                view.product_info =
                    Some(label.and_then(|l| l.info_tecnica.clone()).unwrap_or_default());
            }
            view
        })
        .collect();

    wire::OrderDetail {
        order: wire::Order::from(&order.order),
        client_name: client_name(order.order.user_id.as_deref(), names),
        items,
    }
}

impl From<ProductRow> for wire::Product {
    fn from(row: ProductRow) -> Self {
        wire::Product {
            id: row.id,
            code: row.code,
            articulo: row.articulo,
            rubro: row.rubro,
            motor: row.motor,
            nro_fabrica: row.nro_fabrica,
            info_tecnica: row.info_tecnica,
            mv: row.mv,
            price: money(row.price),
            stock: row.stock,
            in_stock: row.in_stock,
            is_active: row.is_active,
        }
    }
}

impl From<UserRow> for wire::UserInfo {
    fn from(row: UserRow) -> Self {
        wire::UserInfo {
            id: row.id,
            name: row.name,
            role: row.role,
            email: row.email,
            phone: row.phone,
            is_disabled: row.is_disabled,
            created_at: millis_to_rfc3339(row.created_at),
        }
    }
}

impl From<UserRow> for wire::AccountProfile {
    fn from(row: UserRow) -> Self {
        wire::AccountProfile {
            id: row.id,
            name: row.name,
            role: row.role,
            email: row.email,
            phone: row.phone,
            email_pending: row.email_pending,
        }
    }
}

impl From<UserRow> for wire::SessionUser {
    fn from(row: UserRow) -> Self {
        wire::SessionUser {
            id: row.id,
            name: row.name,
            role: row.role,
            email: row.email,
        }
    }
}

impl From<NewsRow> for wire::News {
    fn from(row: NewsRow) -> Self {
        wire::News {
            id: row.id,
            title: row.title,
            content: row.content,
            image_url: row.image_url,
            display_order: row.display_order,
            is_active: row.is_active,
            created_at: millis_to_rfc3339(row.created_at),
            updated_at: millis_to_rfc3339(row.updated_at),
        }
    }
}

impl From<SaleRow> for wire::SaleRow {
    fn from(row: SaleRow) -> Self {
        wire::SaleRow {
            id: row.id,
            user_id: row.user_id,
            created_at: millis_to_rfc3339(row.created_at),
            total: money(row.total),
        }
    }
}

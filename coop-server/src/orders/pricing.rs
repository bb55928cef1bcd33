//! Snapshot pricing of requested order lines

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde_json::Value;
use shared::models::OrderLineRequest;

use super::error::OrderError;
use super::repository::{OrderItem, PricedLine, ProductCatalog, ProductSnapshot};

/// Largest amount a subtotal or order total may reach (`NUMERIC(12, 2)`)
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// A validated request line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub code: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    pub total: Decimal,
}

/// Integral JSON number, `2` and `2.0` alike. Anything else is `None`.
pub fn integral_quantity(raw: &Value) -> Option<i64> {
    if let Some(n) = raw.as_i64() {
        return Some(n);
    }
    let f = raw.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Check the shape of a create request: at least one line, every code
/// non-empty, every quantity an integer >= 1.
pub fn validate_lines(raw: &[OrderLineRequest]) -> Result<Vec<OrderLine>, OrderError> {
    if raw.is_empty() {
        return Err(OrderError::InvalidInput(
            "items is required (array with at least 1 item)".to_string(),
        ));
    }

    raw.iter()
        .map(|line| {
            let code = line.code.trim();
            let quantity = integral_quantity(&line.quantity)
                .filter(|q| *q >= 1)
                .and_then(|q| i32::try_from(q).ok());
            match (code.is_empty(), quantity) {
                (false, Some(quantity)) => Ok(OrderLine {
                    code: code.to_string(),
                    quantity,
                }),
                _ => Err(OrderError::InvalidInput(
                    "Each item requires code (string) and quantity (integer >= 1)".to_string(),
                )),
            }
        })
        .collect()
}

/// Price every line from the active catalog in one lookup.
///
/// Fails with `ProductUnavailable` on the first line whose code is not an
/// active product; nothing is priced partially. Duplicate codes yield
/// separate lines.
pub async fn resolve(
    catalog: &dyn ProductCatalog,
    lines: &[OrderLine],
) -> Result<PricedOrder, OrderError> {
    let codes: Vec<String> = lines
        .iter()
        .map(|l| l.code.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let products: HashMap<String, ProductSnapshot> = catalog
        .find_active(&codes)
        .await?
        .into_iter()
        .filter(|p| p.is_active)
        .map(|p| (p.code.clone(), p))
        .collect();

    let mut priced = Vec::with_capacity(lines.len());
    let mut total = Decimal::ZERO;
    for line in lines {
        let product = products
            .get(&line.code)
            .ok_or_else(|| OrderError::ProductUnavailable(line.code.clone()))?;
        let subtotal = product.price * Decimal::from(line.quantity);
        total += subtotal;
        if total > max_amount() {
            return Err(OrderError::InvalidInput(format!(
                "Order total exceeds the maximum of {}",
                max_amount()
            )));
        }
        priced.push(PricedLine {
            product_code: product.code.clone(),
            quantity: line.quantity,
            unit_price: product.price,
            subtotal,
        });
    }

    Ok(PricedOrder {
        lines: priced,
        total,
    })
}

/// Check a new quantity for a stored line against the live product and
/// return the line's new subtotal.
///
/// `product` is the catalog row as seen by the writing transaction; the
/// line keeps its snapshot unit price.
pub fn check_quantity(
    item: &OrderItem,
    product: Option<&ProductSnapshot>,
    quantity: i32,
    order_total: Decimal,
) -> Result<Decimal, OrderError> {
    let product = product
        .filter(|p| p.is_active)
        .ok_or_else(|| OrderError::ProductUnavailable(item.product_code.clone()))?;
    if !product.in_stock {
        return Err(OrderError::OutOfStock(product.code.clone()));
    }
    if let Some(available) = product.stock {
        if available < quantity {
            return Err(OrderError::InsufficientStock {
                code: product.code.clone(),
                available,
            });
        }
    }

    let subtotal = item.unit_price * Decimal::from(quantity);
    if order_total - item.subtotal + subtotal > max_amount() {
        return Err(OrderError::InvalidQuantity);
    }
    Ok(subtotal)
}

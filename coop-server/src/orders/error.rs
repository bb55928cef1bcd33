//! Order error taxonomy and its mapping onto API error codes

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use super::repository::BoxError;

#[derive(Debug, Error)]
pub enum OrderError {
    /// Malformed request: no lines, empty code, non-integral quantity
    #[error("{0}")]
    InvalidInput(String),

    /// Product missing or inactive
    #[error("Product not found or inactive: {0}")]
    ProductUnavailable(String),

    #[error("Product has no stock available: {0}")]
    OutOfStock(String),

    #[error("Insufficient stock for {code}. Available: {available}")]
    InsufficientStock { code: String, available: i32 },

    #[error("Quantity must be an integer greater than 0")]
    InvalidQuantity,

    #[error("Order {0} not found")]
    OrderNotFound(i64),

    /// Also used when the item exists but belongs to another order
    #[error("Item {item_id} not found in order {order_id}")]
    ItemNotFound { order_id: i64, item_id: i64 },

    #[error("Invalid order status: {0}")]
    InvalidStatus(String),

    #[error("Storage failure: {0}")]
    StorageFailure(#[source] BoxError),
}

impl From<BoxError> for OrderError {
    fn from(e: BoxError) -> Self {
        OrderError::StorageFailure(e)
    }
}

impl From<OrderError> for AppError {
    fn from(e: OrderError) -> Self {
        let message = e.to_string();
        match e {
            OrderError::InvalidInput(_) => {
                AppError::with_message(ErrorCode::OrderInvalidInput, message)
            }
            OrderError::ProductUnavailable(code) => {
                AppError::with_message(ErrorCode::ProductUnavailable, message)
                    .with_detail("product_code", code)
            }
            OrderError::OutOfStock(code) => {
                AppError::with_message(ErrorCode::ProductOutOfStock, message)
                    .with_detail("product_code", code)
            }
            OrderError::InsufficientStock { code, available } => {
                AppError::with_message(ErrorCode::ProductInsufficientStock, message)
                    .with_detail("product_code", code)
                    .with_detail("available", available)
            }
            OrderError::InvalidQuantity => AppError::new(ErrorCode::OrderInvalidQuantity),
            OrderError::OrderNotFound(id) => {
                AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", id)
            }
            OrderError::ItemNotFound { order_id, item_id } => {
                AppError::new(ErrorCode::OrderItemNotFound)
                    .with_detail("order_id", order_id)
                    .with_detail("item_id", item_id)
            }
            OrderError::InvalidStatus(raw) => {
                AppError::with_message(ErrorCode::OrderInvalidStatus, message)
                    .with_detail("status", raw)
            }
            OrderError::StorageFailure(source) => {
                tracing::error!(error = %source, "Order storage failure");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

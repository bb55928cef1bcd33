//! Sales report Model

use serde::{Deserialize, Serialize};

/// GET /sales query
///
/// `period` is one of `today`, `week`, `month`; `from`/`to` are
/// `YYYY-MM-DD` and override the corresponding end of the range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesQuery {
    pub period: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesMetrics {
    pub orders: i64,
    pub revenue: f64,
    pub avg_ticket: f64,
    pub top_day_label: Option<String>,
    pub top_day_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRow {
    pub id: i64,
    pub user_id: Option<String>,
    pub created_at: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    pub metrics: SalesMetrics,
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    pub total: i64,
    pub items: Vec<SaleRow>,
}

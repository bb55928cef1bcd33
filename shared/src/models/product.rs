//! Product Model

use serde::{Deserialize, Serialize};

/// Catalog product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub code: String,
    pub articulo: Option<String>,
    /// Category
    pub rubro: Option<String>,
    pub motor: Option<String>,
    pub nro_fabrica: Option<String>,
    pub info_tecnica: Option<String>,
    pub mv: Option<String>,
    pub price: f64,
    /// Declared stock quantity, `None` when not tracked
    pub stock: Option<i32>,
    pub in_stock: bool,
    pub is_active: bool,
}

/// GET /catalogo query
///
/// `only_stock` is kept as text: `1`, `true` and `on` enable it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub q: Option<String>,
    pub only_stock: Option<String>,
    pub motor: Option<String>,
    pub rubro: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl CatalogQuery {
    pub fn only_stock(&self) -> bool {
        matches!(self.only_stock.as_deref(), Some("1" | "true" | "on"))
    }
}

/// GET /catalogo/filters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFilters {
    pub motors: Vec<String>,
    pub rubros: Vec<String>,
}

/// GET /catalogo/rubro-counts row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RubroCount {
    pub rubro: String,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_stock_flag() {
        let mut q = CatalogQuery::default();
        assert!(!q.only_stock());
        for on in ["1", "true", "on"] {
            q.only_stock = Some(on.to_string());
            assert!(q.only_stock());
        }
        q.only_stock = Some("yes".to_string());
        assert!(!q.only_stock());
    }
}

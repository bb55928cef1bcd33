//! Pagination envelopes

use serde::{Deserialize, Serialize};

/// Page envelope used by catalog and account listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub per_page: i64,
    pub current_page: i64,
    pub last_page: i64,
}

impl<T> Page<T> {
    /// Build a page; `current_page` is clamped to `last_page`.
    pub fn new(data: Vec<T>, page: i64, per_page: i64, total: i64) -> Self {
        let last_page = last_page(total, per_page);
        Self {
            data,
            total,
            per_page,
            current_page: page.min(last_page),
            last_page,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
            last_page: self.last_page,
        }
    }
}

/// Envelope used by the admin listings (`/usuarios`, `/sales`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminPage<T> {
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    pub total: i64,
    pub items: Vec<T>,
}

/// Number of pages for `total` rows, never less than 1.
pub fn last_page(total: i64, per_page: i64) -> i64 {
    if per_page <= 0 {
        return 1;
    }
    ((total + per_page - 1) / per_page).max(1)
}

/// Parse an optional page-size parameter, falling back to `default` and
/// clamping into `[min, max]`.
pub fn clamp_per_page(raw: Option<i64>, default: i64, min: i64, max: i64) -> i64 {
    raw.unwrap_or(default).clamp(min, max)
}

/// Page numbers start at 1.
pub fn clamp_page(raw: Option<i64>) -> i64 {
    raw.unwrap_or(1).max(1)
}

/// Rows to skip before `page`; saturates instead of overflowing on huge
/// page numbers, which then simply yield an empty page.
pub fn page_offset(page: i64, per_page: i64) -> i64 {
    page.saturating_sub(1).max(0).saturating_mul(per_page.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page() {
        assert_eq!(last_page(0, 50), 1);
        assert_eq!(last_page(50, 50), 1);
        assert_eq!(last_page(51, 50), 2);
        assert_eq!(last_page(10, 0), 1);
    }

    #[test]
    fn test_page_clamps_current_page() {
        let page = Page::new(Vec::<i32>::new(), 7, 10, 25);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.current_page, 3);
    }

    #[test]
    fn test_clamps() {
        assert_eq!(clamp_per_page(None, 50, 10, 100), 50);
        assert_eq!(clamp_per_page(Some(3), 50, 10, 100), 10);
        assert_eq!(clamp_per_page(Some(500), 50, 10, 100), 100);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(None), 1);
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(3, 20), 40);
        assert_eq!(page_offset(0, 20), 0);
        assert_eq!(page_offset(i64::MAX, 100), i64::MAX);
        assert_eq!(page_offset(i64::MAX / 2, 20), i64::MAX);
    }

    #[test]
    fn test_admin_page_uses_camel_page_size() {
        let page = AdminPage::<i32> {
            page: 1,
            page_size: 20,
            total: 0,
            items: vec![],
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pageSize"], 20);
    }
}

//! News Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    /// 1 = first; `None` sorts after every numbered item
    pub display_order: Option<i32>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Create news payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsCreate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Update news payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

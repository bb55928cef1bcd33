//! User Model

use serde::{Deserialize, Serialize};

/// Role names stored in `users.role`
pub mod roles {
    pub const ADMIN: &str = "administrador";
    pub const SUPPORT: &str = "soporte";
    pub const WORKER: &str = "trabajador";
    pub const MARKETING: &str = "marketing";
    pub const MARKETING_ADMIN: &str = "admin_marketing";
    pub const CUSTOMER: &str = "cliente";
    pub const NONE: &str = "sin_rol";

    /// Order deletion and the sales report
    pub const ADMIN_ONLY: &[&str] = &[ADMIN];
    /// Roles allowed to operate on orders
    pub const STAFF: &[&str] = &[ADMIN, SUPPORT, WORKER];
    /// Roles allowed to manage users
    pub const USER_ADMINS: &[&str] = &[ADMIN, SUPPORT];
    /// Roles allowed to manage news
    pub const NEWS_EDITORS: &[&str] = &[ADMIN, MARKETING_ADMIN];
}

/// User as shown in the admin area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_disabled: bool,
    pub created_at: String,
}

/// Own profile (GET /account, GET /auth/me)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub email_pending: Option<String>,
}

/// Identity returned with a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPasswordRequest {
    #[serde(default)]
    pub password: String,
}

/// PATCH /account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// POST /usuarios
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCreate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// PUT /usuarios/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_disabled: Option<bool>,
}

/// PATCH /usuarios/{id}/disable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisableUserRequest {
    pub is_disabled: Option<bool>,
}

/// GET /usuarios query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
    pub search: Option<String>,
}

/// GET /account/orders query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountOrdersQuery {
    pub page: Option<i64>,
    pub per: Option<i64>,
}

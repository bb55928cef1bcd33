//! HTTP API
//!
//! Routes are grouped by access level:
//! - public: catalog, news, login, health
//! - signed in: ordering, own account
//! - staff (`administrador`, `soporte`, `trabajador`): order management
//! - `administrador`: order deletion, sales report
//! - user admins / news editors: `/usuarios`, news maintenance

pub mod account;
pub mod auth;
pub mod catalog;
pub mod convert;
pub mod health;
pub mod news;
pub mod orders;
pub mod sales;
pub mod users;

use axum::routing::{get, patch, post, put};
use axum::{Router, middleware};
use http::HeaderName;
use shared::error::AppError;
use shared::models::roles;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{require_auth, require_roles};
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Full application: `/health` at the root, everything else under `api_base`.
pub fn create_router(state: AppState, api_base: &str) -> Router {
    let api = api_routes(state.clone());

    let app = if api_base == "/" {
        api
    } else {
        Router::new()
            .route("/health", get(health::health_check))
            .nest(api_base, api)
    };

    let request_id = HeaderName::from_static("x-request-id");
    app.layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}

fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health::api_health))
        .route("/auth/login", post(auth::login))
        .route("/catalogo", get(catalog::list))
        .route("/catalogo/filters", get(catalog::filters))
        .route("/catalogo/rubro-counts", get(catalog::rubro_counts))
        .route("/news", get(news::list_active));

    let signed_in = Router::new()
        .route("/pedidos", post(orders::create))
        .route("/auth/me", get(auth::me))
        .route("/auth/set-password", post(auth::set_password))
        .route(
            "/account",
            get(account::get_profile).patch(account::update_profile),
        )
        .route("/account/orders", get(account::my_orders))
        .route("/account/orders/{id}/items", get(account::my_order_items));

    let staff = Router::new()
        .route("/pedidos", get(orders::list))
        .route("/pedidos/{id}", get(orders::get))
        .route("/pedidos/{id}/details", get(orders::get_with_details))
        .route(
            "/pedidos/{id}/items/{item_id}",
            patch(orders::update_item_quantity),
        )
        .route("/pedidos/{id}/status", patch(orders::update_status))
        .route_layer(middleware::from_fn(require_roles(roles::STAFF)));

    let admin = Router::new()
        .route("/pedidos/{id}", axum::routing::delete(orders::delete))
        .route("/sales", get(sales::report))
        .route_layer(middleware::from_fn(require_roles(roles::ADMIN_ONLY)));

    let user_admin = Router::new()
        .route("/usuarios", get(users::list).post(users::create))
        .route("/usuarios/{id}", get(users::get).put(users::update))
        .route("/usuarios/{id}/disable", patch(users::set_disabled))
        .route_layer(middleware::from_fn(require_roles(roles::USER_ADMINS)));

    let news_editor = Router::new()
        .route("/news", post(news::create))
        .route("/news/all", get(news::list_all))
        .route("/news/{id}", put(news::update).delete(news::delete))
        .route_layer(middleware::from_fn(require_roles(roles::NEWS_EDITORS)));

    let protected = signed_in
        .merge(staff)
        .merge(admin)
        .merge(user_admin)
        .merge(news_editor)
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    public.merge(protected)
}

//! Order endpoints (`/pedidos`)

use std::collections::BTreeSet;

use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use shared::error::{ApiResponse, AppError};
use shared::models::{
    CreateOrderRequest, CreateOrderResponse, ItemQuantity, OrderDetail, OrderListQuery,
    OrderListResponse, OrderStatus, UpdateItemQuantityRequest, UpdateItemQuantityResponse,
    UpdateStatusRequest, UpdateStatusResponse, clamp_page, clamp_per_page, page_offset,
};

use super::ApiResult;
use super::convert::{money, order_detail};
use crate::auth::CurrentUser;
use crate::db;
use crate::error::ServiceError;
use crate::orders::pricing::integral_quantity;
use crate::orders::{ListOrders, OrderError, OrderWithItems};
use crate::state::AppState;

/// GET /pedidos?status&page&per_page
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> ApiResult<OrderListResponse> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            OrderStatus::parse(raw).ok_or_else(|| OrderError::InvalidStatus(raw.to_string()))?,
        ),
    };
    let page = clamp_page(query.page);
    let per_page = clamp_per_page(query.per_page, 20, 1, 100);

    let (orders, total) = state
        .orders
        .list(&ListOrders {
            user_id: None,
            status,
            limit: per_page,
            offset: page_offset(page, per_page),
        })
        .await?;

    let names = client_names(&state, &orders).await?;
    Ok(Json(OrderListResponse {
        data: orders
            .iter()
            .map(|o| order_detail(o, &names, None))
            .collect(),
        total,
        page,
        per_page,
    }))
}

/// GET /pedidos/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<OrderDetail> {
    let order = state.orders.get(id).await?;
    let names = client_names(&state, std::slice::from_ref(&order)).await?;
    Ok(Json(order_detail(&order, &names, None)))
}

/// GET /pedidos/{id}/details
///
/// Same as [`get`] with the product name and technical info of every line.
pub async fn get_with_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<OrderDetail> {
    let order = state.orders.get(id).await?;
    let names = client_names(&state, std::slice::from_ref(&order)).await?;

    let codes: Vec<String> = order
        .items
        .iter()
        .map(|i| i.product_code.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let labels = db::products::labels_by_code(&state.pool, &codes)
        .await
        .map_err(ServiceError::Db)?;

    Ok(Json(order_detail(&order, &names, Some(&labels))))
}

/// POST /pedidos
///
/// The owner is the signed-in caller.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> ApiResult<CreateOrderResponse> {
    let Json(req) = payload.map_err(|e| {
        OrderError::InvalidInput(format!("items is required (array with at least 1 item): {e}"))
    })?;

    let created = state.orders.create(&req, Some(&user.id)).await?;

    Ok(Json(CreateOrderResponse {
        ok: true,
        order_id: created.order.id,
        total: money(created.order.total),
        status: created.order.status,
        user_id: created.order.user_id,
    }))
}

/// PATCH /pedidos/{id}/items/{item_id}
pub async fn update_item_quantity(
    State(state): State<AppState>,
    Path((order_id, item_id)): Path<(i64, i64)>,
    payload: Result<Json<UpdateItemQuantityRequest>, JsonRejection>,
) -> ApiResult<UpdateItemQuantityResponse> {
    let Json(req) = payload.map_err(|e| AppError::invalid_request(e.body_text()))?;
    let quantity = integral_quantity(&req.quantity).ok_or(OrderError::InvalidQuantity)?;

    let change = state
        .orders
        .update_item_quantity(order_id, item_id, quantity)
        .await?;

    Ok(Json(UpdateItemQuantityResponse {
        ok: true,
        item: ItemQuantity {
            id: change.item.id,
            quantity: change.item.quantity,
            subtotal: money(change.item.subtotal),
        },
        order_total: money(change.order_total),
    }))
}

/// PATCH /pedidos/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> ApiResult<UpdateStatusResponse> {
    let Json(req) = payload.map_err(|e| AppError::invalid_request(e.body_text()))?;
    let raw = req
        .status
        .as_str()
        .ok_or_else(|| OrderError::InvalidStatus(req.status.to_string()))?;

    let order = state.orders.update_status(id, raw).await?;

    Ok(Json(UpdateStatusResponse {
        ok: true,
        pedido: (&order).into(),
    }))
}

/// DELETE /pedidos/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ApiResponse, AppError> {
    state.orders.delete(id).await?;
    Ok(ApiResponse::ok_with_message("Order deleted"))
}

async fn client_names(
    state: &AppState,
    orders: &[OrderWithItems],
) -> Result<std::collections::HashMap<String, String>, AppError> {
    let ids: Vec<String> = orders
        .iter()
        .filter_map(|o| o.order.user_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let names = db::users::names_by_ids(&state.pool, &ids)
        .await
        .map_err(ServiceError::from)?;
    Ok(names)
}

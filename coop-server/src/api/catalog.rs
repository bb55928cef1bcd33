//! Public catalog (`/catalogo`)

use axum::{
    Json,
    extract::{Query, State},
};
use shared::models::{
    CatalogFilters, CatalogQuery, Page, Product, RubroCount, clamp_page, clamp_per_page,
    page_offset,
};

use crate::db::products::{self, CatalogFilter};
use crate::error::ServiceResult;
use crate::state::AppState;

/// GET /catalogo?q&only_stock&motor&rubro&page&per_page
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ServiceResult<Json<Page<Product>>> {
    let filter = CatalogFilter::new(
        query.q.as_deref(),
        query.only_stock(),
        query.motor.as_deref(),
        query.rubro.as_deref(),
    );
    let per_page = clamp_per_page(query.per_page, 50, 10, 100);
    let page = clamp_page(query.page);

    let (rows, total) =
        products::search(&state.pool, &filter, per_page, page_offset(page, per_page)).await?;

    Ok(Json(Page::new(rows, page, per_page, total).map(Product::from)))
}

/// GET /catalogo/filters
pub async fn filters(State(state): State<AppState>) -> ServiceResult<Json<CatalogFilters>> {
    let (motors, rubros) = products::filters(&state.pool).await?;
    Ok(Json(CatalogFilters { motors, rubros }))
}

/// GET /catalogo/rubro-counts?q&only_stock&motor
pub async fn rubro_counts(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ServiceResult<Json<Vec<RubroCount>>> {
    let filter = CatalogFilter::new(
        query.q.as_deref(),
        query.only_stock(),
        query.motor.as_deref(),
        None,
    );
    Ok(Json(products::rubro_counts(&state.pool, &filter).await?))
}

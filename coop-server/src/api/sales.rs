//! Sales report (`/sales`)
//!
//! Only delivered orders are sales. Ranges are whole UTC days.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    SaleRow, SalesMetrics, SalesQuery, SalesReport, clamp_page, clamp_per_page, page_offset,
};

use super::convert::money;
use crate::db::sales::{self, SalesRange};
use crate::error::ServiceResult;
use crate::state::AppState;

/// GET /sales?period&from&to&page&pageSize
pub async fn report(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> ServiceResult<Json<SalesReport>> {
    let range = sales_range(
        query.period.as_deref(),
        query.from.as_deref(),
        query.to.as_deref(),
        Utc::now(),
    )?;
    let page = clamp_page(query.page);
    let page_size = clamp_per_page(query.page_size, 20, 1, 200);

    let totals = sales::totals(&state.pool, range).await?;
    let top_day = sales::top_day(&state.pool, range).await?;
    let rows = sales::page(&state.pool, range, page_size, page_offset(page, page_size)).await?;

    let revenue = money(totals.revenue);
    let avg_ticket = if totals.orders > 0 {
        money(totals.revenue / rust_decimal::Decimal::from(totals.orders))
    } else {
        0.0
    };

    Ok(Json(SalesReport {
        metrics: SalesMetrics {
            orders: totals.orders,
            revenue,
            avg_ticket,
            top_day_amount: top_day.as_ref().map(|d| money(d.amount)).unwrap_or_default(),
            top_day_label: top_day.map(|d| d.day),
        },
        page,
        page_size,
        total: totals.orders,
        items: rows.into_iter().map(SaleRow::from).collect(),
    }))
}

/// Resolve the period preset and explicit dates into millisecond bounds.
///
/// `today`, `week` (from Monday) and `month` end at the end of `now`'s day;
/// `from` / `to` override the start / end. Unknown presets mean no preset.
pub fn sales_range(
    period: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    now: DateTime<Utc>,
) -> Result<SalesRange, AppError> {
    let today = now.date_naive();
    let mut range = match period.map(str::trim) {
        Some("today") => SalesRange {
            from: Some(start_of_day(today)),
            to: Some(end_of_day(today)),
        },
        Some("week") => {
            let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
            SalesRange {
                from: Some(start_of_day(monday)),
                to: Some(end_of_day(today)),
            }
        }
        Some("month") => SalesRange {
            from: Some(start_of_day(today.with_day(1).unwrap_or(today))),
            to: Some(end_of_day(today)),
        },
        _ => SalesRange::default(),
    };

    if let Some(from) = non_empty(from) {
        range.from = Some(start_of_day(parse_date(from)?));
    }
    if let Some(to) = non_empty(to) {
        range.to = Some(end_of_day(parse_date(to)?));
    }
    Ok(range)
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid date '{raw}', expected YYYY-MM-DD"))
            .with_detail("value", raw)
    })
}

fn start_of_day(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

fn end_of_day(date: NaiveDate) -> i64 {
    start_of_day(date) + Duration::days(1).num_milliseconds() - 1
}

//! # Revenue View
//!
//! Daily revenue: total, the day's rows, and the xlsx export.
//!
//! The view defaults to "today" on the server's local clock, matching the
//! clock that stamps sale records. An explicit `?date=YYYY-MM-DD` renders
//! any other day.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use banca_core::{SaleKind, SaleRecord, ValidationError};

use crate::error::ApiError;
use crate::export;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RevenueQuery {
    /// Calendar day as `YYYY-MM-DD`; defaults to today (local clock).
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecordDto {
    pub id: i64,
    pub timestamp: String,
    pub product_name: String,
    pub value: f64,
    pub kind: SaleKind,
}

impl From<SaleRecord> for SaleRecordDto {
    fn from(record: SaleRecord) -> Self {
        SaleRecordDto {
            id: record.id,
            timestamp: record.timestamp(),
            product_name: record.product_name,
            value: record.value.as_value(),
            kind: record.kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueResponse {
    pub date: String,
    pub total: f64,
    pub sales: Vec<SaleRecordDto>,
}

/// Resolves the requested day: explicit `?date=` or today.
fn resolve_date(query: &RevenueQuery) -> Result<NaiveDate, ApiError> {
    match &query.date {
        None => Ok(Local::now().date_naive()),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            ValidationError::InvalidFormat {
                field: "date".to_string(),
                reason: "expected YYYY-MM-DD".to_string(),
            }
            .into()
        }),
    }
}

/// Renders the revenue report for a day.
pub async fn revenue(
    State(state): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> Result<Json<RevenueResponse>, ApiError> {
    let date = resolve_date(&query)?;

    debug!(date = %date, "Revenue report");

    let report = state.db.reports().daily_total(date).await?;

    Ok(Json(RevenueResponse {
        date: report.date.format("%Y-%m-%d").to_string(),
        total: report.total.as_value(),
        sales: report.records.into_iter().map(SaleRecordDto::from).collect(),
    }))
}

/// Streams the day's report as an xlsx download.
///
/// Purely a transformation of the report rows: no side effect on the store.
pub async fn export_xlsx(
    State(state): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> Result<Response, ApiError> {
    let date = resolve_date(&query)?;

    debug!(date = %date, "Revenue export");

    let report = state.db.reports().daily_total(date).await?;

    let bytes = export::daily_workbook(&report)
        .map_err(|e| ApiError::internal(format!("Workbook generation failed: {e}")))?;

    let disposition = format!("attachment; filename=\"{}\"", export::export_filename(date));

    Ok((
        [
            (header::CONTENT_TYPE, export::XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

// =============================================================================
// Unit Tests
// =============================================================================

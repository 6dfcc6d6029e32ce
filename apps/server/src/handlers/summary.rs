//! Size summary for the production order sheet.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use tiger_core::summary::{SizeSummaryReport, SizeSummaryRow};
use tiger_core::validation::parse_status_filter;

use crate::auth::AdminSession;
use crate::error::ApiResult;
use crate::state::AppState;

/// Query string for both summary endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// Comma-separated statuses; absent or blank means every order.
    pub statuses: Option<String>,
}

/// GET /api/admin/size-summary
pub async fn size_summary(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<SizeSummaryReport>> {
    Ok(Json(build_report(&state, &query).await?))
}

/// GET /api/admin/size-summary/export
///
/// The report table plus a closing totals row.
pub async fn export(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Json<Vec<SizeSummaryRow>>> {
    let report = build_report(&state, &query).await?;
    Ok(Json(report.export_table()))
}

async fn build_report(state: &AppState, query: &SummaryQuery) -> ApiResult<SizeSummaryReport> {
    let statuses = parse_status_filter(query.statuses.as_deref().unwrap_or(""))?;

    let items = state.db.orders().line_items(&statuses).await?;
    let designs = state.db.designs().catalog_refs().await?;
    let registry = state.db.combos().registry().await?;

    let report = SizeSummaryReport::build(&items, &designs, &registry);
    tracing::debug!(
        rows = report.rows.len(),
        grand_total = report.grand_total,
        "Size summary built"
    );
    Ok(report)
}

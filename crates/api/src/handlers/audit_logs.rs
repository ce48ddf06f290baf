//! Handlers for the `/audit-logs` resource.
//!
//! Admins browse the audit trail of their own project; exporting a raw
//! date range across projects is reserved for super admins.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use veranda_core::error::CoreError;
use veranda_core::types::Timestamp;
use veranda_db::models::audit::{AuditLog, AuditLogPage, AuditQuery};
use veranda_db::repositories::AuditLogRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireSuperAdmin};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub from: Timestamp,
    pub to: Timestamp,
    /// `json` (default) or `csv`.
    pub format: Option<String>,
}

/// GET /api/v1/audit-logs
///
/// Query the audit trail with filters. The query is always pinned to the
/// caller's project scope, whatever `project_id` the filter carries.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(mut query): Query<AuditQuery>,
) -> AppResult<Json<ApiResponse<AuditLogPage>>> {
    let project_id = admin.project_scope(query.project_id)?;
    query.project_id = Some(project_id);

    let items = AuditLogRepo::query(&state.pool, &query).await?;
    let total = AuditLogRepo::count(&state.pool, &query).await?;
    Ok(Json(ApiResponse::new(AuditLogPage { items, total })))
}

/// GET /api/v1/audit-logs/export
///
/// Raw dump of a date range across all projects, oldest first, as JSON
/// (default) or CSV.
pub async fn export(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    Query(params): Query<ExportParams>,
) -> AppResult<Response> {
    if params.to <= params.from {
        return Err(AppError::Core(CoreError::Validation(
            "Export range must end after it starts".into(),
        )));
    }
    let rows = AuditLogRepo::export_range(&state.pool, params.from, params.to).await?;

    match params.format.as_deref() {
        None | Some("json") => Ok(Json(ApiResponse::new(rows)).into_response()),
        Some("csv") => Ok((
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            to_csv(&rows),
        )
            .into_response()),
        Some(other) => Err(AppError::Core(CoreError::Validation(format!(
            "Unknown export format: {other}"
        )))),
    }
}

fn to_csv(rows: &[AuditLog]) -> String {
    let mut out =
        String::from("id,user_id,project_id,action,entity_type,entity_id,detail,created_at\n");
    for row in rows {
        let detail = row
            .detail
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            row.id,
            opt_field(row.user_id),
            opt_field(row.project_id),
            csv_field(&row.action),
            csv_field(&row.entity_type),
            opt_field(row.entity_id),
            csv_field(&detail),
            row.created_at.to_rfc3339(),
        ));
    }
    out
}

fn opt_field(value: Option<veranda_core::types::DbId>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Quote a field if it contains a comma, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(['"', ',', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::csv_field;

    #[test]
    fn plain_fields_pass_through() {
        assert_eq!(csv_field("bill.pay"), "bill.pay");
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}

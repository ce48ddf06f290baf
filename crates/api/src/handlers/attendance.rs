//! Handlers for the `/attendance` resource.
//!
//! Staff clock in and out of shifts. A user has at most one open shift;
//! the partial unique index on open shifts backs that up, so a racing
//! double check-in still surfaces as 409.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use veranda_core::audit::{ACTION_ATTENDANCE_CHECK_IN, ACTION_ATTENDANCE_CHECK_OUT};
use veranda_core::error::CoreError;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_db::models::attendance::{AttendanceRecord, CheckIn};
use veranda_db::repositories::AttendanceRepo;

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::RangeListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/attendance/check-in
///
/// Open a shift for the calling staff member. 201 Created; 409 when a
/// shift is already open.
pub async fn check_in(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(input): Json<CheckIn>,
) -> AppResult<(StatusCode, Json<ApiResponse<AttendanceRecord>>)> {
    let project_id = staff.project_scope(None)?;

    if AttendanceRepo::find_open_shift(&state.pool, staff.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A shift is already open".into(),
        )));
    }

    let record =
        AttendanceRepo::check_in(&state.pool, project_id, staff.user_id, input.note.as_deref())
            .await?;
    audit::record(
        &state.pool,
        &staff,
        ACTION_ATTENDANCE_CHECK_IN,
        "attendance",
        Some(record.id),
        None,
    )
    .await;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(record))))
}

/// POST /api/v1/attendance/check-out
///
/// Close the caller's open shift. 409 when no shift is open.
pub async fn check_out(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
) -> AppResult<Json<ApiResponse<AttendanceRecord>>> {
    let record = AttendanceRepo::check_out(&state.pool, staff.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("No open shift".into())))?;
    audit::record(
        &state.pool,
        &staff,
        ACTION_ATTENDANCE_CHECK_OUT,
        "attendance",
        Some(record.id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(record)))
}

/// GET /api/v1/attendance/me
///
/// The caller's open shift, if any.
pub async fn current_shift(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
) -> AppResult<Json<ApiResponse<Option<AttendanceRecord>>>> {
    let shift = AttendanceRepo::find_open_shift(&state.pool, staff.user_id).await?;
    Ok(Json(ApiResponse::new(shift)))
}

/// GET /api/v1/attendance
///
/// Admin view of a project's shift history, filterable by time range.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<RangeListParams>,
) -> AppResult<Json<ApiResponse<Vec<AttendanceRecord>>>> {
    let project_id = admin.project_scope(params.project_id)?;
    let records = AttendanceRepo::list_by_project(
        &state.pool,
        project_id,
        params.from,
        params.to,
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ApiResponse::new(records)))
}

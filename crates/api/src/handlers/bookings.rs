//! Handlers for the `/bookings` resource.
//!
//! Residents request slots for bookable facilities; admins approve or
//! reject pending requests. Approval is refused when it would overlap an
//! already approved booking for the same facility. The booker is
//! notified of the decision.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use veranda_core::audit::{ACTION_BOOKING_CANCEL, ACTION_BOOKING_CREATE, ACTION_BOOKING_DECIDE};
use veranda_core::error::CoreError;
use veranda_core::pagination::{clamp_limit, clamp_offset};
use veranda_core::roles::ROLE_RESIDENT;
use veranda_core::types::DbId;
use veranda_db::models::booking::{ApprovalOutcome, Booking, CreateBooking, DecideBooking};
use veranda_db::repositories::{BookingRepo, UserRepo};

use crate::audit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::ScopedStatusListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/bookings
///
/// Request a facility slot. The booking is created `pending` and tied to
/// the resident's unit. 201 Created.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<ApiResponse<Booking>>)> {
    if input.ends_at <= input.starts_at {
        return Err(AppError::Core(CoreError::Validation(
            "Booking must end after it starts".into(),
        )));
    }

    let facility =
        super::facilities::find_scoped_facility(&state, &user, input.facility_id).await?;
    if !facility.is_bookable {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Facility '{}' is not open for booking",
            facility.name
        ))));
    }

    let unit_id = super::resident_unit(&state, &user).await?;
    let booking = BookingRepo::create(&state.pool, unit_id, user.user_id, &input).await?;
    audit::record(
        &state.pool,
        &user,
        ACTION_BOOKING_CREATE,
        "booking",
        Some(booking.id),
        Some(json!({ "facility_id": input.facility_id })),
    )
    .await;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(booking))))
}

/// GET /api/v1/bookings
///
/// Residents see their own bookings; staff see the project's, with an
/// optional `status` filter.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ScopedStatusListParams>,
) -> AppResult<Json<ApiResponse<Vec<Booking>>>> {
    if user.role == ROLE_RESIDENT {
        let bookings = BookingRepo::list_by_booker(&state.pool, user.user_id).await?;
        return Ok(Json(ApiResponse::new(bookings)));
    }

    let project_id = user.project_scope(params.project_id)?;
    let bookings = BookingRepo::list_by_project(
        &state.pool,
        project_id,
        params.status.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(ApiResponse::new(bookings)))
}

/// GET /api/v1/bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let booking = find_scoped_booking(&state, &user, id).await?;
    Ok(Json(ApiResponse::new(booking)))
}

/// POST /api/v1/bookings/{id}/decide
///
/// Approve or reject a pending booking. Approval checks the facility
/// calendar and fails with 409 when the slot is already taken.
pub async fn decide(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<DecideBooking>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    if input.decision != "approved" && input.decision != "rejected" {
        return Err(AppError::Core(CoreError::Validation(
            "Decision must be 'approved' or 'rejected'".into(),
        )));
    }

    find_scoped_booking(&state, &admin, id).await?;

    // Approval re-checks the calendar under a facility lock so concurrent
    // approvals of overlapping windows cannot both pass.
    let booking = if input.decision == "approved" {
        match BookingRepo::approve(&state.pool, id, admin.user_id, input.note.as_deref()).await? {
            ApprovalOutcome::Approved(booking) => booking,
            ApprovalOutcome::SlotTaken => {
                return Err(AppError::Core(CoreError::Conflict(
                    "Slot overlaps an approved booking".into(),
                )));
            }
            ApprovalOutcome::NotPending => {
                return Err(AppError::Core(CoreError::Conflict(
                    "Booking is not pending".into(),
                )));
            }
        }
    } else {
        BookingRepo::decide(
            &state.pool,
            id,
            &input.decision,
            admin.user_id,
            input.note.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("Booking is not pending".into())))?
    };

    audit::record(
        &state.pool,
        &admin,
        ACTION_BOOKING_DECIDE,
        "booking",
        Some(id),
        Some(json!({ "decision": input.decision })),
    )
    .await;

    if let Some(booker) = UserRepo::find_by_id(&state.pool, booking.booked_by).await? {
        let body = format!("Your booking request was {}.", booking.status);
        if let Err(err) = state
            .notifier
            .notify_user(
                booker.id,
                Some(&booker.email),
                "booking",
                "Booking decision",
                &body,
            )
            .await
        {
            tracing::error!(error = %err, "Booking notification failed");
        }
    }

    Ok(Json(ApiResponse::new(booking)))
}

/// POST /api/v1/bookings/{id}/cancel
///
/// Cancel a pending or approved booking. The booker or an admin may
/// cancel; settled bookings return 409.
pub async fn cancel(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let existing = find_scoped_booking(&state, &user, id).await?;
    if user.role == ROLE_RESIDENT && existing.booked_by != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the booker may cancel this booking".into(),
        )));
    }

    let booking = BookingRepo::cancel(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("Booking is already settled".into())))?;
    audit::record(
        &state.pool,
        &user,
        ACTION_BOOKING_CANCEL,
        "booking",
        Some(id),
        None,
    )
    .await;
    Ok(Json(ApiResponse::new(booking)))
}

/// Fetch a booking and verify scope via its facility's project.
/// Residents may only see bookings they made.
async fn find_scoped_booking(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Booking> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    let facility =
        super::facilities::find_scoped_facility(state, user, booking.facility_id).await?;
    user.check_project(facility.project_id)?;

    if user.role == ROLE_RESIDENT && booking.booked_by != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Booking belongs to another user".into(),
        )));
    }
    Ok(booking)
}

//! Handlers for the `/users` resource (staff and resident management).
//!
//! All handlers require at least the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use veranda_core::audit::{
    ACTION_USER_CREATE, ACTION_USER_DEACTIVATE, ACTION_USER_RESET_PASSWORD, ACTION_USER_UPDATE,
};
use veranda_core::error::CoreError;
use veranda_core::roles::{ROLE_ADMIN, ROLE_SUPER_ADMIN, STAFF_ROLES};
use veranda_core::types::DbId;
use veranda_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use veranda_db::repositories::{RoleRepo, UnitRepo, UserRepo};

use crate::audit;
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireSuperAdmin};
use crate::query::ProjectScopeParams;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    /// Role name, e.g. `"resident"` or `"security"`.
    pub role: String,
    pub unit_id: Option<DbId>,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub unit_id: Option<DbId>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Create a user in the caller's project. Admin and super-admin accounts
/// can only be minted by a super admin; super-admin accounts carry no
/// project. Validates password strength, hashes it, and returns a safe
/// [`UserResponse`] with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(scope): Query<ProjectScopeParams>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    // Only a super admin may mint admin or super-admin accounts. Super-admin
    // accounts carry no project; everything else lands in the resolved scope.
    let project_id = if input.role == ROLE_SUPER_ADMIN {
        if admin.role != ROLE_SUPER_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only a super admin may create super admin accounts".into(),
            )));
        }
        None
    } else {
        if input.role == ROLE_ADMIN && admin.role != ROLE_SUPER_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only a super admin may create admin accounts".into(),
            )));
        }
        Some(admin.project_scope(scope.project_id)?)
    };

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let role = RoleRepo::find_by_name(&state.pool, &input.role)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Unknown role: {}",
                input.role
            )))
        })?;

    // A unit assignment must point into the same project.
    if let Some(unit_id) = input.unit_id {
        let unit = UnitRepo::find_by_id(&state.pool, unit_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Unit",
                id: unit_id,
            }))?;
        if Some(unit.project_id) != project_id {
            return Err(AppError::Core(CoreError::Validation(
                "Unit belongs to another project".into(),
            )));
        }
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        email: input.email,
        phone: input.phone,
        password_hash: hashed,
        role_id: role.id,
        project_id,
        unit_id: input.unit_id,
    };

    let user = UserRepo::create(&state.pool, &create_dto).await?;
    audit::record(
        &state.pool,
        &admin,
        ACTION_USER_CREATE,
        "user",
        Some(user.id),
        None,
    )
    .await;

    let response = build_user_response(&user, role.name);
    Ok((StatusCode::CREATED, Json(ApiResponse::new(response))))
}

/// GET /api/v1/users
///
/// List the caller's project users with resolved role names.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(scope): Query<ProjectScopeParams>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let project_id = admin.project_scope(scope.project_id)?;
    let users = UserRepo::list_by_project(&state.pool, project_id).await?;

    // Pre-fetch all roles to avoid N+1 queries.
    let roles = RoleRepo::list(&state.pool).await?;

    let responses: Vec<UserResponse> = users
        .iter()
        .map(|u| {
            let role_name = roles
                .iter()
                .find(|r| r.id == u.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            build_user_response(u, role_name)
        })
        .collect();

    Ok(Json(ApiResponse::new(responses)))
}

/// GET /api/v1/users/all
///
/// List users across all projects. Super admin only.
pub async fn list_all_users(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    let roles = RoleRepo::list(&state.pool).await?;

    let responses: Vec<UserResponse> = users
        .iter()
        .map(|u| {
            let role_name = roles
                .iter()
                .find(|r| r.id == u.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "unknown".to_string());
            build_user_response(u, role_name)
        })
        .collect();

    Ok(Json(ApiResponse::new(responses)))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = find_scoped_user(&state, &admin, id).await?;
    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(ApiResponse::new(build_user_response(&user, role_name))))
}

/// PATCH /api/v1/users/{id}
///
/// Update a user's profile fields (not password).
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    find_scoped_user(&state, &admin, id).await?;

    let role_id = match &input.role {
        Some(name) => {
            // Project-scoped accounts cannot become super admins; promotion
            // to admin is reserved for super admins.
            if name == ROLE_SUPER_ADMIN {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Cannot promote a user to super admin".into(),
                )));
            }
            if name == ROLE_ADMIN && admin.role != ROLE_SUPER_ADMIN {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Only a super admin may promote a user to admin".into(),
                )));
            }
            let role = RoleRepo::find_by_name(&state.pool, name)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Validation(format!("Unknown role: {name}")))
                })?;
            Some(role.id)
        }
        None => None,
    };

    let update_dto = UpdateUser {
        username: input.username,
        email: input.email,
        phone: input.phone,
        role_id,
        unit_id: input.unit_id,
        is_active: input.is_active,
    };

    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    audit::record(
        &state.pool,
        &admin,
        ACTION_USER_UPDATE,
        "user",
        Some(id),
        None,
    )
    .await;

    let role_name = RoleRepo::resolve_name(&state.pool, user.role_id).await?;
    Ok(Json(ApiResponse::new(build_user_response(&user, role_name))))
}

/// DELETE /api/v1/users/{id}
///
/// Deactivate a user (blocks login, keeps history). Returns 204 No Content.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_scoped_user(&state, &admin, id).await?;

    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        audit::record(
            &state.pool,
            &admin,
            ACTION_USER_DEACTIVATE,
            "user",
            Some(id),
            None,
        )
        .await;
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// POST /api/v1/users/{id}/reset-password
///
/// Admin-initiated password reset. Revokes nothing; the user's existing
/// sessions stay valid until their refresh tokens expire.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    find_scoped_user(&state, &admin, id).await?;

    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::set_password_hash(&state.pool, id, &hashed).await?;
    if updated {
        audit::record(
            &state.pool,
            &admin,
            ACTION_USER_RESET_PASSWORD,
            "user",
            Some(id),
            None,
        )
        .await;
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// GET /api/v1/users/staff
///
/// List the project's on-site staff (security + maintenance).
pub async fn list_staff(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(scope): Query<ProjectScopeParams>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let project_id = admin.project_scope(scope.project_id)?;

    let mut staff = Vec::new();
    for role_name in STAFF_ROLES {
        let users = UserRepo::list_active_by_role(&state.pool, project_id, role_name).await?;
        staff.extend(
            users
                .iter()
                .map(|u| build_user_response(u, role_name.to_string())),
        );
    }

    Ok(Json(ApiResponse::new(staff)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch a user and verify they belong to the caller's project.
async fn find_scoped_user(state: &AppState, admin: &crate::middleware::auth::AuthUser, id: DbId) -> AppResult<User> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    if let Some(user_project) = user.project_id {
        admin.check_project(user_project)?;
    } else if admin.project_id.is_some() {
        // Project admins cannot touch unscoped (super admin) accounts.
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot manage accounts outside your project".into(),
        )));
    }
    Ok(user)
}

/// Build a [`UserResponse`] from a [`User`] and a pre-resolved role name.
fn build_user_response(user: &User, role: String) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        phone: user.phone.clone(),
        role,
        role_id: user.role_id,
        project_id: user.project_id,
        unit_id: user.unit_id,
        is_active: user.is_active,
        last_login_at: user.last_login_at,
        created_at: user.created_at,
    }
}

//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use veranda_core::error::CoreError;
use veranda_core::roles::ROLE_SUPER_ADMIN;
use veranda_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (e.g. `"admin"`, `"security"`, `"resident"`).
    pub role: String,
    /// The user's project. `None` only for super admins.
    pub project_id: Option<DbId>,
}

impl AuthUser {
    /// Resolve the project a request operates on.
    ///
    /// Project-scoped users always act on their own project and may not name
    /// another one. Super admins have no project of their own and must pass
    /// `?project_id=` explicitly.
    pub fn project_scope(&self, requested: Option<DbId>) -> Result<DbId, AppError> {
        match self.project_id {
            Some(own) => {
                if let Some(req) = requested {
                    if req != own {
                        return Err(AppError::Core(CoreError::Forbidden(
                            "Cannot act on another project".into(),
                        )));
                    }
                }
                Ok(own)
            }
            None => requested.ok_or_else(|| {
                AppError::BadRequest("project_id query parameter is required".into())
            }),
        }
    }

    /// Reject the request unless the entity belongs to the caller's project.
    ///
    /// Super admins pass unconditionally.
    pub fn check_project(&self, entity_project: DbId) -> Result<(), AppError> {
        if self.role == ROLE_SUPER_ADMIN {
            return Ok(());
        }
        if self.project_id != Some(entity_project) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Resource belongs to another project".into(),
            )));
        }
        Ok(())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            project_id: claims.project_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use veranda_core::roles::{ROLE_ADMIN, ROLE_SUPER_ADMIN};

    use super::*;

    fn project_user() -> AuthUser {
        AuthUser {
            user_id: 1,
            role: ROLE_ADMIN.to_string(),
            project_id: Some(7),
        }
    }

    fn super_admin() -> AuthUser {
        AuthUser {
            user_id: 2,
            role: ROLE_SUPER_ADMIN.to_string(),
            project_id: None,
        }
    }

    #[test]
    fn scoped_user_defaults_to_own_project() {
        assert_eq!(project_user().project_scope(None).unwrap(), 7);
        assert_eq!(project_user().project_scope(Some(7)).unwrap(), 7);
    }

    #[test]
    fn scoped_user_cannot_name_another_project() {
        assert!(project_user().project_scope(Some(8)).is_err());
    }

    #[test]
    fn super_admin_must_name_a_project() {
        assert!(super_admin().project_scope(None).is_err());
        assert_eq!(super_admin().project_scope(Some(3)).unwrap(), 3);
    }

    #[test]
    fn project_check_matches_ownership() {
        assert!(project_user().check_project(7).is_ok());
        assert!(project_user().check_project(8).is_err());
        assert!(super_admin().check_project(8).is_ok());
    }
}

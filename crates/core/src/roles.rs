//! Well-known role name constants.
//!
//! These must match the seed data in `20260801000001_create_roles.sql`.

pub const ROLE_SUPER_ADMIN: &str = "super_admin";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SECURITY: &str = "security";
pub const ROLE_MAINTENANCE: &str = "maintenance";
pub const ROLE_RESIDENT: &str = "resident";

/// Roles that count as on-site staff (attendance tracking applies).
pub const STAFF_ROLES: &[&str] = &[ROLE_SECURITY, ROLE_MAINTENANCE];

/// Returns `true` if `role` is one of the five known role names.
pub fn is_known_role(role: &str) -> bool {
    matches!(
        role,
        ROLE_SUPER_ADMIN | ROLE_ADMIN | ROLE_SECURITY | ROLE_MAINTENANCE | ROLE_RESIDENT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_recognised() {
        for role in [
            ROLE_SUPER_ADMIN,
            ROLE_ADMIN,
            ROLE_SECURITY,
            ROLE_MAINTENANCE,
            ROLE_RESIDENT,
        ] {
            assert!(is_known_role(role), "{role} should be a known role");
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(!is_known_role("janitor"));
        assert!(!is_known_role(""));
    }
}

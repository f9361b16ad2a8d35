//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint in `20260101000002_create_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_DONOR: &str = "donor";

/// All valid user roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_DONOR];

/// Validate that a role string is one of the known roles.
pub fn validate_role(role: &str) -> Result<(), crate::error::CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(crate::error::CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {VALID_ROLES:?}"
        )))
    }
}

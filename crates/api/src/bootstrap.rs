//! First-run admin account.

use sadaqah_core::forms::{normalize_email, validate_email, validate_password};
use sadaqah_core::roles::ROLE_ADMIN;
use sadaqah_db::models::user::CreateUser;
use sadaqah_db::repositories::UserRepo;
use sadaqah_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Credentials for the initial admin, from `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl AdminSeed {
    /// `None` unless both variables are set.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            email: std::env::var("ADMIN_EMAIL").ok()?,
            password: std::env::var("ADMIN_PASSWORD").ok()?,
        })
    }
}

/// Create an admin account when no active admin exists yet.
///
/// Returns `true` if an account was created.
pub async fn ensure_admin(pool: &DbPool, seed: &AdminSeed) -> AppResult<bool> {
    if UserRepo::exists_with_role(pool, ROLE_ADMIN).await? {
        return Ok(false);
    }

    let email = normalize_email(&seed.email);
    validate_email(&email)?;
    validate_password(&seed.password)?;

    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: "Administrator".to_string(),
            email,
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Bootstrap admin account created");
    Ok(true)
}

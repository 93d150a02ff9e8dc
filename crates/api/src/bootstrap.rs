//! One-time provisioning at startup.
//!
//! There is no signup path for administrators; the first (and usually only)
//! admin account is seeded from the environment when the server boots.

use plinth_core::email;
use plinth_core::roles::ROLE_ADMIN;
use plinth_db::models::user::CreateUser;
use plinth_db::repositories::UserRepo;
use plinth_db::DbPool;

use crate::auth::password::hash_password;

/// Ensure the admin account named by `ADMIN_EMAIL` / `ADMIN_PASSWORD` exists.
///
/// Does nothing when the variables are unset, and leaves an existing account
/// untouched -- rotating the password is a manual operation.
///
/// # Panics
///
/// Panics on a malformed `ADMIN_EMAIL`; a typo here should stop the boot.
pub async fn ensure_admin_user(pool: &DbPool) -> Result<(), sqlx::Error> {
    let (Ok(raw_email), Ok(password)) = (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) else {
        tracing::debug!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin bootstrap");
        return Ok(());
    };

    let admin_email = email::validate(&raw_email)
        .unwrap_or_else(|e| panic!("ADMIN_EMAIL is not a valid email address: {e}"));

    if UserRepo::find_by_email(pool, &admin_email).await?.is_some() {
        tracing::debug!(email = %admin_email, "Admin account already exists");
        return Ok(());
    }

    let password_hash =
        hash_password(&password).expect("Failed to hash ADMIN_PASSWORD at startup");
    let create = CreateUser {
        email: admin_email.clone(),
        password_hash,
        role: ROLE_ADMIN.to_string(),
    };
    let user = UserRepo::create(pool, &create).await?;

    tracing::info!(user_id = user.id, email = %admin_email, "Admin account created");
    Ok(())
}

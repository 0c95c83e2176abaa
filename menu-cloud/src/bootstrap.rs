//! Startup provisioning of the platform admin account

use sqlx::SqlitePool;

use crate::db;
use crate::util::{hash_password, normalize_email, now_millis};

/// Make sure `email` is an active admin with `password`.
///
/// Creates the account when missing; otherwise promotes it and resets the
/// password, so a lost admin password is recovered by restarting with new
/// credentials.
pub async fn ensure_admin(pool: &SqlitePool, email: &str, password: &str) -> anyhow::Result<()> {
    let email = normalize_email(email)
        .ok_or_else(|| anyhow::anyhow!("ADMIN_EMAIL is not a valid address: {email}"))?;
    let hashed = hash_password(password).map_err(|e| anyhow::anyhow!("hash failed: {e}"))?;

    match db::tenants::find_by_email(pool, &email).await? {
        Some(tenant) => {
            db::tenants::promote_admin(pool, &tenant.id, &hashed).await?;
            tracing::info!(tenant_id = %tenant.id, "Admin account refreshed");
        }
        None => {
            let id = uuid::Uuid::new_v4().to_string();
            db::tenants::create(pool, &id, &email, &hashed, "admin", now_millis()).await?;
            tracing::info!(tenant_id = %id, "Admin account created");
        }
    }
    Ok(())
}

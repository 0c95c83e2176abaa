//! Audit log operations

use sqlx::SqlitePool;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Write an audit log entry
pub async fn log(
    pool: &SqlitePool,
    tenant_id: &str,
    action: &str,
    detail: Option<&serde_json::Value>,
    ip_address: Option<&str>,
    now: i64,
) -> Result<(), BoxError> {
    sqlx::query(
        "INSERT INTO audit_logs (tenant_id, action, detail, ip_address, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(tenant_id)
    .bind(action)
    .bind(detail.map(|d| d.to_string()))
    .bind(ip_address)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Audit log entry (detail is stored as JSON text)
#[derive(sqlx::FromRow, serde::Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub tenant_id: String,
    pub action: String,
    pub detail: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: i64,
}

/// Query audit log entries for a tenant (paginated, newest first)
pub async fn query(
    pool: &SqlitePool,
    tenant_id: &str,
    limit: i32,
    offset: i32,
) -> Result<Vec<AuditEntry>, BoxError> {
    let rows: Vec<AuditEntry> = sqlx::query_as(
        "SELECT id, tenant_id, action, detail, ip_address, created_at FROM audit_logs
         WHERE tenant_id = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
    )
    .bind(tenant_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

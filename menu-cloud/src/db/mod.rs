//! Database access layer
//!
//! SQLite connection pool, migrations, and one module of free query
//! functions per table.

pub mod audit;
pub mod categories;
pub mod menu_items;
pub mod payments;
pub mod restaurants;
pub mod subscriptions;
pub mod tenants;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::time::Duration;

/// Open the pool (WAL, foreign keys, busy timeout) and apply migrations.
///
/// An in-memory URL gets a single connection that is never recycled, since
/// every new connection would see an empty database.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    if !in_memory {
        if let Some(parent) = options.get_filename().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        options = options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
    }

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::info!(in_memory, "Database connection established (SQLite)");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    /// In-memory pool with the full schema.
    pub async fn test_pool() -> SqlitePool {
        super::connect("sqlite::memory:").await.unwrap()
    }

    /// Insert an owner tenant and its restaurant row.
    pub async fn seed_restaurant(pool: &SqlitePool, id: &str, name: &str, slug: &str, at: i64) {
        super::tenants::create(
            pool,
            id,
            &format!("{id}@example.com"),
            "hash",
            "owner",
            at,
        )
        .await
        .unwrap();
        super::restaurants::create(pool, id, name, slug, at).await.unwrap();
    }
}

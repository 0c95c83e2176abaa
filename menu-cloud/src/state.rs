//! Application state for menu-cloud

use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::rate_limit::RateLimiter;
use crate::config::Config;
use crate::db;
use crate::menu::{MenuService, SqlMenuSource};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT secret for tenant authentication
    pub jwt_secret: String,
    /// Root directory for optimized images (served under `/images`)
    pub images_dir: PathBuf,
    /// Longest edge of stored images
    pub image_max_dimension: u32,
    /// Allow `?debug=true` on public menus
    pub menu_debug_trace: bool,
    /// Public menu resolution
    pub menu: Arc<MenuService<SqlMenuSource>>,
    /// Rate limiter for login/registration routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Open the database (running migrations) and build the state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = db::connect(&config.database_url).await?;
        Ok(Self::with_pool(pool, config))
    }

    pub fn with_pool(pool: SqlitePool, config: &Config) -> Self {
        let menu = MenuService::new(
            SqlMenuSource::new(pool.clone()),
            config.legacy_name_matching,
        );
        Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            images_dir: PathBuf::from(&config.images_dir),
            image_max_dimension: config.image_max_dimension,
            menu_debug_trace: config.menu_debug_trace,
            menu: Arc::new(menu),
            rate_limiter: RateLimiter::new(),
        }
    }
}

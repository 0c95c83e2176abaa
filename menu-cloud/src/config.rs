//! Menu service configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Menu service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for tenant authentication
    pub jwt_secret: String,
    /// Root directory for optimized images
    pub images_dir: String,
    /// Longest edge (px) of stored images
    pub image_max_dimension: u32,
    /// Resolve public menus by restaurant name when no slug matches
    pub legacy_name_matching: bool,
    /// Allow `?debug=true` to attach the lookup trace
    pub menu_debug_trace: bool,
    /// Bootstrap admin account (both must be set)
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    /// Interval of the subscription expiry sweep
    pub subscription_sweep_secs: u64,
    /// Days after expiry before a restaurant's menu data is deleted
    pub purge_grace_days: i64,
    /// Log level (RUST_LOG overrides)
    pub log_level: String,
    /// JSON log output
    pub log_json: bool,
    /// Directory for rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn env_bool(name: &str, default: bool) -> bool {
        match std::env::var(name) {
            Ok(v) => matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
            Err(_) => default,
        }
    }

    fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_dev = environment == "development";

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/menu.db".into()),
            http_port: Self::env_parse("HTTP_PORT", 8080),
            environment: environment.clone(),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            images_dir: std::env::var("IMAGES_DIR").unwrap_or_else(|_| "data/images".into()),
            image_max_dimension: Self::env_parse("IMAGE_MAX_DIMENSION", 1200),
            legacy_name_matching: Self::env_bool("LEGACY_NAME_MATCHING", true),
            menu_debug_trace: Self::env_bool("MENU_DEBUG_TRACE", is_dev),
            admin_email: std::env::var("ADMIN_EMAIL").ok().filter(|s| !s.is_empty()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|s| !s.is_empty()),
            subscription_sweep_secs: Self::env_parse("SUBSCRIPTION_SWEEP_SECS", 300),
            purge_grace_days: Self::env_parse("PURGE_GRACE_DAYS", 7),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: Self::env_bool("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
        })
    }

    /// Configuration for tests and local tooling: in-memory database, debug on.
    pub fn for_tests(images_dir: impl Into<String>) -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            environment: "development".into(),
            jwt_secret: "test-jwt-secret".into(),
            images_dir: images_dir.into(),
            image_max_dimension: 1200,
            legacy_name_matching: true,
            menu_debug_trace: true,
            admin_email: None,
            admin_password: None,
            subscription_sweep_secs: 300,
            purge_grace_days: 7,
            log_level: "debug".into(),
            log_json: false,
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_secret_dev_placeholder() {
        let val = Config::require_secret("MENU_CLOUD_TEST_UNSET_SECRET", "development").unwrap();
        assert_eq!(val, "dev-MENU_CLOUD_TEST_UNSET_SECRET-not-for-production");
    }

    #[test]
    fn test_require_secret_missing_in_production() {
        let err = Config::require_secret("MENU_CLOUD_TEST_UNSET_SECRET", "production").unwrap_err();
        assert!(err.to_string().contains("must be set"));
    }

    #[test]
    fn test_env_defaults_when_unset() {
        assert_eq!(Config::env_parse("MENU_CLOUD_TEST_UNSET_PORT", 8080u16), 8080);
        assert!(Config::env_bool("MENU_CLOUD_TEST_UNSET_FLAG", true));
    }
}

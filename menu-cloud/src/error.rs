//! Service-layer errors
//!
//! Helpers shared by several handlers return [`ServiceResult`], so storage
//! failures and business errors both flow through `?` and end up as an
//! [`AppError`] at the handler boundary.

use shared::error::{AppError, ErrorCode};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum ServiceError {
    /// Storage failure: logged, then hidden behind `InternalError`
    Db(BoxError),
    /// Already a client-facing error
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app) => app,
            ServiceError::Db(db) => {
                tracing::error!(error = %db, "Service storage error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Unique-constraint violation (email, slug, category name, pending payment)
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_passes_through() {
        let err: ServiceError = AppError::new(ErrorCode::SlugTaken).into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::SlugTaken);
    }

    #[test]
    fn test_db_error_maps_to_internal() {
        let err: ServiceError = sqlx::Error::RowNotFound.into();
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InternalError);
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[tokio::test]
    async fn test_boxed_audit_error_maps_to_internal() {
        async fn write(pool: &sqlx::SqlitePool) -> ServiceResult<()> {
            crate::db::audit::log(pool, "t1", "login", None, None, 0).await?;
            Ok(())
        }
        let pool = crate::db::test_support::test_pool().await;
        pool.close().await;
        let app: AppError = write(&pool).await.unwrap_err().into();
        assert_eq!(app.code, ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn test_unique_violation_detected() {
        let pool = crate::db::test_support::test_pool().await;
        crate::db::test_support::seed_restaurant(&pool, "t1", "Cafe", "cafe", 0).await;
        let err = crate::db::tenants::create(&pool, "t2", "t1@example.com", "h", "owner", 0)
            .await
            .unwrap_err();
        assert!(is_unique_violation(&err));
    }
}

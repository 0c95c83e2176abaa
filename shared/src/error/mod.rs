//! Error system shared by menu-cloud and its clients
//!
//! Every failure is an [`AppError`] carrying a numeric [`ErrorCode`]. The code
//! decides the HTTP status and the [`ErrorCategory`]; the JSON body is an
//! [`ApiResponse`] with `code`, `message` and optional `details`.
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::CategoryHasItems).with_detail("item_count", 3);
//! assert_eq!(err.http_status().as_u16(), 409);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError};

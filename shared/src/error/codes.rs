//! Unified error codes for the menu platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Tenant errors (accounts, restaurants, subscriptions)
//! - 5xxx: Payment errors
//! - 6xxx: Menu errors (categories, items, uploads)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Too many requests from the same client
    RateLimited = 9,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1007,
    /// Password too short
    PasswordTooShort = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Tenant ====================
    /// Tenant account not found
    TenantNotFound = 3002,
    /// Restaurant not found
    RestaurantNotFound = 3101,
    /// Slug already used by another restaurant
    SlugTaken = 3102,
    /// Slug has an invalid format
    SlugInvalid = 3103,
    /// Unknown theme
    ThemeInvalid = 3104,
    /// Unknown currency
    CurrencyInvalid = 3105,
    /// No active subscription for tenant
    SubscriptionRequired = 3201,
    /// Subscription has expired
    SubscriptionExpired = 3202,
    /// Unknown subscription plan
    PlanInvalid = 3203,

    // ==================== 5xxx: Payment ====================
    /// Payment not found
    PaymentNotFound = 5001,
    /// Invalid payment method
    PaymentInvalidMethod = 5003,
    /// Payment was already verified or rejected
    PaymentAlreadyReviewed = 5006,
    /// Another payment is still awaiting review
    PaymentPending = 5007,
    /// Wallet payment submitted without a transaction reference
    PaymentReferenceRequired = 5008,

    // ==================== 6xxx: Menu ====================
    /// Category not found
    CategoryNotFound = 6101,
    /// Category still has menu items
    CategoryHasItems = 6102,
    /// Category name already exists
    CategoryNameExists = 6103,
    /// Menu item not found
    MenuItemNotFound = 6201,
    /// Menu item has an invalid price
    MenuItemInvalidPrice = 6202,

    // ==================== 65xx: File Upload ====================
    /// File too large
    FileTooLarge = 6501,
    /// Unsupported file format
    UnsupportedFileFormat = 6502,
    /// Invalid image file
    InvalidImageFile = 6503,
    /// No file provided
    NoFileProvided = 6504,
    /// Empty file
    EmptyFile = 6505,
    /// Image processing failed
    ImageProcessingFailed = 6508,
    /// File storage failed
    FileStorageFailed = 6509,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Storage backend unavailable
    StorageUnavailable = 9003,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::RateLimited => "Too many requests, try again later",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",

            // Tenant
            ErrorCode::TenantNotFound => "Tenant not found",
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::SlugTaken => "Slug is already in use",
            ErrorCode::SlugInvalid => {
                "Slug must be 2-63 lowercase letters, digits or single hyphens"
            }
            ErrorCode::ThemeInvalid => "Unknown theme",
            ErrorCode::CurrencyInvalid => "Unknown currency",
            ErrorCode::SubscriptionRequired => "An active subscription is required",
            ErrorCode::SubscriptionExpired => "Subscription has expired",
            ErrorCode::PlanInvalid => "Unknown subscription plan",

            // Payment
            ErrorCode::PaymentNotFound => "Payment not found",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::PaymentAlreadyReviewed => "Payment has already been reviewed",
            ErrorCode::PaymentPending => "A payment is already awaiting review",
            ErrorCode::PaymentReferenceRequired => "Wallet payments require a reference",

            // Menu
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasItems => "Category still has menu items",
            ErrorCode::CategoryNameExists => "Category name already exists",
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemInvalidPrice => "Price must be a non-negative amount in cents",

            // File Upload
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::ImageProcessingFailed => "Image processing failed",
            ErrorCode::FileStorageFailed => "File storage failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::StorageUnavailable => "Menu storage is temporarily unavailable",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::RateLimited),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1007 => Ok(ErrorCode::AccountDisabled),
            1008 => Ok(ErrorCode::PasswordTooShort),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Tenant
            3002 => Ok(ErrorCode::TenantNotFound),
            3101 => Ok(ErrorCode::RestaurantNotFound),
            3102 => Ok(ErrorCode::SlugTaken),
            3103 => Ok(ErrorCode::SlugInvalid),
            3104 => Ok(ErrorCode::ThemeInvalid),
            3105 => Ok(ErrorCode::CurrencyInvalid),
            3201 => Ok(ErrorCode::SubscriptionRequired),
            3202 => Ok(ErrorCode::SubscriptionExpired),
            3203 => Ok(ErrorCode::PlanInvalid),

            // Payment
            5001 => Ok(ErrorCode::PaymentNotFound),
            5003 => Ok(ErrorCode::PaymentInvalidMethod),
            5006 => Ok(ErrorCode::PaymentAlreadyReviewed),
            5007 => Ok(ErrorCode::PaymentPending),
            5008 => Ok(ErrorCode::PaymentReferenceRequired),

            // Menu
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CategoryHasItems),
            6103 => Ok(ErrorCode::CategoryNameExists),
            6201 => Ok(ErrorCode::MenuItemNotFound),
            6202 => Ok(ErrorCode::MenuItemInvalidPrice),

            // File Upload
            6501 => Ok(ErrorCode::FileTooLarge),
            6502 => Ok(ErrorCode::UnsupportedFileFormat),
            6503 => Ok(ErrorCode::InvalidImageFile),
            6504 => Ok(ErrorCode::NoFileProvided),
            6505 => Ok(ErrorCode::EmptyFile),
            6508 => Ok(ErrorCode::ImageProcessingFailed),
            6509 => Ok(ErrorCode::FileStorageFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::StorageUnavailable),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_code_to_u16() {
        let code: u16 = ErrorCode::Success.into();
        assert_eq!(code, 0);

        let code: u16 = ErrorCode::NotAuthenticated.into();
        assert_eq!(code, 1001);

        let code: u16 = ErrorCode::RestaurantNotFound.into();
        assert_eq!(code, 3101);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::NotFound).unwrap();
        assert_eq!(json, "3");

        let json = serde_json::to_string(&ErrorCode::CategoryHasItems).unwrap();
        assert_eq!(json, "6102");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("0").unwrap();
        assert_eq!(code, ErrorCode::Success);

        let code: ErrorCode = serde_json::from_str("5006").unwrap();
        assert_eq!(code, ErrorCode::PaymentAlreadyReviewed);

        let code: ErrorCode = serde_json::from_str("9003").unwrap();
        assert_eq!(code, ErrorCode::StorageUnavailable);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());

        let result: Result<ErrorCode, _> = serde_json::from_str("4001");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::NotFound), "3");
        assert_eq!(format!("{}", ErrorCode::SlugTaken), "3102");
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(
            ErrorCode::RestaurantNotFound.message(),
            "Restaurant not found"
        );
        assert_eq!(
            ErrorCode::CategoryHasItems.message(),
            "Category still has menu items"
        );
    }

    #[test]
    fn test_every_code_survives_u16_conversion() {
        let codes = [
            ErrorCode::RateLimited,
            ErrorCode::PasswordTooShort,
            ErrorCode::AdminRequired,
            ErrorCode::SlugInvalid,
            ErrorCode::SubscriptionExpired,
            ErrorCode::PaymentReferenceRequired,
            ErrorCode::MenuItemInvalidPrice,
            ErrorCode::FileStorageFailed,
            ErrorCode::ConfigError,
        ];

        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }
}

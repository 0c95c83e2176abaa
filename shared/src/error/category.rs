//! Error domains, derived from the thousands digit of the code

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Domain of an [`ErrorCode`]. 4xxx, 7xxx and 8xxx are unassigned and count
/// as `System`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    /// Accounts, restaurants, subscriptions
    Tenant,
    Payment,
    /// Categories, items, uploads
    Menu,
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Auth,
            2 => Self::Permission,
            3 => Self::Tenant,
            5 => Self::Payment,
            6 => Self::Menu,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

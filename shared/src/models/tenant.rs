//! Tenant (account) Model

use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantRole {
    /// Restaurant owner, uses the builder
    Owner,
    /// Platform administrator, uses the admin console
    Admin,
}

impl TenantRole {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
        }
    }
}

/// Account lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    /// Disabled by an administrator
    Suspended,
}

impl TenantStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }

    /// Can this tenant log in?
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Tenant row as listed in the admin console
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TenantSummary {
    pub id: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub created_at: i64,
    pub restaurant_name: Option<String>,
    pub slug: Option<String>,
    pub plan: Option<String>,
    pub subscription_status: Option<String>,
    pub expires_at: Option<i64>,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub restaurant_name: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login / registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub tenant_id: String,
    pub role: String,
}

/// Admin status change request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantStatusUpdate {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_db_roundtrip() {
        assert_eq!(TenantRole::from_db("owner"), Some(TenantRole::Owner));
        assert_eq!(TenantRole::from_db("admin"), Some(TenantRole::Admin));
        assert_eq!(TenantRole::from_db("root"), None);
        assert_eq!(TenantRole::Admin.as_db(), "admin");
    }

    #[test]
    fn test_status_can_login() {
        assert!(TenantStatus::Active.can_login());
        assert!(!TenantStatus::Suspended.can_login());
        assert_eq!(TenantStatus::from_db("banned"), None);
    }
}

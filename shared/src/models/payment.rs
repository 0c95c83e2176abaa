//! Payment Model

use serde::{Deserialize, Serialize};

/// How the owner paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    /// Third-party wallet transfer, needs a transaction reference
    Wallet,
}

impl PaymentMethod {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(Self::Cash),
            "wallet" => Some(Self::Wallet),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Wallet => "wallet",
        }
    }
}

/// Review state of a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Verified,
    Rejected,
}

impl PaymentStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

/// Payment entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: i64,
    pub tenant_id: String,
    pub method: String,
    pub plan: String,
    /// Amount in minor units
    pub amount: i64,
    pub reference: Option<String>,
    pub status: String,
    pub note: Option<String>,
    pub created_at: i64,
    pub reviewed_at: Option<i64>,
    /// Admin tenant id
    pub reviewed_by: Option<String>,
}

/// Submit payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSubmit {
    pub plan: String,
    pub method: String,
    pub reference: Option<String>,
}

/// Reject payment payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentReject {
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_db_roundtrip() {
        for m in [PaymentMethod::Cash, PaymentMethod::Wallet] {
            assert_eq!(PaymentMethod::from_db(m.as_db()), Some(m));
        }
        assert_eq!(PaymentMethod::from_db("card"), None);
    }

    #[test]
    fn test_status_db_roundtrip() {
        for s in [
            PaymentStatus::Pending,
            PaymentStatus::Verified,
            PaymentStatus::Rejected,
        ] {
            assert_eq!(PaymentStatus::from_db(s.as_db()), Some(s));
        }
    }
}

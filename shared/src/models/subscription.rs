//! Subscription Model

use serde::{Deserialize, Serialize};

use crate::util::DAY_MILLIS;

/// Billing plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Monthly,
    Yearly,
}

impl Plan {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn duration_days(&self) -> i64 {
        match self {
            Self::Monthly => 30,
            Self::Yearly => 365,
        }
    }

    pub fn duration_millis(&self) -> i64 {
        self.duration_days() * DAY_MILLIS
    }

    /// Price in minor units
    pub fn price(&self) -> i64 {
        match self {
            Self::Monthly => 1_000,
            Self::Yearly => 10_000,
        }
    }
}

/// Subscription lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Canceled,
}

impl SubscriptionStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "expired" => Some(Self::Expired),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Canceled => "canceled",
        }
    }
}

/// Subscription row (one per tenant)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Subscription {
    pub tenant_id: String,
    pub plan: String,
    pub status: String,
    pub started_at: i64,
    pub expires_at: i64,
    pub updated_at: i64,
}

impl Subscription {
    /// Active iff status is `active` and the expiry lies in the future.
    pub fn is_active_at(&self, now: i64) -> bool {
        SubscriptionStatus::from_db(&self.status) == Some(SubscriptionStatus::Active)
            && self.expires_at > now
    }

    /// Whole days left, rounded up, zero once expired.
    pub fn remaining_days_at(&self, now: i64) -> i64 {
        if self.expires_at <= now {
            return 0;
        }
        (self.expires_at - now + DAY_MILLIS - 1) / DAY_MILLIS
    }
}

/// Subscription state as shown to the owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionInfo {
    pub is_active: bool,
    pub plan: Option<String>,
    pub status: Option<String>,
    pub expires_at: Option<i64>,
    pub remaining_days: i64,
}

impl SubscriptionInfo {
    pub fn from_subscription(sub: Option<&Subscription>, now: i64) -> Self {
        match sub {
            Some(s) => Self {
                is_active: s.is_active_at(now),
                plan: Some(s.plan.clone()),
                status: Some(s.status.clone()),
                expires_at: Some(s.expires_at),
                remaining_days: s.remaining_days_at(now),
            },
            None => Self {
                is_active: false,
                plan: None,
                status: None,
                expires_at: None,
                remaining_days: 0,
            },
        }
    }
}

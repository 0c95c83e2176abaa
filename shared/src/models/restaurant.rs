//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant profile (one per tenant, `id` == owning tenant id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: String,
    /// Display name, free text chosen by the owner
    pub restaurant_name: String,
    /// Canonical public identifier, unique
    pub slug: String,
    pub logo_url: Option<String>,
    /// Theme code, see [`Theme`]
    pub theme: String,
    /// Currency code, see [`crate::format::Currency`]
    pub currency: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Update restaurant profile payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub restaurant_name: Option<String>,
    pub slug: Option<String>,
    pub logo_url: Option<String>,
    pub theme: Option<String>,
    pub currency: Option<String>,
}

/// Visual theme of the public menu page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Modern,
    Dark,
    Minimal,
}

impl Theme {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "classic" => Some(Self::Classic),
            "modern" => Some(Self::Modern),
            "dark" => Some(Self::Dark),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Modern => "modern",
            Self::Dark => "dark",
            Self::Minimal => "minimal",
        }
    }
}

pub const SLUG_MIN_LEN: usize = 2;
pub const SLUG_MAX_LEN: usize = 63;

/// Slug format: lowercase ASCII letters, digits and single inner hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    let len = slug.len();
    if !(SLUG_MIN_LEN..=SLUG_MAX_LEN).contains(&len) {
        return false;
    }
    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return false;
    }
    slug.bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Derive a slug from a restaurant name.
///
/// Runs of anything other than ASCII letters/digits collapse into one hyphen;
/// apostrophes are dropped so `"Joe's Pizza"` becomes `joes-pizza`.
/// Returns `None` when nothing usable is left.
pub fn slugify(name: &str) -> Option<String> {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch == '\'' || ch == '\u{2019}' {
            continue;
        }
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.len() > SLUG_MAX_LEN {
        slug.truncate(SLUG_MAX_LEN);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    is_valid_slug(&slug).then_some(slug)
}

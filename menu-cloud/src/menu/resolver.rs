//! Restaurant name matching
//!
//! Maps a human-typed path segment to a restaurant by name when no slug
//! matches. Tiers are tried in order and the first hit wins:
//!
//! 1. exact: normalized name == match key
//! 2. containment: name contains key, or key contains name
//! 3. token: key has spaces; any word of 3+ chars occurs in the name
//! 4. single tenant: exactly one restaurant exists
//!
//! Within a tier, "first" means first in the given slice.

use shared::models::{MatchTier, Restaurant};

/// Words shorter than this are ignored by the token tier.
const MIN_TOKEN_CHARS: usize = 3;

/// Hyphens to spaces, lowercase, trim.
pub fn normalize(input: &str) -> String {
    input.replace('-', " ").to_lowercase().trim().to_string()
}

/// Resolve `key` against `restaurants`. `key` is normalized here.
///
/// An empty match key skips the name tiers. Restaurants with an empty
/// normalized name never match by name.
pub fn resolve<'a>(key: &str, restaurants: &'a [Restaurant]) -> Option<(&'a Restaurant, MatchTier)> {
    let key = normalize(key);

    if !key.is_empty() {
        let named: Vec<(&Restaurant, String)> = restaurants
            .iter()
            .map(|r| (r, normalize(&r.restaurant_name)))
            .filter(|(_, name)| !name.is_empty())
            .collect();

        if let Some((r, _)) = named.iter().find(|(_, name)| *name == key) {
            return Some((r, MatchTier::Exact));
        }

        if let Some((r, _)) = named.iter().find(|(_, name)| contains_either(name, &key)) {
            return Some((r, MatchTier::Containment));
        }

        if key.contains(' ') {
            let words: Vec<&str> = key
                .split_whitespace()
                .filter(|w| w.chars().count() >= MIN_TOKEN_CHARS)
                .collect();
            if let Some((r, _)) = named
                .iter()
                .find(|(_, name)| words.iter().any(|w| name.contains(w)))
            {
                return Some((r, MatchTier::Token));
            }
        }
    }

    match restaurants {
        [only] => Some((only, MatchTier::SingleTenant)),
        _ => None,
    }
}

/// Containment tier alone, for re-matching against a reduced candidate set.
/// `match_key` must already be normalized.
pub fn containment_match<'a>(match_key: &str, candidates: &'a [Restaurant]) -> Option<&'a Restaurant> {
    if match_key.is_empty() {
        return None;
    }
    candidates.iter().find(|r| {
        let name = normalize(&r.restaurant_name);
        !name.is_empty() && contains_either(&name, match_key)
    })
}

fn contains_either(name: &str, key: &str) -> bool {
    name.contains(key) || key.contains(name)
}

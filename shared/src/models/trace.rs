//! Debug trace of a public menu lookup
//!
//! Ephemeral, never persisted. Records which storage query returned what and
//! whether the recovery search ran, so a wrong resolution can be diagnosed.

use serde::{Deserialize, Serialize};

use crate::util::now_millis;

/// Which rule picked the restaurant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Canonical slug column
    Slug,
    /// Normalized name equals the match key
    Exact,
    /// One of name / match key contains the other
    Containment,
    /// A word of the match key (3+ chars) occurs in the name
    Token,
    /// Only one restaurant exists
    SingleTenant,
}

/// Result of one storage query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    Rows { count: usize },
    Error { message: String },
}

/// One recorded query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    /// Storage operation name, e.g. `list_categories`
    pub query: String,
    pub restaurant_id: Option<String>,
    pub outcome: QueryOutcome,
    pub at: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugTrace {
    /// Raw path segment as requested
    pub search_key: String,
    /// Normalized key used by the name tiers
    pub match_key: String,
    pub resolved_by: Option<MatchTier>,
    pub restaurant_id: Option<String>,
    pub steps: Vec<TraceStep>,
    pub fallback_triggered: bool,
    /// Restaurant ids that own at least one item, as seen by the recovery scan
    pub fallback_candidates: Vec<String>,
    pub recovered_restaurant_id: Option<String>,
}

impl DebugTrace {
    pub fn new(search_key: impl Into<String>, match_key: impl Into<String>) -> Self {
        Self {
            search_key: search_key.into(),
            match_key: match_key.into(),
            ..Default::default()
        }
    }

    pub fn record_rows(&mut self, query: &str, restaurant_id: Option<&str>, count: usize) {
        self.push(query, restaurant_id, QueryOutcome::Rows { count });
    }

    pub fn record_error(&mut self, query: &str, restaurant_id: Option<&str>, message: String) {
        self.push(query, restaurant_id, QueryOutcome::Error { message });
    }

    pub fn has_errors(&self) -> bool {
        self.steps
            .iter()
            .any(|s| matches!(s.outcome, QueryOutcome::Error { .. }))
    }

    fn push(&mut self, query: &str, restaurant_id: Option<&str>, outcome: QueryOutcome) {
        self.steps.push(TraceStep {
            query: query.to_string(),
            restaurant_id: restaurant_id.map(str::to_string),
            outcome,
            at: now_millis(),
        });
    }
}

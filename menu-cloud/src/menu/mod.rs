//! Public menu resolution and assembly
//!
//! `GET /api/menu/{slug}` flow:
//!
//! ```text
//! key ──► slug lookup ──hit──► load ──► assemble
//!             │miss
//!             ▼ (legacy name matching only)
//!         name tiers ──► load ──empty──► recovery (once) ──► assemble
//! ```
//!
//! Storage errors end the flow with [`MenuError::Storage`]; they are never
//! treated as an empty menu.

pub mod assembly;
pub mod loader;
pub mod recovery;
pub mod resolver;
pub mod source;

use shared::models::{DebugTrace, MatchTier, Restaurant};
use thiserror::Error;

pub use loader::LoadedMenu;
pub use source::{MenuSource, QueryError, SqlMenuSource};

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("no restaurant matches the requested key")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] QueryError),
}

/// Resolved restaurant with its loaded rows
#[derive(Debug, Clone)]
pub struct PublicMenu {
    pub restaurant: Restaurant,
    pub menu: LoadedMenu,
}

/// Empty trace for a lookup of `key`
pub fn new_trace(key: &str) -> DebugTrace {
    DebugTrace::new(key, resolver::normalize(key))
}

pub struct MenuService<S> {
    source: S,
    legacy_name_matching: bool,
}

impl<S: MenuSource> MenuService<S> {
    pub fn new(source: S, legacy_name_matching: bool) -> Self {
        Self {
            source,
            legacy_name_matching,
        }
    }

    /// Resolve `key` and load its menu. Every query lands in `trace`.
    pub async fn public_menu(
        &self,
        key: &str,
        trace: &mut DebugTrace,
    ) -> Result<PublicMenu, MenuError> {
        let (restaurant, tier) = self.resolve(key, trace).await?;
        trace.resolved_by = Some(tier);
        trace.restaurant_id = Some(restaurant.id.clone());
        tracing::debug!(key, restaurant_id = %restaurant.id, ?tier, "Menu key resolved");

        let menu = loader::load(&self.source, &restaurant.id, trace).await?;

        // A slug hit is authoritative: an empty menu there is just empty
        if !menu.is_empty() || tier == MatchTier::Slug {
            return Ok(PublicMenu { restaurant, menu });
        }

        tracing::info!(
            key,
            restaurant_id = %restaurant.id,
            "Resolved restaurant has no menu data, running recovery search"
        );
        let match_key = trace.match_key.clone();
        match recovery::recover(&self.source, &match_key, trace).await? {
            Some((found, menu)) => {
                tracing::info!(
                    from = %restaurant.id,
                    to = %found.id,
                    "Recovery search re-resolved restaurant"
                );
                Ok(PublicMenu {
                    restaurant: found,
                    menu,
                })
            }
            None => Ok(PublicMenu { restaurant, menu }),
        }
    }

    async fn resolve(
        &self,
        key: &str,
        trace: &mut DebugTrace,
    ) -> Result<(Restaurant, MatchTier), MenuError> {
        let slug = key.trim().to_lowercase();
        if !slug.is_empty() {
            match self.source.get_restaurant_by_slug(&slug).await {
                Ok(found) => {
                    trace.record_rows("get_restaurant_by_slug", None, usize::from(found.is_some()));
                    if let Some(r) = found {
                        return Ok((r, MatchTier::Slug));
                    }
                }
                Err(e) => {
                    trace.record_error("get_restaurant_by_slug", None, e.message.clone());
                    return Err(e.into());
                }
            }
        }

        if !self.legacy_name_matching {
            return Err(MenuError::NotFound);
        }

        let restaurants = match self.source.list_restaurants().await {
            Ok(all) => {
                trace.record_rows("list_restaurants", None, all.len());
                all
            }
            Err(e) => {
                trace.record_error("list_restaurants", None, e.message.clone());
                return Err(e.into());
            }
        };

        resolver::resolve(key, &restaurants)
            .map(|(r, tier)| (r.clone(), tier))
            .ok_or(MenuError::NotFound)
    }
}

//! menu-cloud: multi-tenant restaurant digital menu service
//!
//! - Public menu pages resolved by slug (legacy name matching as fallback)
//! - Owner menu builder (categories, items, featured set, images)
//! - Manual subscription billing reviewed by platform admins

pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod menu;
pub mod state;
pub mod tasks;
pub mod util;

pub use config::Config;
pub use state::AppState;

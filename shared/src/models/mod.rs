//! Data models
//!
//! Shared between menu-cloud and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Tenant and restaurant ids are `String`; menu ids are snowflake `i64`.

pub mod category;
pub mod menu_item;
pub mod menu_view;
pub mod payment;
pub mod restaurant;
pub mod subscription;
pub mod tenant;
pub mod trace;

// Re-exports
pub use category::*;
pub use menu_item::*;
pub use menu_view::*;
pub use payment::*;
pub use restaurant::*;
pub use subscription::*;
pub use tenant::*;
pub use trace::*;

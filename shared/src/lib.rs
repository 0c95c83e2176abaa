//! Shared types for the menu platform
//!
//! Common types used by the menu service and its clients: data models,
//! the unified error system, price formatting and small utilities.

pub mod error;
pub mod format;
pub mod models;
pub mod util;

pub use format::{Currency, format_price, format_price_in};

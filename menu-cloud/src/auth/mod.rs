//! Authentication and access middleware

pub mod guards;
pub mod rate_limit;
pub mod tenant_auth;

pub use tenant_auth::TenantIdentity;

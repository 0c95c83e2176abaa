//! Tenant JWT authentication for the builder and admin APIs

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::models::TenantRole;

use crate::state::AppState;

/// JWT claims for tenant authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct TenantClaims {
    /// Tenant ID
    pub sub: String,
    /// Tenant email
    pub email: String,
    /// `owner` or `admin`
    pub role: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated tenant identity extracted from JWT
#[derive(Debug, Clone)]
pub struct TenantIdentity {
    pub tenant_id: String,
    pub email: String,
    pub role: TenantRole,
}

impl TenantIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == TenantRole::Admin
    }
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT token for a tenant
pub fn create_token(
    tenant_id: &str,
    email: &str,
    role: TenantRole,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = TenantClaims {
        sub: tenant_id.to_string(),
        email: email.to_string(),
        role: role.as_db().to_string(),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode and validate a token
pub fn decode_token(token: &str, secret: &str) -> Result<TenantIdentity, jsonwebtoken::errors::Error> {
    let data = jsonwebtoken::decode::<TenantClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    // Unknown roles never get admin rights
    let role = TenantRole::from_db(&data.claims.role).unwrap_or(TenantRole::Owner);
    Ok(TenantIdentity {
        tenant_id: data.claims.sub,
        email: data.claims.email,
        role,
    })
}

/// Middleware that extracts and verifies tenant JWT from Authorization header
pub async fn tenant_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| error_response(401, "Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| error_response(401, "Invalid Authorization format"))?;

    let identity = decode_token(token, &state.jwt_secret).map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        error_response(401, "Invalid or expired token")
    })?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

pub(crate) fn error_response(status: u16, message: &str) -> Response {
    let body = serde_json::json!({ "error": message });
    let status =
        http::StatusCode::from_u16(status).unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);
    (status, axum::Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip_keeps_role() {
        let token = create_token("t-1", "a@example.com", TenantRole::Admin, "secret").unwrap();
        let identity = decode_token(&token, "secret").unwrap();
        assert_eq!(identity.tenant_id, "t-1");
        assert_eq!(identity.email, "a@example.com");
        assert!(identity.is_admin());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("t-1", "a@example.com", TenantRole::Owner, "secret").unwrap();
        assert!(decode_token(&token, "other").is_err());
        assert!(decode_token("not.a.jwt", "secret").is_err());
    }
}

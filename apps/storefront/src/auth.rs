//! Session verification.
//!
//! Sessions are HS256 JWTs issued by the external auth provider and signed
//! with the shared `SESSION_SECRET`. The storefront never creates
//! credentials; it only checks the signature and expiry and reads the
//! subject.
//!
//! ```text
//! Authorization: Bearer <jwt>        ─┐
//!                                     ├─► JwtManager::validate ─► SessionUser
//! Cookie: session=<jwt>              ─┘                              │
//!                                                                    ▼
//!                                       profiles.role == admin ─► AdminUser
//! ```

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use dailydose_core::Profile;

use crate::error::ApiError;
use crate::AppState;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (auth user id, matches `profiles.id`)
    pub sub: String,

    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// JWT token manager.
pub struct JwtManager {
    secret: String,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: impl Into<String>) -> Self {
        JwtManager {
            secret: secret.into(),
        }
    }

    /// Signs a session token.
    ///
    /// Production tokens come from the auth provider; this exists for the
    /// seed tooling and tests.
    pub fn issue(&self, sub: &str, email: &str, lifetime: Duration) -> Result<String, ApiError> {
        let now = Utc::now();

        let claims = Claims {
            sub: sub.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate and decode a token.
    pub fn validate(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            debug!(error = %e, "Rejected session token");
            ApiError::unauthenticated()
        })?;

        Ok(token_data.claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extract the session token from a `Cookie` header value.
pub fn extract_session_cookie(cookie_header: &str) -> Option<&str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|v| !v.is_empty())
}

/// Bearer header first, then the session cookie.
fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_bearer_token);

    bearer.or_else(|| {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(extract_session_cookie)
    })
}

// =============================================================================
// Extractors
// =============================================================================

/// A request with a valid session.
///
/// Rejects with a redirect to the sign-in page.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    /// Token expiry (unix seconds); the session's cart lives no longer.
    pub expires_at: i64,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or_else(ApiError::unauthenticated)?;
        let claims = state.jwt.validate(token)?;

        Ok(SessionUser {
            id: claims.sub,
            email: claims.email,
            expires_at: claims.exp,
        })
    }
}

/// A request whose session belongs to an admin profile.
///
/// No session redirects to sign-in; a session without the admin role is
/// refused with 403.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Profile);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = SessionUser::from_request_parts(parts, state).await?;

        match state.db.profiles().get_by_id(&user.id).await? {
            Some(profile) if profile.is_admin() => Ok(AdminUser(profile)),
            _ => {
                warn!(user_id = %user.id, "Non-admin session on admin route");
                Err(ApiError::forbidden())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test-secret");

        let token = manager
            .issue("user-001", "ana@example.com", Duration::hours(1))
            .unwrap();
        let claims = manager.validate(&token).unwrap();

        assert_eq!(claims.sub, "user-001");
        assert_eq!(claims.email, "ana@example.com");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtManager::new("one")
            .issue("user-001", "ana@example.com", Duration::hours(1))
            .unwrap();

        assert!(JwtManager::new("two").validate(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = JwtManager::new("test-secret");
        let token = manager
            .issue("user-001", "ana@example.com", Duration::hours(-2))
            .unwrap();

        assert!(manager.validate(&token).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
    }

    #[test]
    fn test_extract_session_cookie() {
        assert_eq!(extract_session_cookie("theme=dark; session=tok"), Some("tok"));
        assert_eq!(extract_session_cookie("session=tok"), Some("tok"));
        assert_eq!(extract_session_cookie("sessionid=nope"), None);
        assert_eq!(extract_session_cookie("session="), None);
    }

    #[test]
    fn test_bearer_preferred_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session=from-cookie"));
        assert_eq!(session_token(&headers), Some("from-cookie"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(session_token(&headers), Some("from-header"));
    }
}

//! Access-token validation for sessions issued by the identity provider.
//!
//! The provider signs HS256 JWTs with a shared secret. The `sub` claim is the
//! user's UUID; `email` is present for OAuth sign-ins.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracareer_core::types::UserId;

/// JWT claims carried by every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id at the identity provider.
    pub sub: UserId,
    #[serde(default)]
    pub email: Option<String>,
    /// Provider role name, `"authenticated"` for signed-in users.
    #[serde(default = "default_role")]
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

fn default_role() -> String {
    "authenticated".to_string()
}

/// Identity provider configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret shared with the provider.
    pub jwt_secret: String,
    /// Base URL of the provider's auth API, without trailing slash.
    pub provider_url: String,
    /// Public URL of the web app; OAuth callbacks land on `{site_url}/auth/callback`.
    pub site_url: String,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var             | Required | Default                          |
    /// |---------------------|----------|----------------------------------|
    /// | `AUTH_JWT_SECRET`   | **yes**  | --                               |
    /// | `AUTH_PROVIDER_URL` | no       | `http://localhost:9999/auth/v1`  |
    /// | `SITE_URL`          | no       | `http://localhost:5173`          |
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("AUTH_JWT_SECRET")
            .expect("AUTH_JWT_SECRET must be set in the environment");
        assert!(!jwt_secret.is_empty(), "AUTH_JWT_SECRET must not be empty");

        let provider_url = std::env::var("AUTH_PROVIDER_URL")
            .unwrap_or_else(|_| "http://localhost:9999/auth/v1".into());
        let site_url =
            std::env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:5173".into());

        Self {
            jwt_secret,
            provider_url: provider_url.trim_end_matches('/').to_string(),
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Sign a token the way the provider does.
///
/// The server never mints sessions for real users; this exists for tooling
/// and integration tests.
pub fn issue_token(
    user_id: UserId,
    email: Option<&str>,
    ttl_mins: i64,
    config: &AuthConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        email: email.map(str::to_string),
        role: default_role(),
        exp: now + ttl_mins * 60,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(token: &str, config: &AuthConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    // Provider tokens carry an audience we do not pin.
    validation.validate_aud = false;
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

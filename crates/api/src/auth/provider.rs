//! Calls out to the external identity provider.
//!
//! Sign-in is a browser redirect to the provider's authorize endpoint;
//! sign-out revokes the session at the provider.

use crate::auth::jwt::AuthConfig;

/// Errors from talking to the identity provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Identity provider error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The configured provider URL could not be turned into a valid URL.
    #[error("Invalid provider URL: {0}")]
    Url(String),
}

/// URL of the provider's OAuth authorize endpoint for `provider`, returning to
/// `{site_url}/auth/callback` afterwards.
pub fn sign_in_url(config: &AuthConfig, provider: &str) -> Result<String, ProviderError> {
    let redirect_to = format!("{}/auth/callback", config.site_url);
    let url = reqwest::Url::parse_with_params(
        &format!("{}/authorize", config.provider_url),
        &[("provider", provider), ("redirect_to", redirect_to.as_str())],
    )
    .map_err(|e| ProviderError::Url(e.to_string()))?;
    Ok(url.to_string())
}

/// Revoke the session behind `access_token` at the provider.
pub async fn sign_out(
    client: &reqwest::Client,
    config: &AuthConfig,
    access_token: &str,
) -> Result<(), ProviderError> {
    let response = client
        .post(format!("{}/logout", config.provider_url))
        .bearer_auth(access_token)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(ProviderError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(())
}

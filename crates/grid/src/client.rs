//! HTTP access functions for the tracker API.
//!
//! Wraps the `/api/v1` endpoints using [`reqwest`]. Every call attaches the
//! bearer token from the shared [`SessionContext`] and unwraps the
//! `{ success, data, error }` envelope.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::json;
use tracareer_core::application::{Application, ApplicationPage, CreateApplication};
use tracareer_core::field::{ApplicationField, FieldValue};
use tracareer_core::response::ApiResponse;
use tracareer_core::tracker::{CreateTracker, Tracker};
use tracareer_core::types::DbId;

use crate::config::ClientConfig;
use crate::session::{SessionContext, SessionUser};

/// Errors from the access layer. `Display` is the text shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Could not reach the server: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with `success: false`.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The body was not the expected envelope.
    #[error("Unexpected response from the server: {0}")]
    Malformed(String),
}

/// HTTP client for one tracker API server.
#[derive(Clone)]
pub struct TrackerApi {
    client: reqwest::Client,
    api_url: String,
    session: Arc<SessionContext>,
}

impl TrackerApi {
    pub fn new(config: &ClientConfig, session: Arc<SessionContext>) -> Self {
        Self::with_client(reqwest::Client::new(), config, session)
    }

    /// Reuse an existing [`reqwest::Client`] (shares its connection pool).
    pub fn with_client(
        client: reqwest::Client,
        config: &ClientConfig,
        session: Arc<SessionContext>,
    ) -> Self {
        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    // ---- trackers ----

    /// `GET /trackers`
    pub async fn get_all_trackers(&self) -> Result<Vec<Tracker>, AccessError> {
        let request = self.client.get(self.url("/trackers"));
        self.send(request).await
    }

    /// `POST /trackers`
    pub async fn create_tracker(&self, input: &CreateTracker) -> Result<Tracker, AccessError> {
        let request = self.client.post(self.url("/trackers")).json(input);
        self.send(request).await
    }

    // ---- applications ----

    /// `GET /trackers/{tracker_id}/applications?page=&page_size=`
    pub async fn get_all_applications(
        &self,
        tracker_id: DbId,
        page: i64,
        page_size: i64,
    ) -> Result<ApplicationPage, AccessError> {
        let request = self
            .client
            .get(self.url(&format!("/trackers/{tracker_id}/applications")))
            .query(&[("page", page), ("page_size", page_size)]);
        self.send(request).await
    }

    /// `POST /trackers/{tracker_id}/applications`
    pub async fn create_application(
        &self,
        tracker_id: DbId,
        input: &CreateApplication,
    ) -> Result<Application, AccessError> {
        let request = self
            .client
            .post(self.url(&format!("/trackers/{tracker_id}/applications")))
            .json(input);
        self.send(request).await
    }

    /// `PATCH /trackers/{tracker_id}/applications/{id}` with `{ column, value }`.
    pub async fn update_application(
        &self,
        tracker_id: DbId,
        id: DbId,
        field: ApplicationField,
        value: &FieldValue,
    ) -> Result<(), AccessError> {
        let body = json!({ "column": field, "value": value.to_json() });
        let request = self
            .client
            .patch(self.url(&format!("/trackers/{tracker_id}/applications/{id}")))
            .json(&body);
        self.send_unit(request).await
    }

    // ---- auth ----

    /// `GET /auth/user`, recording the answer in the session.
    pub async fn refresh_session(&self) -> Result<Option<SessionUser>, AccessError> {
        let request = self.client.get(self.url("/auth/user"));
        let user: Option<SessionUser> = self.send_optional(request).await?.flatten();
        self.session.set_user(user.clone());
        Ok(user)
    }

    /// Browser URL that starts an OAuth sign-in with `provider`.
    pub fn sign_in_url(&self, provider: &str) -> Result<String, AccessError> {
        let url = reqwest::Url::parse_with_params(
            &self.url("/auth/sign-in"),
            &[("provider", provider)],
        )
        .map_err(|e| AccessError::Malformed(format!("sign-in URL: {e}")))?;
        Ok(url.to_string())
    }

    /// `POST /auth/sign-out`. The local session ends even if the server call fails.
    pub async fn sign_out(&self) -> Result<(), AccessError> {
        let request = self.client.post(self.url("/auth/sign-out"));
        let result = self.send_unit(request).await;
        self.session.invalidate();
        result
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.api_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send and require a payload.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AccessError> {
        self.send_optional(request)
            .await?
            .ok_or_else(|| AccessError::Malformed("missing data".to_string()))
    }

    /// Send where success carries no payload.
    async fn send_unit(&self, request: reqwest::RequestBuilder) -> Result<(), AccessError> {
        self.send_optional::<serde_json::Value>(request).await?;
        Ok(())
    }

    async fn send_optional<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Option<T>, AccessError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        parse_envelope(status.as_u16(), &body)
    }
}

/// Decode an envelope body, turning `success: false` into [`AccessError::Api`].
pub(crate) fn parse_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<Option<T>, AccessError> {
    let envelope: ApiResponse<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(err) if (200..300).contains(&status) => {
            return Err(AccessError::Malformed(err.to_string()))
        }
        // Non-envelope error pages (proxies, timeouts) keep their status.
        Err(_) => {
            return Err(AccessError::Api {
                status,
                message: format!("Request failed with status {status}"),
            })
        }
    };
    envelope
        .into_result()
        .map_err(|message| AccessError::Api { status, message })
}

//! REST client for the auth and text-processing backends.

use super::error::{ApiError, ApiErrorKind};
use super::models::{
    Credentials, ErrorBody, NewAccount, ProcessRequest, ProcessResponse, UserProfile,
};
use crate::config::AppConfig;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, info, instrument, warn};

const LOGIN_FAILED: &str = "Login failed";
const REGISTER_FAILED: &str = "Registration failed";
const PROCESS_FAILED: &str = "Failed to process text. Please try again.";

/// HTTP client for the backends.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    text_base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url`, sending text to `text_base_url`.
    pub fn new(
        base_url: impl Into<String>,
        text_base_url: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: trim_base(base_url.into()),
            text_base_url: trim_base(text_base_url.into()),
            client,
        })
    }

    /// Creates a client from the configured URLs.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(config.api_url().clone(), config.text_api_base())
    }

    /// Auth backend URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Text backend URL.
    pub fn text_base_url(&self) -> &str {
        &self.text_base_url
    }

    /// True when the auth backend answers at all.
    ///
    /// Any HTTP response counts as available; only a transport failure does not.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn check_server(&self) -> bool {
        match self.client.get(self.url("usuarios")).send().await {
            Ok(response) => {
                debug!(status = %response.status(), "Server answered");
                true
            }
            Err(e) => {
                warn!(error = %e, "Server unavailable");
                false
            }
        }
    }

    /// Signs in, returning the user's profile.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .post(self.url("login"))
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let profile: UserProfile = response.json().await?;
            info!(username = %profile.username(), "Logged in");
            return Ok(profile);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body.detail.unwrap_or_else(|| LOGIN_FAILED.to_string());
        warn!(status = %status, message = %message, "Login rejected");
        Err(ApiError::new(ApiErrorKind::Rejected(message)))
    }

    /// Validates and submits a registration.
    ///
    /// Invalid forms fail with [`ApiErrorKind::Validation`] without a request.
    #[instrument(skip(self, account), fields(username = %account.username()))]
    pub async fn register(&self, account: &NewAccount) -> Result<(), ApiError> {
        account.validate()?;

        let response = self
            .client
            .post(self.url("usuarios"))
            .json(account)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!("Account created");
            return Ok(());
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body.message.unwrap_or_else(|| REGISTER_FAILED.to_string());
        warn!(status = %status, message = %message, "Registration rejected");
        Err(ApiError::new(ApiErrorKind::Rejected(message)))
    }

    /// Sends text for processing, returning HTML with `<strong>` markup.
    ///
    /// Blank input fails with [`ApiErrorKind::EmptyText`] without a request.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub async fn process_text(&self, text: &str) -> Result<String, ApiError> {
        if text.trim().is_empty() {
            return Err(ApiError::new(ApiErrorKind::EmptyText));
        }

        let response = self
            .client
            .post(format!("{}/process", self.text_base_url))
            .json(&ProcessRequest { text })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: ProcessResponse = response.json().await?;
            debug!(len = body.text.len(), "Text processed");
            return Ok(body.text);
        }

        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body.error.unwrap_or_else(|| PROCESS_FAILED.to_string());
        warn!(status = %status, message = %message, "Processing failed");
        Err(ApiError::new(ApiErrorKind::Rejected(message)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

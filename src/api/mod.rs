//! API layer - HTTP resource clients
//!
//! This module wraps every remote call the client makes:
//! - `ApiClient`: the shared HTTP client (cookie store = server session)
//! - User endpoints (current user, login, logout, register)
//! - Post, age and dog image resource clients
//!
//! Resource clients resolve failures into a notice plus a sentinel value so
//! views only ever null-check, never handle transport errors.

pub mod ages;
pub mod dog_image;
pub mod posts;
pub mod responses;
pub mod users;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::config::ApiConfig;
use crate::services::Notifier;

pub use posts::{DeleteOutcome, SaveOutcome};
pub use responses::FieldError;
pub use users::{CurrentUser, RegisterReply};

/// Endpoint paths of the post API
pub mod paths {
    pub const CURRENT_USER: &str = "/api/users/me";
    pub const LOGIN: &str = "/login";
    pub const LOGOUT: &str = "/logout";
    pub const REGISTER: &str = "/api/users/register";
    pub const POSTS_ALL: &str = "/api/posts/all";
    pub const POSTS: &str = "/api/posts";
    pub const AGES_ALL: &str = "/api/ages/all";

    /// `/api/posts/{id}` (get, update and delete)
    pub fn post(id: i64) -> String {
        format!("{}/{}", POSTS, id)
    }
}

/// Error types for HTTP calls
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Build(reqwest::Error),

    /// Connection, timeout or other transport failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status the caller does not handle
    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// The body was not the expected JSON
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Build an error from a response the caller did not expect.
    ///
    /// The body text is kept for the log; it is never shown to the user.
    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ClientError::UnexpectedStatus { status, body }
    }
}

/// Shared HTTP client for the post API and the dog image API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    dog_image_url: String,
}

impl ApiClient {
    /// Create a client with a fresh cookie store
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout())
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            dog_image_url: config.dog_image_url.clone(),
        })
    }

    /// Absolute URL of an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn dog_image_url(&self) -> &str {
        &self.dog_image_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Send a request and log the outcome line
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        tracing::debug!(
            status = %response.status(),
            url = %response.url(),
            "api response"
        );
        Ok(response)
    }

    /// Decode a JSON body
    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Resource clients for posts, ages and dog images.
///
/// Every call reports its own failures through the notifier and hands back a
/// sentinel (`None` or a failure outcome) instead of an error.
#[derive(Clone)]
pub struct ResourceClient {
    api: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
}

impl ResourceClient {
    pub fn new(api: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }
}

//! Artsweep HTTP Client
//!
//! A small, type-safe HTTP client for the artifact repository service calls
//! the cleanup run needs: AQL search, copy, delete and upload.
//!
//! Every request is authenticated with the static API key header. Success is
//! judged per operation against the exact status the service reports for it
//! (200 for search and copy, 204 for delete, 201 for upload).
//!
//! # Example
//!
//! ```no_run
//! use artsweep_client::ArtifactoryClient;
//! use artsweep_core::domain::path_spec::ItemType;
//! use artsweep_core::domain::retention::RetentionPeriod;
//! use artsweep_core::query::AqlQuery;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ArtifactoryClient::new("https://art.example.com/artifactory", "api-key");
//!
//!     let query = AqlQuery::items(
//!         ItemType::Folder,
//!         "repo-a",
//!         &RetentionPeriod::from("30d"),
//!         "builds/app",
//!     );
//!     let found = client.search(&query).await?;
//!
//!     println!("Found {} candidate(s)", found.results.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod items;
mod search;

// Re-export commonly used types
pub use artsweep_core::dto::copy::CopyResponse;
pub use artsweep_core::dto::search::SearchResponse;
pub use error::{ClientError, Result};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "X-JFrog-Art-Api";

/// Characters escaped inside repository paths; `/` separates segments and is kept
///
/// `\` must stay escaped: URL parsing would otherwise turn it into `/` and
/// address a different item than the one that was checked. `;` would be read
/// as a matrix parameter by the service.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b';')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// HTTP client for the artifact repository service
#[derive(Clone)]
pub struct ArtifactoryClient {
    /// Base URL of the service (e.g., "https://art.example.com/artifactory")
    base_url: String,
    /// API key sent with every request
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl std::fmt::Debug for ArtifactoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactoryClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ArtifactoryClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service (e.g., "https://art.example.com/artifactory")
    /// * `api_key` - The API key used to authenticate
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of an item: `{base}/{repo}/{path}` with each segment escaped
    pub fn item_url(&self, repo: &str, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            encode_path(repo),
            encode_path(path.trim_start_matches('/'))
        )
    }

    /// Start an authenticated request
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status against `expected` and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        operation: &'static str,
        expected: StatusCode,
    ) -> Result<T> {
        let response = check_status(response, operation, expected).await?;

        response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse {} response: {}", operation, e))
        })
    }

    /// Check the status of a response whose body is not needed
    async fn handle_empty_response(
        &self,
        response: reqwest::Response,
        operation: &'static str,
        expected: StatusCode,
    ) -> Result<()> {
        check_status(response, operation, expected).await?;
        Ok(())
    }
}

async fn check_status(
    response: reqwest::Response,
    operation: &'static str,
    expected: StatusCode,
) -> Result<reqwest::Response> {
    let status = response.status();

    if status != expected {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::UnexpectedStatus {
            operation,
            expected: expected.as_u16(),
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH).to_string()
}

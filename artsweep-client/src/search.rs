//! Search API endpoint

use artsweep_core::dto::search::SearchResponse;
use artsweep_core::query::AqlQuery;
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::ArtifactoryClient;
use crate::error::Result;

impl ArtifactoryClient {
    /// Run an AQL search
    ///
    /// # Arguments
    /// * `query` - The query to submit
    ///
    /// # Returns
    /// The matching items
    pub async fn search(&self, query: &AqlQuery) -> Result<SearchResponse> {
        let url = format!("{}/api/search/aql", self.base_url);
        debug!("AQL: {}", query);

        let response = self
            .request(Method::POST, &url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(query.as_str().to_string())
            .send()
            .await?;

        self.handle_response(response, "search", StatusCode::OK)
            .await
    }
}

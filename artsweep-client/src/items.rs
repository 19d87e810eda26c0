//! Item API endpoints: copy, delete and upload

use artsweep_core::dto::copy::CopyResponse;
use reqwest::{Method, StatusCode};
use std::path::Path;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{ArtifactoryClient, encode_path};

impl ArtifactoryClient {
    /// Copy an item to the same path in another repository
    ///
    /// The service's own `dry` flag is set from `dry_run`, so the request is
    /// always sent and the service reports what it would do.
    ///
    /// # Arguments
    /// * `repo` - Source repository
    /// * `path` - Item path inside the source repository
    /// * `dest_repo` - Destination repository
    /// * `dry_run` - Ask the service to simulate the copy
    pub async fn copy(
        &self,
        repo: &str,
        path: &str,
        dest_repo: &str,
        dry_run: bool,
    ) -> Result<CopyResponse> {
        let path = path.trim_start_matches('/');
        let url = format!(
            "{}/api/copy/{}/{}",
            self.base_url,
            encode_path(repo),
            encode_path(path)
        );
        let to = format!("/{}/{}", dest_repo, path);
        let dry = if dry_run { "1" } else { "0" };
        debug!("POST {}?to={}&dry={}", url, to, dry);

        let response = self
            .request(Method::POST, &url)
            .query(&[("to", to.as_str()), ("dry", dry)])
            .send()
            .await?;

        self.handle_response(response, "copy", StatusCode::OK).await
    }

    /// Delete an item
    ///
    /// The service answers a successful delete with 204 No Content; any other
    /// status is an error.
    pub async fn delete(&self, repo: &str, path: &str) -> Result<()> {
        let url = self.item_url(repo, path);
        debug!("DELETE {}", url);

        let response = self.request(Method::DELETE, &url).send().await?;

        self.handle_empty_response(response, "delete", StatusCode::NO_CONTENT)
            .await
    }

    /// Upload bytes to `{repo}/{path}/{file_name}`
    pub async fn upload(
        &self,
        repo: &str,
        path: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<()> {
        let target = format!("{}/{}", path.trim_end_matches('/'), file_name);
        let url = self.item_url(repo, &target);
        debug!("PUT {} ({} bytes)", url, content.len());

        let response = self
            .request(Method::PUT, &url)
            .body(content)
            .send()
            .await?;

        self.handle_empty_response(response, "upload", StatusCode::CREATED)
            .await
    }

    /// Upload a local file under its own file name
    pub async fn upload_file(&self, repo: &str, path: &str, file: &Path) -> Result<()> {
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ClientError::Io {
                path: file.display().to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path has no usable file name",
                ),
            })?;

        let content = tokio::fs::read(file).await.map_err(|source| ClientError::Io {
            path: file.display().to_string(),
            source,
        })?;

        self.upload(repo, path, file_name, content).await
    }
}

//! Artifact repository
//!
//! Search, copy, delete and upload against the remote service.

use anyhow::{Context, Result};
use artsweep_client::{ArtifactoryClient, CopyResponse};
use artsweep_core::domain::candidate::Candidate;
use artsweep_core::query::AqlQuery;
use async_trait::async_trait;
use std::path::Path;

/// Repository trait for the remote artifact operations
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    /// Runs a search and returns the matching items
    async fn search(&self, query: &AqlQuery) -> Result<Vec<Candidate>>;

    /// Copies `repo/path` to the same path in `dest_repo`
    ///
    /// # Arguments
    /// * `dry_run` - Forwarded as the service's own dry-run flag
    async fn copy(
        &self,
        repo: &str,
        path: &str,
        dest_repo: &str,
        dry_run: bool,
    ) -> Result<CopyResponse>;

    /// Deletes `repo/path`
    async fn delete(&self, repo: &str, path: &str) -> Result<()>;

    /// Uploads a local file to `repo/path/<file name>`
    async fn upload_file(&self, repo: &str, path: &str, file: &Path) -> Result<()>;
}

/// HTTP implementation of ArtifactRepository
pub struct HttpArtifactRepository {
    client: ArtifactoryClient,
}

impl HttpArtifactRepository {
    /// Creates a new HTTP artifact repository
    pub fn new(client: ArtifactoryClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArtifactRepository for HttpArtifactRepository {
    async fn search(&self, query: &AqlQuery) -> Result<Vec<Candidate>> {
        let response = self
            .client
            .search(query)
            .await
            .with_context(|| format!("Failed to retrieve delete list for query {}", query))?;

        Ok(response.results)
    }

    async fn copy(
        &self,
        repo: &str,
        path: &str,
        dest_repo: &str,
        dry_run: bool,
    ) -> Result<CopyResponse> {
        self.client
            .copy(repo, path, dest_repo, dry_run)
            .await
            .with_context(|| format!("Failed to copy {}/{} to {}", repo, path, dest_repo))
    }

    async fn delete(&self, repo: &str, path: &str) -> Result<()> {
        self.client
            .delete(repo, path)
            .await
            .with_context(|| format!("Failed to delete {}/{}", repo, path))
    }

    async fn upload_file(&self, repo: &str, path: &str, file: &Path) -> Result<()> {
        self.client
            .upload_file(repo, path, file)
            .await
            .with_context(|| format!("Failed to upload {} to {}/{}", file.display(), repo, path))
    }
}

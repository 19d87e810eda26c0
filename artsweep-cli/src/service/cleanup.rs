//! Cleanup service
//!
//! Drives one cleanup run. For every configured (repository, path) unit:
//! - guard the configured path against the skip list
//! - search for items older than the retention period
//! - guard every candidate against the skip list
//! - copy each candidate to the recycle repository, then delete it
//!
//! Any failure ends the run. Nothing after the failing call is attempted, so
//! a candidate is never deleted unless its recycle copy succeeded.

use anyhow::Result;
use artsweep_core::config::{RepoRetention, SweepConfig};
use artsweep_core::domain::candidate::Candidate;
use artsweep_core::domain::path_spec::PathSpecifier;
use artsweep_core::query::AqlQuery;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::repository::ArtifactRepository;
use crate::service::context::RunContext;

/// Folder in the recycle repository that receives run logs
pub const RUN_LOG_PATH: &str = "runlogs";

/// Outcome of one (repository, path) unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitReport {
    pub candidates: usize,
    pub copied: usize,
    pub deleted: usize,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub units: usize,
    pub candidates: usize,
    pub copied: usize,
    pub deleted: usize,
}

impl RunSummary {
    fn record(&mut self, report: UnitReport) {
        self.units += 1;
        self.candidates += report.candidates;
        self.copied += report.copied;
        self.deleted += report.deleted;
    }
}

/// Cleanup run controller
pub struct CleanupService {
    repository: Arc<dyn ArtifactRepository>,
    context: RunContext,
}

impl CleanupService {
    /// Creates a new cleanup service
    pub fn new(repository: Arc<dyn ArtifactRepository>, context: RunContext) -> Self {
        Self {
            repository,
            context,
        }
    }

    /// Cleans every configured unit in order, stopping at the first error
    pub async fn run(&self, config: &SweepConfig) -> Result<RunSummary> {
        info!("----Starting----");
        info!("Running in ------{}------", self.context.mode);

        let mut summary = RunSummary::default();

        for (repo, retention, spec) in config.units() {
            debug!(
                "Repo: {} + Retention: {} + Path: {}",
                repo, retention.retention, spec
            );
            let report = self.clean_unit(repo, retention, spec).await?;
            summary.record(report);
        }

        info!(
            "Cleaned {} unit(s): {} candidate(s), {} copied, {} deleted",
            summary.units, summary.candidates, summary.copied, summary.deleted
        );
        info!("------Done------");

        Ok(summary)
    }

    /// Cleans one (repository, path) unit
    pub async fn clean_unit(
        &self,
        repo: &str,
        retention: &RepoRetention,
        spec: &PathSpecifier,
    ) -> Result<UnitReport> {
        self.log_banner(repo, retention, spec);

        self.validate_path(spec.path())?;

        info!("[Get-Delete-List] Getting list of folder/files to be deleted...");
        let query = AqlQuery::for_unit(repo, retention, spec);
        let candidates = match self.repository.search(&query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("[Get-Delete-List] Failed to retrieve list: {:#}", e);
                return Err(e);
            }
        };

        if candidates.is_empty() {
            warn!("[Get-Delete-List] >>>> No folder/file path(s) found for removal <<<<");
            return Ok(UnitReport::default());
        }

        // The whole batch is checked before the first mutating call.
        for candidate in &candidates {
            self.validate_path(&candidate.artifact_path())?;
        }

        let mut report = UnitReport {
            candidates: candidates.len(),
            ..UnitReport::default()
        };

        for (index, candidate) in candidates.iter().enumerate() {
            self.move_candidate(index + 1, candidate, &mut report)
                .await?;
        }

        info!(
            "[Get-Delete-List] >>>> Processed {} path(s) successfully <<<<",
            report.candidates
        );

        Ok(report)
    }

    /// Uploads the run log to the recycle repository
    pub async fn upload_run_log(&self, log_file: &Path) -> Result<()> {
        info!("Uploading logs... {}", log_file.display());

        if let Err(e) = self
            .repository
            .upload_file(&self.context.recycle, RUN_LOG_PATH, log_file)
            .await
        {
            error!("Failed to upload file: {:#}", e);
            return Err(e);
        }

        info!("File uploaded...");
        Ok(())
    }

    fn log_banner(&self, repo: &str, retention: &RepoRetention, spec: &PathSpecifier) {
        info!("==============================================");
        info!("Cleaning Artifactory");
        info!("==============================================");
        info!("Source Repo: {}", repo);
        info!("Source Path: {}", spec.path());
        info!("Recycle Repo: {}", self.context.recycle);
        info!("Search Type: {}", spec.item_type());
        info!("Retention Period: {}", retention.retention);
        info!("Delete From Source: {}", self.context.delete);
        if let Some(cutoff) = retention
            .retention
            .cutoff_date(chrono::Local::now().date_naive())
        {
            info!("Delete Artifacts Before/On: {}", cutoff);
        }
        info!("==============================================");
    }

    /// Path guard: a skip-listed path ends the run
    fn validate_path(&self, path: &str) -> Result<()> {
        if let Err(violation) = self.context.skip_list.check(path) {
            error!(
                "[Validate-Path] {} - skip_list: {:?}",
                violation,
                self.context.skip_list.iter().collect::<Vec<_>>()
            );
            return Err(violation.into());
        }

        debug!("[Validate-Path] Valid path: '{}' not in skip_list", path);
        Ok(())
    }

    /// Mover: copy to the recycle repository, then delete from the source
    async fn move_candidate(
        &self,
        index: usize,
        candidate: &Candidate,
        report: &mut UnitReport,
    ) -> Result<()> {
        let path = candidate.artifact_path();
        info!("|-- Processing-File-{} {}/{}", index, candidate.repo, path);

        self.copy_to_recycle(&candidate.repo, &path).await?;
        report.copied += 1;

        if self.context.delete && self.delete_from_source(&candidate.repo, &path).await? {
            report.deleted += 1;
        }

        Ok(())
    }

    async fn copy_to_recycle(&self, repo: &str, path: &str) -> Result<()> {
        let dry_run = self.context.mode.is_dry_run();
        info!(
            "|   |-- Copy-To-Recycle {}/{} -> {}/{} (dry={})",
            repo,
            path,
            self.context.recycle,
            path,
            u8::from(dry_run)
        );

        let response = match self
            .repository
            .copy(repo, path, &self.context.recycle, dry_run)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("|   |-- Copy-To-Recycle Error: {:#}", e);
                return Err(e);
            }
        };

        if let Some(message) = response.summary() {
            info!("|   |-- Copy-To-Recycle {}", message);
        }
        info!("|   |-- Copy-To-Recycle Done");

        Ok(())
    }

    /// Returns whether a delete was actually sent
    async fn delete_from_source(&self, repo: &str, path: &str) -> Result<bool> {
        info!("|   |-- Delete-Artifact {}/{}", repo, path);

        if self.context.mode.is_dry_run() {
            info!("|   |-- Delete-Artifact DRY RUN Done");
            return Ok(false);
        }

        if let Err(e) = self.repository.delete(repo, path).await {
            error!("|   |-- Delete-Artifact Error: {:#}", e);
            return Err(e);
        }

        info!("|   |-- Delete-Artifact Done");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::HttpArtifactRepository;
    use crate::service::context::RunMode;
    use artsweep_client::{ArtifactoryClient, CopyResponse};
    use artsweep_core::domain::skip_list::SkipListViolation;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Search(String),
        Copy {
            repo: String,
            path: String,
            dest: String,
            dry_run: bool,
        },
        Delete {
            repo: String,
            path: String,
        },
        Upload {
            repo: String,
            path: String,
            file: PathBuf,
        },
    }

    /// Records every call and answers searches from a queue
    #[derive(Default)]
    struct FakeRepository {
        results: Mutex<VecDeque<Vec<Candidate>>>,
        calls: Mutex<Vec<Call>>,
        fail_search: bool,
        fail_copy_of: Option<String>,
        fail_delete_of: Option<String>,
    }

    impl FakeRepository {
        fn with_results(results: Vec<Vec<Candidate>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl ArtifactRepository for FakeRepository {
        async fn search(&self, query: &AqlQuery) -> Result<Vec<Candidate>> {
            self.record(Call::Search(query.to_string()));
            if self.fail_search {
                anyhow::bail!("search failed with status 500");
            }
            Ok(self.results.lock().unwrap().pop_front().unwrap_or_default())
        }

        async fn copy(
            &self,
            repo: &str,
            path: &str,
            dest_repo: &str,
            dry_run: bool,
        ) -> Result<CopyResponse> {
            self.record(Call::Copy {
                repo: repo.to_string(),
                path: path.to_string(),
                dest: dest_repo.to_string(),
                dry_run,
            });
            if self.fail_copy_of.as_deref() == Some(path) {
                anyhow::bail!("copy failed with status 409");
            }
            Ok(CopyResponse::default())
        }

        async fn delete(&self, repo: &str, path: &str) -> Result<()> {
            self.record(Call::Delete {
                repo: repo.to_string(),
                path: path.to_string(),
            });
            if self.fail_delete_of.as_deref() == Some(path) {
                anyhow::bail!("delete failed with status 403");
            }
            Ok(())
        }

        async fn upload_file(&self, repo: &str, path: &str, file: &Path) -> Result<()> {
            self.record(Call::Upload {
                repo: repo.to_string(),
                path: path.to_string(),
                file: file.to_path_buf(),
            });
            Ok(())
        }
    }

    fn folder(repo: &str, path: &str, name: &str) -> Candidate {
        Candidate {
            repo: repo.to_string(),
            path: path.to_string(),
            name: name.to_string(),
            modified: None,
            item_type: None,
        }
    }

    fn config(yaml: &str) -> SweepConfig {
        SweepConfig::from_yaml(yaml).unwrap()
    }

    const ONE_UNIT: &str = r#"
recycle: recycle-repo
skip_list: []
repos:
  repo-a:
    retention: 30d
    paths:
      - builds/app
"#;

    fn copy(path: &str, dry_run: bool) -> Call {
        Call::Copy {
            repo: "repo-a".to_string(),
            path: path.to_string(),
            dest: "recycle-repo".to_string(),
            dry_run,
        }
    }

    fn delete(path: &str) -> Call {
        Call::Delete {
            repo: "repo-a".to_string(),
            path: path.to_string(),
        }
    }

    fn service(fake: &Arc<FakeRepository>, config: &SweepConfig, mode: RunMode) -> CleanupService {
        CleanupService::new(fake.clone(), RunContext::new(mode, config))
    }

    #[tokio::test]
    async fn test_copies_then_deletes_each_candidate() {
        let config = config(ONE_UNIT);
        let fake = Arc::new(FakeRepository::with_results(vec![vec![folder(
            "repo-a",
            "builds/app",
            "20200101-1",
        )]]));

        let summary = service(&fake, &config, RunMode::Production)
            .run(&config)
            .await
            .unwrap();

        assert_eq!(
            fake.calls(),
            vec![
                Call::Search(
                    r#"items.find({"type":"folder","repo":"repo-a","modified":{"$before":"30d"},"path":"builds/app"})"#
                        .to_string()
                ),
                copy("builds/app/20200101-1", false),
                delete("builds/app/20200101-1"),
            ]
        );
        assert_eq!(
            summary,
            RunSummary {
                units: 1,
                candidates: 1,
                copied: 1,
                deleted: 1
            }
        );
    }

    #[tokio::test]
    async fn test_file_marker_searches_files_under_stripped_path() {
        let config = config(
            "recycle: recycle-repo\nrepos:\n  repo-a:\n    retention: 30d\n    paths: ['builds/app|file']\n",
        );
        let fake = Arc::new(FakeRepository::default());

        service(&fake, &config, RunMode::Production)
            .run(&config)
            .await
            .unwrap();

        assert_eq!(
            fake.calls(),
            vec![Call::Search(
                r#"items.find({"type":"file","repo":"repo-a","modified":{"$before":"30d"},"path":"builds/app"})"#
                    .to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_skip_listed_candidate_halts_before_any_mutation() {
        let config = config(
            r#"
recycle: recycle-repo
skip_list: ["builds/app/20200101-1"]
repos:
  repo-a:
    retention: 30d
    paths: [builds/app]
"#,
        );
        // The protected candidate comes last; nothing before it may be touched either.
        let fake = Arc::new(FakeRepository::with_results(vec![vec![
            folder("repo-a", "builds/app", "20191201-1"),
            folder("repo-a", "builds/app", "20200101-1"),
        ]]));

        let err = service(&fake, &config, RunMode::Production)
            .run(&config)
            .await
            .unwrap_err();

        let violation = err.downcast_ref::<SkipListViolation>().unwrap();
        assert_eq!(violation.path, "builds/app/20200101-1");
        assert_eq!(fake.calls().len(), 1);
        assert!(matches!(fake.calls()[0], Call::Search(_)));
    }

    #[tokio::test]
    async fn test_skip_listed_configured_path_halts_before_search() {
        let config = config(
            "recycle: r\nskip_list: [builds]\nrepos:\n  repo-a:\n    retention: 30d\n    paths: [builds]\n",
        );
        let fake = Arc::new(FakeRepository::default());

        let err = service(&fake, &config, RunMode::Production)
            .run(&config)
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<SkipListViolation>().is_some());
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_copies_with_flag_and_never_deletes() {
        let config = config(ONE_UNIT);
        let fake = Arc::new(FakeRepository::with_results(vec![vec![folder(
            "repo-a",
            "builds/app",
            "20200101-1",
        )]]));

        let summary = service(&fake, &config, RunMode::DryRun)
            .run(&config)
            .await
            .unwrap();

        let calls = fake.calls();
        assert_eq!(calls[1..], [copy("builds/app/20200101-1", true)]);
        assert!(!calls.iter().any(|c| matches!(c, Call::Delete { .. })));
        assert_eq!(summary.copied, 1);
        assert_eq!(summary.deleted, 0);
    }

    #[tokio::test]
    async fn test_empty_search_moves_on_to_next_unit() {
        let config = config(
            r#"
recycle: recycle-repo
repos:
  repo-a:
    retention: 30d
    paths: [builds/empty, builds/app]
"#,
        );
        let fake = Arc::new(FakeRepository::with_results(vec![
            vec![],
            vec![folder("repo-a", "builds/app", "1")],
        ]));

        let summary = service(&fake, &config, RunMode::Production)
            .run(&config)
            .await
            .unwrap();

        assert_eq!(summary.units, 2);
        assert_eq!(summary.candidates, 1);
        assert_eq!(fake.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_copy_prevents_delete_and_stops_run() {
        let config = config(ONE_UNIT);
        let fake = Arc::new(FakeRepository {
            results: Mutex::new(
                vec![vec![
                    folder("repo-a", "builds/app", "1"),
                    folder("repo-a", "builds/app", "2"),
                ]]
                .into(),
            ),
            fail_copy_of: Some("builds/app/1".to_string()),
            ..FakeRepository::default()
        });

        let result = service(&fake, &config, RunMode::Production)
            .run(&config)
            .await;

        assert!(result.is_err());
        let calls = fake.calls();
        assert_eq!(calls.last(), Some(&copy("builds/app/1", false)));
        assert!(!calls.iter().any(|c| matches!(c, Call::Delete { .. })));
    }

    #[tokio::test]
    async fn test_failed_delete_stops_run() {
        let config = config(ONE_UNIT);
        let fake = Arc::new(FakeRepository {
            results: Mutex::new(
                vec![vec![
                    folder("repo-a", "builds/app", "1"),
                    folder("repo-a", "builds/app", "2"),
                ]]
                .into(),
            ),
            fail_delete_of: Some("builds/app/1".to_string()),
            ..FakeRepository::default()
        });

        let result = service(&fake, &config, RunMode::Production)
            .run(&config)
            .await;

        assert!(result.is_err());
        assert_eq!(fake.calls().last(), Some(&delete("builds/app/1")));
    }

    #[tokio::test]
    async fn test_failed_search_stops_run() {
        let config = config(
            "recycle: r\nrepos:\n  repo-a:\n    retention: 30d\n    paths: [a]\n  repo-b:\n    retention: 30d\n    paths: [b]\n",
        );
        let fake = Arc::new(FakeRepository {
            fail_search: true,
            ..FakeRepository::default()
        });

        let result = service(&fake, &config, RunMode::Production)
            .run(&config)
            .await;

        assert!(result.is_err());
        assert_eq!(fake.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_copy_only_leaves_sources() {
        let config = config(ONE_UNIT);
        let fake = Arc::new(FakeRepository::with_results(vec![vec![folder(
            "repo-a",
            "builds/app",
            "1",
        )]]));
        let context = RunContext::new(RunMode::Production, &config).copy_only();

        let summary = CleanupService::new(fake.clone(), context)
            .run(&config)
            .await
            .unwrap();

        assert_eq!(fake.calls()[1..], [copy("builds/app/1", false)]);
        assert_eq!(summary.copied, 1);
        assert_eq!(summary.deleted, 0);
    }

    #[tokio::test]
    async fn test_run_log_goes_to_recycle_runlogs() {
        let config = config(ONE_UNIT);
        let fake = Arc::new(FakeRepository::default());

        service(&fake, &config, RunMode::DryRun)
            .upload_run_log(Path::new("/tmp/cleanup_2020-01-01_00-00-00.log"))
            .await
            .unwrap();

        assert_eq!(
            fake.calls(),
            vec![Call::Upload {
                repo: "recycle-repo".to_string(),
                path: "runlogs".to_string(),
                file: PathBuf::from("/tmp/cleanup_2020-01-01_00-00-00.log"),
            }]
        );
    }

    #[tokio::test]
    async fn test_end_to_end_over_http() {
        use serde_json::json;
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/search/aql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"repo": "repo-a", "path": "builds/app", "name": "20200101-1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/copy/repo-a/builds/app/20200101-1"))
            .and(query_param("to", "/recycle-repo/builds/app/20200101-1"))
            .and(query_param("dry", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "messages": [{"level": "INFO", "message": "copy completed"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/repo-a/builds/app/20200101-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let config = config(ONE_UNIT);
        let repository = Arc::new(HttpArtifactRepository::new(ArtifactoryClient::new(
            server.uri(),
            "secret",
        )));
        let summary = CleanupService::new(repository, RunContext::new(RunMode::Production, &config))
            .run(&config)
            .await
            .unwrap();
        assert_eq!(summary.deleted, 1);

        let order: Vec<String> = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect();
        assert_eq!(
            order,
            vec![
                "POST /api/search/aql",
                "POST /api/copy/repo-a/builds/app/20200101-1",
                "DELETE /repo-a/builds/app/20200101-1",
            ]
        );
    }
}

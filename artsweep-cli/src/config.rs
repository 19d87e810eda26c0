//! Configuration module
//!
//! Process-level settings: where the service lives, how to authenticate and
//! where the cleanup plan and run logs are. The cleanup plan itself is the
//! YAML file loaded by `artsweep_core::config`.

use anyhow::{Context, Result};
use artsweep_client::ArtifactoryClient;
use artsweep_core::config::SweepConfig;
use std::path::PathBuf;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "ART_API";

/// CLI configuration
#[derive(Clone)]
pub struct Config {
    /// Service base URL given on the command line; overrides the config file
    pub host: Option<String>,

    /// API key for the service
    pub api_key: Option<String>,

    /// Accept invalid TLS certificates
    pub insecure: bool,

    /// Path of the YAML cleanup plan
    pub config_file: PathBuf,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("insecure", &self.insecure)
            .field("config_file", &self.config_file)
            .finish()
    }
}

impl Config {
    /// Loads the cleanup plan named by `config_file`
    pub fn load_sweep_config(&self) -> Result<SweepConfig> {
        SweepConfig::load(&self.config_file).with_context(|| {
            format!(
                "Failed to load cleanup config {}",
                self.config_file.display()
            )
        })
    }

    /// Service base URL: command line first, then the config file
    pub fn resolve_host(&self, sweep: &SweepConfig) -> Result<String> {
        let host = self
            .host
            .clone()
            .or_else(|| sweep.host.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("No service host configured: pass --host or set 'host' in the config file")
            })?;

        if !host.starts_with("http://") && !host.starts_with("https://") {
            anyhow::bail!("host must start with http:// or https://");
        }

        Ok(host)
    }

    /// The API key; running without one is a startup error
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => anyhow::bail!(
                "Missing environment variable '{}'. Please set the variable and rerun.",
                API_KEY_ENV
            ),
        }
    }

    /// Builds the service client for `host`
    pub fn client(&self, host: &str) -> Result<ArtifactoryClient> {
        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.insecure)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(ArtifactoryClient::with_client(
            host,
            self.require_api_key()?,
            http_client,
        ))
    }
}

//! Cleanup candidate domain type

use serde::{Deserialize, Serialize};

use crate::domain::path_spec::ItemType;

/// One artifact returned by a retention search
///
/// Candidates live only while their (repository, path) batch is processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub repo: String,
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, rename = "type")]
    pub item_type: Option<ItemType>,
}

impl Candidate {
    /// Path of the artifact inside its repository
    ///
    /// Items at the repository root are reported with a path of `.`.
    pub fn artifact_path(&self) -> String {
        match self.path.trim_matches('/') {
            "" | "." => self.name.clone(),
            parent => format!("{}/{}", parent, self.name),
        }
    }
}

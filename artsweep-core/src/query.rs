//! Typed AQL query builder
//!
//! Builds the `items.find(...)` query that selects artifacts of one type in
//! one repository path whose last modification is older than the retention
//! period. Criteria are serialized with `serde_json`, so repository or path
//! names containing quotes or backslashes cannot change the query's shape.

use serde::Serialize;
use std::fmt;

use crate::config::RepoRetention;
use crate::domain::path_spec::{ItemType, PathSpecifier};
use crate::domain::retention::RetentionPeriod;

#[derive(Serialize)]
struct ItemCriteria<'a> {
    #[serde(rename = "type")]
    item_type: ItemType,
    repo: &'a str,
    modified: Before<'a>,
    path: &'a str,
}

#[derive(Serialize)]
struct Before<'a> {
    #[serde(rename = "$before")]
    before: &'a str,
}

/// A rendered AQL query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AqlQuery {
    text: String,
}

impl AqlQuery {
    /// Items of `item_type` in `repo` under `path`, modified before `retention`
    pub fn items(
        item_type: ItemType,
        repo: &str,
        retention: &RetentionPeriod,
        path: &str,
    ) -> Self {
        let criteria = ItemCriteria {
            item_type,
            repo,
            modified: Before {
                before: retention.as_str(),
            },
            path,
        };
        // Serializing plain structs of strings cannot fail.
        let criteria = serde_json::to_string(&criteria).unwrap_or_default();

        Self {
            text: format!("items.find({})", criteria),
        }
    }

    /// Query for one configured (repository, path) unit
    pub fn for_unit(repo: &str, retention: &RepoRetention, spec: &PathSpecifier) -> Self {
        Self::items(spec.item_type(), repo, &retention.retention, spec.path())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for AqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

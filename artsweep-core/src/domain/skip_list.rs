//! Skip list domain type
//!
//! Paths on the skip list must never be copied or deleted. A match is a
//! safety violation that ends the run, never a reason to skip and continue.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// A path matched the skip list
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("path '{path}' is not allowed to be deleted: it matches the skip list")]
pub struct SkipListViolation {
    pub path: String,
}

/// Set of paths that can never be acted upon
///
/// Matching is literal string equality. A listed parent directory does not
/// protect the paths below it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkipList(BTreeSet<String>);

impl SkipList {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    /// Reject `path` if it is on the skip list
    pub fn check(&self, path: &str) -> Result<(), SkipListViolation> {
        if self.contains(path) {
            return Err(SkipListViolation {
                path: path.to_string(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

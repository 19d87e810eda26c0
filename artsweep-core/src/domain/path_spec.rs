//! Path specifier domain types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the searched path and its type marker
pub const MARKER_DELIMITER: char = '|';

/// Kind of item a cleanup search targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    File,
    Folder,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::File => "file",
            ItemType::Folder => "folder",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while parsing a path specifier
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathSpecError {
    #[error("path specifier is empty")]
    Empty,

    #[error("path specifier '{spec}' has an empty path before '|'")]
    EmptyPath { spec: String },
}

/// A configured cleanup path, optionally suffixed with a `file` marker
///
/// `builds/app|file` searches files under `builds/app`. Anything else,
/// including a specifier with some other `|` suffix, searches folders under
/// the specifier exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSpecifier {
    raw: String,
    path: String,
    item_type: ItemType,
}

impl PathSpecifier {
    /// Parse a specifier from its configured text form
    pub fn parse(raw: &str) -> Result<Self, PathSpecError> {
        if raw.trim().is_empty() {
            return Err(PathSpecError::Empty);
        }

        let (path, item_type) = match raw.split_once(MARKER_DELIMITER) {
            Some((path, marker)) if marker.trim().eq_ignore_ascii_case("file") => {
                if path.is_empty() {
                    return Err(PathSpecError::EmptyPath {
                        spec: raw.to_string(),
                    });
                }
                (path, ItemType::File)
            }
            _ => (raw, ItemType::Folder),
        };

        Ok(Self {
            raw: raw.to_string(),
            path: path.to_string(),
            item_type,
        })
    }

    /// The path value searched in the repository
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The item type the search filters on
    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// The specifier exactly as configured
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for PathSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PathSpecifier {
    type Err = PathSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PathSpecifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for PathSpecifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

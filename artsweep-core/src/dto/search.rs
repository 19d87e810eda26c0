//! Search DTOs

use serde::{Deserialize, Serialize};

use crate::domain::candidate::Candidate;

/// Response to an AQL search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Candidate>,
    #[serde(default)]
    pub range: Option<SearchRange>,
}

/// Paging information attached to a search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRange {
    pub start_pos: u64,
    pub end_pos: u64,
    pub total: u64,
}

//! Copy DTOs

use serde::{Deserialize, Serialize};

/// Response to a copy request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CopyResponse {
    #[serde(default)]
    pub messages: Vec<CopyMessage>,
}

impl CopyResponse {
    /// First message reported by the service, if any
    pub fn summary(&self) -> Option<&str> {
        self.messages.first().map(|m| m.message.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyMessage {
    pub level: String,
    pub message: String,
}

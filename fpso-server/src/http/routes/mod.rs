//! Route handlers organized by resource

pub mod health;
pub mod vessels;
pub mod equipment;

use serde::Serialize;

/// Acknowledgement body for inserts: `{"Message": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    #[serde(rename = "Message")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

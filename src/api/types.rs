//! API request and response types

use crate::actions::Tracker;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Action call sent by the dialogue engine
#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: Tracker,
    #[allow(dead_code)] // Sent by the engine, no action reads it
    #[serde(default)]
    pub domain: Option<Value>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Error body, in the shape the dialogue engine expects
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            action_name: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ActionInfo {
    pub name: String,
}

//! Common types for completion requests

use serde::Serialize;
use serde_json::Value;

/// One completion request: fixed system policy plus the caller's prompt
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Named JSON schema handed to the schema-constrained mode
#[derive(Debug, Clone, Serialize)]
pub struct JsonSchema {
    pub name: String,
    pub schema: Value,
    pub strict: bool,
}

/// Text payload extracted from a response envelope
#[derive(Debug, Clone, Default)]
pub struct Completion {
    /// `None` when the envelope carried no text at all
    pub text: Option<String>,
    pub usage: Usage,
}

impl Completion {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            usage: Usage::default(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The text if present and not blank
    pub fn non_blank_text(self) -> Option<String> {
        self.text.filter(|t| !t.trim().is_empty())
    }
}

/// Usage statistics
#[derive(Debug, Clone, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

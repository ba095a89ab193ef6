//! Completion backend abstraction
//!
//! The backend exposes two calling conventions: a schema-constrained mode
//! and a free-form JSON-object mode. Both hand back raw text; parsing and
//! shape checks belong to the generation client.

mod error;
mod openai;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use openai::OpenAIService;
pub(crate) use openai::{send_error, status_error};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for completion backends
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Schema-constrained completion. The schema is passed verbatim.
    async fn complete_with_schema(
        &self,
        request: &CompletionRequest,
        schema: &JsonSchema,
    ) -> Result<Completion, LlmError>;

    /// Free-form completion restricted to a single JSON object
    async fn complete_json_object(&self, request: &CompletionRequest)
        -> Result<Completion, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for completion services
pub struct LoggingService {
    inner: Arc<dyn CompletionService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn CompletionService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }

    fn log(
        &self,
        mode: &'static str,
        started: std::time::Instant,
        result: &Result<Completion, LlmError>,
    ) {
        let duration = started.elapsed();
        match result {
            Ok(completion) => {
                tracing::info!(
                    model = %self.model_id,
                    mode,
                    duration_ms = %duration.as_millis(),
                    input_tokens = completion.usage.input_tokens,
                    output_tokens = completion.usage.output_tokens,
                    has_text = completion.text.is_some(),
                    "Completion request finished"
                );
            }
            Err(e) => {
                tracing::warn!(
                    model = %self.model_id,
                    mode,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "Completion request failed"
                );
            }
        }
    }
}

#[async_trait]
impl CompletionService for LoggingService {
    async fn complete_with_schema(
        &self,
        request: &CompletionRequest,
        schema: &JsonSchema,
    ) -> Result<Completion, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete_with_schema(request, schema).await;
        self.log("json_schema", start, &result);
        result
    }

    async fn complete_json_object(
        &self,
        request: &CompletionRequest,
    ) -> Result<Completion, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete_json_object(request).await;
        self.log("json_object", start, &result);
        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

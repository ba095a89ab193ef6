//! Mock implementations for testing
//!
//! These mocks enable testing without real I/O.

use crate::llm::{Completion, CompletionRequest, CompletionService, JsonSchema, LlmError};
use crate::tts::{SpeechClip, SpeechSynthesizer, TtsError};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A complete recipe document that satisfies the card schema
pub fn sample_recipe() -> Value {
    json!({
        "recipe": {
            "name": "Omelette",
            "servings": 2,
            "times": {"total_min": 10, "prep_min": 3, "cook_min": 7},
            "ingredients": [
                {
                    "name": "oeufs",
                    "quantity": 4,
                    "unit": null,
                    "critical": true,
                    "alternative": null
                },
                {
                    "name": "ciboulette",
                    "quantity": null,
                    "unit": null,
                    "critical": false,
                    "alternative": "persil"
                }
            ],
            "steps": [
                {"index": 1, "instruction": "Battre les oeufs", "timer_min": null},
                {"index": 2, "instruction": "Cuire", "timer_min": 5}
            ]
        }
    })
}

// ============================================================================
// Mock Completion Service
// ============================================================================

/// Completion service that returns queued results per calling convention
pub struct MockCompletionService {
    schema_results: Mutex<VecDeque<Result<Completion, LlmError>>>,
    json_object_results: Mutex<VecDeque<Result<Completion, LlmError>>>,
    /// Every request, with the schema for schema-mode calls
    requests: Mutex<Vec<(CompletionRequest, Option<JsonSchema>)>>,
}

impl MockCompletionService {
    pub fn new() -> Self {
        Self {
            schema_results: Mutex::new(VecDeque::new()),
            json_object_results: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_schema(&self, result: Result<Completion, LlmError>) {
        self.schema_results.lock().unwrap().push_back(result);
    }

    pub fn queue_json_object(&self, result: Result<Completion, LlmError>) {
        self.json_object_results.lock().unwrap().push_back(result);
    }

    pub fn schema_calls(&self) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, schema)| schema.is_some())
            .count()
    }

    pub fn json_object_calls(&self) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, schema)| schema.is_none())
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn recorded_schema_requests(&self) -> Vec<(CompletionRequest, Option<JsonSchema>)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, schema)| schema.is_some())
            .cloned()
            .collect()
    }
}

impl Default for MockCompletionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionService for MockCompletionService {
    async fn complete_with_schema(
        &self,
        request: &CompletionRequest,
        schema: &JsonSchema,
    ) -> Result<Completion, LlmError> {
        self.requests
            .lock()
            .unwrap()
            .push((request.clone(), Some(schema.clone())));
        self.schema_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    async fn complete_json_object(
        &self,
        request: &CompletionRequest,
    ) -> Result<Completion, LlmError> {
        self.requests.lock().unwrap().push((request.clone(), None));
        self.json_object_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}

// ============================================================================
// Mock Speech Synthesizer
// ============================================================================

/// Speech synthesizer that returns queued clips and records its inputs
pub struct MockSpeechSynthesizer {
    results: Mutex<VecDeque<Result<SpeechClip, TtsError>>>,
    pub texts: Mutex<Vec<String>>,
}

impl MockSpeechSynthesizer {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            texts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a clip for `text` stored at `file_path`
    pub fn queue_clip(&self, text: &str, file_path: &str) {
        self.results.lock().unwrap().push_back(Ok(SpeechClip {
            text: text.to_string(),
            mime_type: "audio/wav".to_string(),
            audio_base64: "UklGRg==".to_string(),
            file_path: file_path.to_string(),
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
        }));
    }

    pub fn queue_error(&self, error: TtsError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

impl Default for MockSpeechSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<SpeechClip, TtsError> {
        self.texts.lock().unwrap().push(text.to_string());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TtsError::EmptyAudio))
    }
}

//! `OpenAI` provider implementation
//!
//! Schema-constrained mode goes through `v1/responses` with a `json_schema`
//! text format. JSON-object mode goes through `v1/chat/completions` with
//! `response_format = json_object`. The two envelopes differ, so each has
//! its own normalizer.

use super::types::{Completion, CompletionRequest, JsonSchema, Usage};
use super::{CompletionService, LlmError};
use crate::config::OpenAiConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// OpenAI-compatible service implementation
pub struct OpenAIService {
    client: Client,
    api_key: String,
    base_url: String,
    model_id: String,
}

impl OpenAIService {
    pub fn new(config: &OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model_id: config.model.clone(),
        }
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// POST a JSON body and return the raw success body
    async fn post_json<B: Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<String, LlmError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| send_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        Ok(body)
    }

    fn translate_to_responses_request(
        request: &CompletionRequest,
        schema: &JsonSchema,
    ) -> ResponsesApiRequest {
        ResponsesApiRequest {
            model: request.model.clone(),
            input: vec![
                InputMessage::new("system", &request.system),
                InputMessage::new("user", &request.prompt),
            ],
            text: ResponsesTextConfig {
                format: ResponsesFormat {
                    r#type: "json_schema",
                    name: schema.name.clone(),
                    schema: schema.schema.clone(),
                    strict: schema.strict,
                },
            },
            temperature: request.temperature,
        }
    }

    fn translate_to_chat_request(request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: request.model.clone(),
            messages: vec![
                InputMessage::new("system", &request.system),
                InputMessage::new("user", &request.prompt),
            ],
            response_format: ChatResponseFormat {
                r#type: "json_object",
            },
            temperature: request.temperature,
        }
    }

    /// Concatenate every `output_text` part of every message output
    pub(crate) fn normalize_responses_api_response(resp: ResponsesApiResponse) -> Completion {
        let text: String = resp
            .output
            .into_iter()
            .filter(|output| output.r#type == "message")
            .flat_map(|output| output.content.unwrap_or_default())
            .filter(|item| item.r#type == "output_text")
            .filter_map(|item| item.text)
            .collect();

        Completion {
            text: if text.is_empty() { None } else { Some(text) },
            usage: resp
                .usage
                .map(|u| Usage {
                    input_tokens: u64::from(u.input_tokens),
                    output_tokens: u64::from(u.output_tokens),
                })
                .unwrap_or_default(),
        }
    }

    pub(crate) fn normalize_chat_response(resp: ChatResponse) -> Result<Completion, LlmError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::unknown("No choices in response"))?;

        Ok(Completion {
            text: choice.message.content,
            usage: resp
                .usage
                .map(|u| Usage {
                    input_tokens: u64::from(u.prompt_tokens),
                    output_tokens: u64::from(u.completion_tokens),
                })
                .unwrap_or_default(),
        })
    }
}

#[async_trait]
impl CompletionService for OpenAIService {
    async fn complete_with_schema(
        &self,
        request: &CompletionRequest,
        schema: &JsonSchema,
    ) -> Result<Completion, LlmError> {
        let body = Self::translate_to_responses_request(request, schema);
        let raw = self.post_json(&self.responses_url(), &body).await?;

        let response: ResponsesApiResponse = serde_json::from_str(&raw)
            .map_err(|e| LlmError::unknown(format!("Malformed responses envelope: {e}")))?;

        Ok(Self::normalize_responses_api_response(response))
    }

    async fn complete_json_object(
        &self,
        request: &CompletionRequest,
    ) -> Result<Completion, LlmError> {
        let body = Self::translate_to_chat_request(request);
        let raw = self.post_json(&self.chat_url(), &body).await?;

        let response: ChatResponse = serde_json::from_str(&raw)
            .map_err(|e| LlmError::unknown(format!("Malformed chat envelope: {e}")))?;

        Self::normalize_chat_response(response)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Classify a transport-level failure
pub(crate) fn send_error(e: &reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::network(format!("Request timeout: {e}"))
    } else if e.is_connect() {
        LlmError::network(format!("Connection failed: {e}"))
    } else {
        LlmError::unknown(format!("Request failed: {e}"))
    }
}

/// Map a non-success status, preferring the provider's own message
pub(crate) fn status_error(status: u16, body: &str) -> LlmError {
    match serde_json::from_str::<OpenAIErrorResponse>(body) {
        Ok(error_resp) => LlmError::from_status(status, &error_resp.error.message),
        Err(_) => LlmError::from_status(status, "unreadable error body"),
    }
}

// Shared request types

#[derive(Debug, Serialize)]
struct InputMessage {
    role: &'static str,
    content: String,
}

impl InputMessage {
    fn new(role: &'static str, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}

// Responses API types (schema-constrained mode)

#[derive(Debug, Serialize)]
struct ResponsesApiRequest {
    model: String,
    input: Vec<InputMessage>,
    text: ResponsesTextConfig,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ResponsesTextConfig {
    format: ResponsesFormat,
}

#[derive(Debug, Serialize)]
struct ResponsesFormat {
    r#type: &'static str,
    name: String,
    schema: serde_json::Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsesApiResponse {
    output: Vec<ResponsesApiOutput>,
    #[serde(default)]
    usage: Option<ResponsesApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiOutput {
    r#type: String,
    #[serde(default)]
    content: Option<Vec<ResponsesApiContent>>,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiContent {
    r#type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiUsage {
    input_tokens: u32,
    output_tokens: u32,
}

// Chat completions types (JSON-object mode)

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<InputMessage>,
    response_format: ChatResponseFormat,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(clippy::struct_field_names)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

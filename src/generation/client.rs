//! Two-tier structured generation client
//!
//! Tier 1 is the schema-constrained mode; any failure there (unsupported
//! mode, transport, malformed envelope, no text) falls through to Tier 2,
//! the JSON-object mode, exactly once. Tier 2 output only gets the minimal
//! shape check in [`GeneratedRecipe::from_value`].

use super::{GeneratedRecipe, GenerationError};
use crate::config::OpenAiConfig;
use crate::llm::{CompletionRequest, CompletionService, JsonSchema, LlmError};
use serde_json::Value;
use std::sync::Arc;

/// Generation policy sent as the system message of every call
pub const SYSTEM_INSTRUCTION: &str = "Tu es un assistant de cuisine. \
Tu dois produire une sortie JSON STRICTE conforme au schéma. \
Ne mets jamais de texte hors JSON. \
Si une alternative n'existe pas, mets alternative=null. \
Si un ingrédient est critique, mets alternative=null.";

const TEMPERATURE: f32 = 0.2;

/// Which calling convention produced (or failed to produce) text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Schema,
    JsonObject,
}

impl Tier {
    fn label(self) -> &'static str {
        match self {
            Tier::Schema => "json_schema",
            Tier::JsonObject => "json_object",
        }
    }
}

/// Result of one tier adapter, independent of envelope shape
#[derive(Debug)]
pub enum TierOutcome {
    Tier1Response(String),
    Tier2Response(String),
    TierFailure(TierFailure),
}

#[derive(Debug)]
pub enum TierFailure {
    /// The call succeeded but carried no usable text
    Empty(Tier),
    Backend(Tier, LlmError),
}

impl TierOutcome {
    pub fn into_text(self) -> Result<String, TierFailure> {
        match self {
            TierOutcome::Tier1Response(text) | TierOutcome::Tier2Response(text) => Ok(text),
            TierOutcome::TierFailure(failure) => Err(failure),
        }
    }
}

impl From<TierFailure> for GenerationError {
    fn from(failure: TierFailure) -> Self {
        match failure {
            TierFailure::Empty(_) => GenerationError::EmptyResponse,
            TierFailure::Backend(_, error) => GenerationError::Transport(error),
        }
    }
}

/// Per-call settings, fixed at construction
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
}

impl GenerationSettings {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: TEMPERATURE,
        }
    }
}

impl From<&OpenAiConfig> for GenerationSettings {
    fn from(config: &OpenAiConfig) -> Self {
        Self::new(config.model.clone())
    }
}

pub struct StructuredGenerationClient {
    service: Arc<dyn CompletionService>,
    settings: GenerationSettings,
}

impl StructuredGenerationClient {
    pub fn new(service: Arc<dyn CompletionService>, settings: GenerationSettings) -> Self {
        Self { service, settings }
    }

    /// Generate a schema-shaped recipe document for `prompt`
    pub async fn generate(
        &self,
        prompt: &str,
        schema: &JsonSchema,
    ) -> Result<GeneratedRecipe, GenerationError> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt: prompt.to_string(),
            temperature: self.settings.temperature,
        };

        let text = match self.schema_tier(&request, schema).await.into_text() {
            Ok(text) => text,
            Err(failure) => {
                log_tier_failure(&failure);
                self.json_object_tier(&request).await.into_text()?
            }
        };

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| GenerationError::invalid_json(&text, &e))?;

        let recipe = GeneratedRecipe::from_value(value)?;
        warn_on_policy_violations(&recipe);
        Ok(recipe)
    }

    async fn schema_tier(&self, request: &CompletionRequest, schema: &JsonSchema) -> TierOutcome {
        match self.service.complete_with_schema(request, schema).await {
            Ok(completion) => match completion.non_blank_text() {
                Some(text) => TierOutcome::Tier1Response(text),
                None => TierOutcome::TierFailure(TierFailure::Empty(Tier::Schema)),
            },
            Err(e) => TierOutcome::TierFailure(TierFailure::Backend(Tier::Schema, e)),
        }
    }

    async fn json_object_tier(&self, request: &CompletionRequest) -> TierOutcome {
        match self.service.complete_json_object(request).await {
            Ok(completion) => match completion.non_blank_text() {
                Some(text) => TierOutcome::Tier2Response(text),
                None => TierOutcome::TierFailure(TierFailure::Empty(Tier::JsonObject)),
            },
            Err(e) => TierOutcome::TierFailure(TierFailure::Backend(Tier::JsonObject, e)),
        }
    }
}

fn log_tier_failure(failure: &TierFailure) {
    match failure {
        TierFailure::Empty(tier) => {
            tracing::warn!(tier = tier.label(), "No text from schema mode, falling back");
        }
        TierFailure::Backend(tier, e) => {
            tracing::warn!(
                tier = tier.label(),
                error = %e.message,
                kind = ?e.kind,
                "Schema mode failed, falling back"
            );
        }
    }
}

/// The "critical => no alternative" rule is requested, not enforced
fn warn_on_policy_violations(recipe: &GeneratedRecipe) {
    match recipe.card() {
        Ok(card) => {
            let offenders: Vec<&str> = card
                .critical_alternatives()
                .iter()
                .map(|i| i.name.as_str())
                .collect();
            if !offenders.is_empty() {
                tracing::warn!(?offenders, "Critical ingredients returned with alternatives");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Recipe does not match the card schema");
        }
    }
}

//! Recipe generation actions

use super::{Action, Dispatcher, Tracker};
use crate::config::ConfigError;
use crate::generation::{
    ingredients_prompt, name_prompt, recipe_schema, GenerationError, StructuredGenerationClient,
};
use crate::llm::JsonSchema;
use crate::slots::SlotEvent;
use async_trait::async_trait;
use std::sync::Arc;

pub const ASK_RECIPE_NAME: &str =
    "Quelle recette veux-tu ? (ex: 'pâtes carbonara', 'gratin dauphinois')";

type GeneratorHandle = Result<Arc<StructuredGenerationClient>, ConfigError>;

/// Shared generate-and-utter path for both recipe actions
struct RecipeGenerator {
    client: GeneratorHandle,
    schema: JsonSchema,
}

impl RecipeGenerator {
    fn new(client: GeneratorHandle) -> Self {
        Self {
            client,
            schema: recipe_schema(),
        }
    }

    /// On success the recipe goes out twice: as compact JSON text and as
    /// the structured payload. On failure only the user message goes out.
    async fn generate_and_utter(
        &self,
        action: &str,
        prompt: &str,
        dispatcher: &mut Dispatcher,
    ) {
        let result = match &self.client {
            Ok(client) => client.generate(prompt, &self.schema).await,
            Err(e) => Err(GenerationError::from(e.clone())),
        };

        match result {
            Ok(recipe) => {
                let value = recipe.to_value();
                dispatcher.utter_json(Some(value.to_string()), value);
            }
            Err(e) => {
                tracing::warn!(action, kind = ?e.kind(), error = %e, "Recipe generation failed");
                dispatcher.utter_text(e.user_message());
            }
        }
    }
}

pub struct GenerateRecipeFromIngredientsAction {
    generator: RecipeGenerator,
}

impl GenerateRecipeFromIngredientsAction {
    pub fn new(client: GeneratorHandle) -> Self {
        Self {
            generator: RecipeGenerator::new(client),
        }
    }
}

#[async_trait]
impl Action for GenerateRecipeFromIngredientsAction {
    fn name(&self) -> &str {
        "action_generate_recipe_from_ingredients"
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Vec<SlotEvent> {
        let prompt = ingredients_prompt(&tracker.slots);
        self.generator
            .generate_and_utter(self.name(), &prompt, dispatcher)
            .await;
        vec![]
    }
}

pub struct GenerateRecipeFromNameAction {
    generator: RecipeGenerator,
}

impl GenerateRecipeFromNameAction {
    pub fn new(client: GeneratorHandle) -> Self {
        Self {
            generator: RecipeGenerator::new(client),
        }
    }
}

#[async_trait]
impl Action for GenerateRecipeFromNameAction {
    fn name(&self) -> &str {
        "action_generate_recipe_from_name"
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Vec<SlotEvent> {
        let Some(prompt) = name_prompt(&tracker.slots) else {
            dispatcher.utter_text(ASK_RECIPE_NAME);
            return vec![];
        };
        self.generator
            .generate_and_utter(self.name(), &prompt, dispatcher)
            .await;
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationSettings;
    use crate::llm::{Completion, LlmError};
    use crate::slots::SlotBag;
    use crate::testing::{sample_recipe, MockCompletionService};
    use serde_json::json;

    fn handle(mock: &Arc<MockCompletionService>) -> GeneratorHandle {
        Ok(Arc::new(StructuredGenerationClient::new(
            mock.clone(),
            GenerationSettings::new("test-model"),
        )))
    }

    fn tracker(slots: serde_json::Value) -> Tracker {
        Tracker {
            slots: SlotBag::from(slots),
            ..Tracker::default()
        }
    }

    #[tokio::test]
    async fn test_ingredients_success_utters_text_and_payload() {
        let mock = Arc::new(MockCompletionService::new());
        mock.queue_schema(Ok(Completion::text(sample_recipe().to_string())));
        let action = GenerateRecipeFromIngredientsAction::new(handle(&mock));

        let mut dispatcher = Dispatcher::new();
        let slots = tracker(json!({"liste_ingredients": ["oeufs", "ciboulette"]}));
        let events = action.run(&slots, &mut dispatcher).await;

        assert!(events.is_empty());
        let messages = dispatcher.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].json_message, Some(sample_recipe()));
        let text: serde_json::Value =
            serde_json::from_str(messages[0].text.as_deref().unwrap()).unwrap();
        assert_eq!(text, sample_recipe());

        let (request, _) = mock.recorded_schema_requests().remove(0);
        assert!(request.prompt.contains("Ingrédients disponibles: oeufs, ciboulette"));
    }

    #[tokio::test]
    async fn test_name_missing_asks_without_backend_call() {
        let mock = Arc::new(MockCompletionService::new());
        let action = GenerateRecipeFromNameAction::new(handle(&mock));

        let mut dispatcher = Dispatcher::new();
        action
            .run(&tracker(json!({"nom_recette": "  "})), &mut dispatcher)
            .await;

        assert_eq!(
            dispatcher.messages()[0].text.as_deref(),
            Some(ASK_RECIPE_NAME)
        );
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_numeric_name_still_generates() {
        let mock = Arc::new(MockCompletionService::new());
        mock.queue_schema(Ok(Completion::text(sample_recipe().to_string())));
        let action = GenerateRecipeFromNameAction::new(handle(&mock));

        let mut dispatcher = Dispatcher::new();
        action
            .run(&tracker(json!({"nom_recette": 42})), &mut dispatcher)
            .await;

        assert_eq!(mock.total_calls(), 1);
        assert_eq!(dispatcher.messages()[0].json_message, Some(sample_recipe()));
        let (request, _) = mock.recorded_schema_requests().remove(0);
        assert!(request.prompt.contains("Nom de la recette: 42\n"));
    }

    #[tokio::test]
    async fn test_missing_credential_reports_remediation() {
        let action = GenerateRecipeFromNameAction::new(Err(ConfigError::MissingCredential));

        let mut dispatcher = Dispatcher::new();
        let slots = tracker(json!({"nom_recette": "gratin dauphinois"}));
        action.run(&slots, &mut dispatcher).await;

        let text = dispatcher.messages()[0].text.clone().unwrap();
        assert!(text.starts_with("OPENAI_API_KEY n'est pas défini"));
        assert!(dispatcher.messages()[0].json_message.is_none());
    }

    #[tokio::test]
    async fn test_backend_failure_is_a_message_not_an_error() {
        let mock = Arc::new(MockCompletionService::new());
        mock.queue_schema(Err(LlmError::network("down")));
        mock.queue_json_object(Err(LlmError::network("refused")));
        let action = GenerateRecipeFromNameAction::new(handle(&mock));

        let mut dispatcher = Dispatcher::new();
        let events = action
            .run(&tracker(json!({"nom_recette": "carbonara"})), &mut dispatcher)
            .await;

        assert!(events.is_empty());
        let spoken = dispatcher.messages()[0].text.clone().unwrap();
        assert_eq!(
            spoken,
            "Je n'arrive pas à joindre le service de recettes. Réessaie dans un instant."
        );
        assert!(!spoken.contains("refused"));
    }
}

//! Custom actions invoked by the dialogue engine
//!
//! Actions are stateless singletons. Everything a turn needs arrives in the
//! [`Tracker`]; everything it produces leaves through the [`Dispatcher`]
//! (bot messages) and the returned [`SlotEvent`]s.

mod misc;
mod recipe;
mod speech;
mod steps;

pub use misc::{HelloWorldAction, UiRefreshPronouncePhraseAction};
pub use recipe::{GenerateRecipeFromIngredientsAction, GenerateRecipeFromNameAction};
pub use speech::TextToSpeechAction;
pub use steps::ReadRecipeStepAction;

use crate::config::{ConfigError, TtsSettings};
use crate::generation::StructuredGenerationClient;
use crate::slots::{SlotBag, SlotEvent};
use crate::tts::SpeechSynthesizer;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Conversation snapshot sent with every action call.
///
/// Deserialization is lenient: missing slots read as empty and a missing
/// latest message reads as none.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub slots: SlotBag,
    #[serde(default)]
    pub latest_message: Option<LatestMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub intent: Option<IntentRef>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntentRef {
    #[serde(default)]
    pub name: Option<String>,
}

impl Tracker {
    /// Name of the intent recognized for the latest user message
    pub fn latest_intent(&self) -> Option<&str> {
        self.latest_message
            .as_ref()?
            .intent
            .as_ref()?
            .name
            .as_deref()
    }

    /// Raw text of the latest user message
    pub fn latest_text(&self) -> Option<&str> {
        self.latest_message.as_ref()?.text.as_deref()
    }
}

/// Outgoing bot message.
///
/// `json_message` travels under the dialogue engine's `custom` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotMessage {
    pub text: Option<String>,
    #[serde(rename = "custom")]
    pub json_message: Option<Value>,
}

/// Collects the messages an action utters during one run
#[derive(Debug, Default)]
pub struct Dispatcher {
    messages: Vec<BotMessage>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utter_text(&mut self, text: impl Into<String>) {
        self.messages.push(BotMessage {
            text: Some(text.into()),
            json_message: None,
        });
    }

    pub fn utter_json(&mut self, text: Option<String>, json_message: Value) {
        self.messages.push(BotMessage {
            text,
            json_message: Some(json_message),
        });
    }

    pub fn messages(&self) -> &[BotMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<BotMessage> {
        self.messages
    }
}

/// A custom action the dialogue engine can call by name
#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &str;

    /// Run one turn. Failures are reported to the user through the
    /// dispatcher, never returned.
    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Vec<SlotEvent>;
}

/// What a single action run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub events: Vec<SlotEvent>,
    pub responses: Vec<BotMessage>,
}

/// Backends the standard actions depend on.
///
/// Credentials are validated once at startup; a missing key is kept as
/// the error so each action can report it without touching the network.
#[derive(Clone)]
pub struct ActionServices {
    pub generator: Result<Arc<StructuredGenerationClient>, ConfigError>,
    pub speech: Result<Arc<dyn SpeechSynthesizer>, ConfigError>,
    pub tts: TtsSettings,
}

/// Collection of actions available to the dialogue engine
pub struct ActionRegistry {
    actions: Vec<Arc<dyn Action>>,
}

impl ActionRegistry {
    /// Create the standard action set
    pub fn standard(services: ActionServices) -> Self {
        let actions: Vec<Arc<dyn Action>> = vec![
            Arc::new(HelloWorldAction),
            Arc::new(GenerateRecipeFromIngredientsAction::new(services.generator.clone())),
            Arc::new(GenerateRecipeFromNameAction::new(services.generator)),
            Arc::new(ReadRecipeStepAction),
            Arc::new(TextToSpeechAction::new(services.speech, &services.tts)),
            Arc::new(UiRefreshPronouncePhraseAction),
        ];
        Self { actions }
    }

    /// Registered action names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    /// Execute an action by name; `None` when no action has that name
    pub async fn execute(&self, name: &str, tracker: &Tracker) -> Option<ActionOutcome> {
        let action = self.actions.iter().find(|a| a.name() == name)?;

        let mut dispatcher = Dispatcher::new();
        let started = std::time::Instant::now();
        let events = action.run(tracker, &mut dispatcher).await;

        tracing::info!(
            action = name,
            sender_id = tracker.sender_id.as_deref().unwrap_or(""),
            events = events.len(),
            responses = dispatcher.messages().len(),
            duration_ms = %started.elapsed().as_millis(),
            "Action finished"
        );

        Some(ActionOutcome {
            events,
            responses: dispatcher.into_messages(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSpeechSynthesizer;
    use serde_json::json;

    fn registry() -> ActionRegistry {
        ActionRegistry::standard(ActionServices {
            generator: Err(ConfigError::MissingCredential),
            speech: Ok(Arc::new(MockSpeechSynthesizer::new()) as Arc<dyn SpeechSynthesizer>),
            tts: TtsSettings::default(),
        })
    }

    #[test]
    fn test_standard_actions_registered() {
        let registry = registry();
        assert_eq!(
            registry.names(),
            vec![
                "action_hello_world",
                "action_generate_recipe_from_ingredients",
                "action_generate_recipe_from_name",
                "action_read_recipe_step",
                "action_text_to_speech",
                "action_ui_refresh_pronounce_phrase",
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_action_is_none() {
        assert!(registry().execute("action_nope", &Tracker::default()).await.is_none());
    }

    #[tokio::test]
    async fn test_execute_collects_events_and_responses() {
        let outcome = registry()
            .execute("action_hello_world", &Tracker::default())
            .await
            .unwrap();
        assert!(outcome.events.is_empty());
        assert_eq!(outcome.responses[0].text.as_deref(), Some("Hello World!"));
    }

    #[test]
    fn test_tracker_is_lenient() {
        let tracker: Tracker = serde_json::from_value(json!({})).unwrap();
        assert!(tracker.latest_intent().is_none());
        assert!(tracker.latest_text().is_none());

        let tracker: Tracker = serde_json::from_value(json!({
            "sender_id": "u1",
            "slots": {"step_index": 1},
            "latest_message": {
                "intent": {"name": "repeat_step", "confidence": 0.9},
                "text": "encore"
            },
            "events": []
        }))
        .unwrap();
        assert_eq!(tracker.latest_intent(), Some("repeat_step"));
        assert_eq!(tracker.latest_text(), Some("encore"));
        assert_eq!(tracker.slots.index("step_index"), Some(1));
    }

    #[test]
    fn test_bot_message_wire_shape() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.utter_text("salut");
        dispatcher.utter_json(None, json!({"k": 1}));
        let wire = serde_json::to_value(dispatcher.into_messages()).unwrap();
        assert_eq!(
            wire,
            json!([
                {"text": "salut", "custom": null},
                {"text": null, "custom": {"k": 1}}
            ])
        );
    }
}

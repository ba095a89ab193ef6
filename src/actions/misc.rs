//! Small actions with no backend

use super::{Action, Dispatcher, Tracker};
use crate::slots::SlotEvent;
use async_trait::async_trait;
use serde_json::json;

pub const PRONOUNCE_PHRASE: &str = "Je pronnonce cette phrase";

pub struct HelloWorldAction;

#[async_trait]
impl Action for HelloWorldAction {
    fn name(&self) -> &str {
        "action_hello_world"
    }

    async fn run(&self, _tracker: &Tracker, dispatcher: &mut Dispatcher) -> Vec<SlotEvent> {
        dispatcher.utter_text("Hello World!");
        vec![]
    }
}

/// Asks the UI to pronounce a fixed phrase through the `ui_event` slot
pub struct UiRefreshPronouncePhraseAction;

#[async_trait]
impl Action for UiRefreshPronouncePhraseAction {
    fn name(&self) -> &str {
        "action_ui_refresh_pronounce_phrase"
    }

    async fn run(&self, _tracker: &Tracker, _dispatcher: &mut Dispatcher) -> Vec<SlotEvent> {
        vec![SlotEvent::set(
            "ui_event",
            json!({"type": "PRONOUNCE_PHRASE", "text": PRONOUNCE_PHRASE}),
        )]
    }
}

//! Step-by-step narration action

use super::{Action, Dispatcher, Tracker};
use crate::navigator::{narrate, Intent};
use crate::slots::SlotEvent;
use async_trait::async_trait;

pub struct ReadRecipeStepAction;

#[async_trait]
impl Action for ReadRecipeStepAction {
    fn name(&self) -> &str {
        "action_read_recipe_step"
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Vec<SlotEvent> {
        let intent = Intent::from_name(tracker.latest_intent());
        let result = narrate(intent, &tracker.slots);

        tracing::debug!(?intent, narration = ?result.narration, "Step narrated");

        dispatcher.utter_text(result.narration.text());
        result.update.to_events()
    }
}

//! Step-by-step recipe narration
//!
//! A small state machine over `(step_index, last_step_text)`. The
//! transition itself is pure; [`narrate`] is the slot-facing wrapper that
//! reads state and steps from a [`SlotBag`] and returns the writes to
//! persist.

mod extract;
mod intent;
mod transition;

#[cfg(test)]
mod proptests;

pub use extract::{extract_steps, StepExtractor, STEP_EXTRACTORS};
pub use intent::Intent;
pub use transition::{transition, Narration, NarrationResult, StateUpdate};

use crate::slots::{SlotBag, SlotEvent};

pub const STEP_INDEX_SLOT: &str = "step_index";
pub const LAST_STEP_TEXT_SLOT: &str = "last_step_text";

/// Per-conversation navigation state, as persisted in slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigatorState {
    /// Number of steps narrated so far (0-based position of the next one)
    pub step_index: usize,
    /// Exact text of the last narration, replayed on "repeat"
    pub last_step_text: Option<String>,
}

impl NavigatorState {
    /// Absent or unreadable slots default to a fresh state
    pub fn from_slots(slots: &SlotBag) -> Self {
        Self {
            step_index: slots.index(STEP_INDEX_SLOT).unwrap_or(0),
            last_step_text: slots.text(LAST_STEP_TEXT_SLOT).map(str::to_string),
        }
    }
}

impl StateUpdate {
    /// Slot writes for this update; empty when nothing changed
    pub fn to_events(&self) -> Vec<SlotEvent> {
        let mut events = Vec::new();
        if let Some(index) = self.step_index {
            events.push(SlotEvent::set(STEP_INDEX_SLOT, index));
        }
        if let Some(text) = &self.last_step_text {
            events.push(SlotEvent::set(LAST_STEP_TEXT_SLOT, text.as_str()));
        }
        events
    }
}

/// Run one navigation turn against a slot snapshot
pub fn narrate(intent: Intent, slots: &SlotBag) -> NarrationResult {
    let state = NavigatorState::from_slots(slots);
    let steps = extract_steps(slots);
    transition(intent, &state, steps.as_deref())
}

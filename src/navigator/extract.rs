//! Locating the step list among the slots that may hold a recipe

use crate::slots::SlotBag;
use serde_json::Value;

/// One place the step list may live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepExtractor {
    /// Slot holding the step list itself
    Direct(&'static str),
    /// Slot holding a recipe document, as a mapping or as JSON text
    Container(&'static str),
}

/// Tried in order; the first non-empty step list wins
pub const STEP_EXTRACTORS: [StepExtractor; 5] = [
    StepExtractor::Direct("recipe_steps"),
    StepExtractor::Container("recipe_card"),
    StepExtractor::Container("recipe_json"),
    StepExtractor::Container("last_recipe"),
    StepExtractor::Container("recipe"),
];

impl StepExtractor {
    pub fn slot(&self) -> &'static str {
        match self {
            StepExtractor::Direct(slot) | StepExtractor::Container(slot) => slot,
        }
    }

    pub fn extract(&self, slots: &SlotBag) -> Option<Vec<Value>> {
        let value = slots.get(self.slot())?;
        match self {
            StepExtractor::Direct(_) => non_empty(value.as_array()?),
            StepExtractor::Container(_) => match value {
                Value::Object(_) => steps_of(value),
                Value::String(text) => match serde_json::from_str::<Value>(text) {
                    Ok(parsed) => steps_of(&parsed),
                    Err(e) => {
                        tracing::debug!(
                            slot = self.slot(),
                            error = %e,
                            "Recipe slot is not valid JSON"
                        );
                        None
                    }
                },
                _ => None,
            },
        }
    }
}

/// First non-empty step list across [`STEP_EXTRACTORS`]
pub fn extract_steps(slots: &SlotBag) -> Option<Vec<Value>> {
    STEP_EXTRACTORS.iter().find_map(|extractor| extractor.extract(slots))
}

fn steps_of(container: &Value) -> Option<Vec<Value>> {
    non_empty(container.get("recipe")?.get("steps")?.as_array()?)
}

fn non_empty(steps: &[Value]) -> Option<Vec<Value>> {
    if steps.is_empty() {
        None
    } else {
        Some(steps.to_vec())
    }
}

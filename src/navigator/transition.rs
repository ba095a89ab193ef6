//! Pure navigation transition
//!
//! `(intent, state, steps) -> (narration, update)` with no I/O. Steps stay
//! as raw JSON because a stored recipe may be malformed; a bad step is
//! skipped over rather than treated as an error.

use super::{Intent, NavigatorState};
use serde_json::Value;

pub const NO_RECIPE_MESSAGE: &str =
    "Je n'ai pas encore de recette en mémoire. Demande-moi d'abord une recette.";
pub const FINISHED_MESSAGE: &str = "Toutes les étapes sont déjà terminées. Bon appétit !";
pub const UNREADABLE_MESSAGE: &str =
    "Je n'arrive pas à lire cette étape. Dis « suivant » pour passer à la suite.";

/// What gets said this turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narration {
    /// A freshly rendered step
    Step(String),
    /// The cached text of the previous narration
    Replay(String),
    NoRecipe,
    Finished,
    Unreadable,
}

impl Narration {
    pub fn text(&self) -> &str {
        match self {
            Narration::Step(text) | Narration::Replay(text) => text,
            Narration::NoRecipe => NO_RECIPE_MESSAGE,
            Narration::Finished => FINISHED_MESSAGE,
            Narration::Unreadable => UNREADABLE_MESSAGE,
        }
    }
}

/// Slot writes produced by a transition. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateUpdate {
    pub step_index: Option<usize>,
    pub last_step_text: Option<String>,
}

impl StateUpdate {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.step_index.is_none() && self.last_step_text.is_none()
    }
}

/// Result of a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationResult {
    pub narration: Narration,
    pub update: StateUpdate,
}

impl NarrationResult {
    fn new(narration: Narration, update: StateUpdate) -> Self {
        Self { narration, update }
    }
}

/// Pure transition function
pub fn transition(
    intent: Intent,
    state: &NavigatorState,
    steps: Option<&[Value]>,
) -> NarrationResult {
    // Repeat replays the cached narration whatever the step list holds now
    if intent == Intent::Repeat {
        if let Some(cached) = state.last_step_text.as_deref().filter(|t| !t.is_empty()) {
            return NarrationResult::new(
                Narration::Replay(cached.to_string()),
                StateUpdate::none(),
            );
        }
    }

    let Some(steps) = steps.filter(|s| !s.is_empty()) else {
        return NarrationResult::new(Narration::NoRecipe, StateUpdate::none());
    };

    let target = match intent {
        Intent::Start => 0,
        Intent::Repeat => state.step_index.saturating_sub(1),
        Intent::Next => state.step_index,
    };

    if target >= steps.len() {
        return NarrationResult::new(
            Narration::Finished,
            StateUpdate {
                step_index: Some(steps.len()),
                last_step_text: None,
            },
        );
    }

    match render_step(&steps[target], target) {
        Some(text) => NarrationResult::new(
            Narration::Step(text.clone()),
            StateUpdate {
                step_index: Some(target + 1),
                last_step_text: Some(text),
            },
        ),
        None => NarrationResult::new(
            Narration::Unreadable,
            StateUpdate {
                step_index: Some(target + 1),
                last_step_text: None,
            },
        ),
    }
}

/// `Étape {n}: {instruction}[ (environ {timer} min)]`.
///
/// `n` is the step's own `index` when it is an integer, else the 1-based
/// position. The instruction is rendered as stored. `None` when it is
/// missing, not a string, or empty.
fn render_step(step: &Value, position: usize) -> Option<String> {
    let instruction = step
        .get("instruction")
        .and_then(Value::as_str)
        .filter(|i| !i.is_empty())?;

    let number = match step.get("index") {
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => n.to_string(),
        _ => (position + 1).to_string(),
    };

    let mut text = format!("Étape {number}: {instruction}");
    let timer = step.get("timer_min").and_then(Value::as_u64);
    if let Some(minutes) = timer.filter(|m| *m > 0) {
        text.push_str(&format!(" (environ {minutes} min)"));
    }
    Some(text)
}

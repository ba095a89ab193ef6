//! Navigation intents

pub const START_INTENT: &str = "start_step_by_step";
pub const REPEAT_INTENT: &str = "repeat_step";

/// The finite set of navigation intents.
///
/// Anything the dialogue engine recognizes that is not start or repeat
/// counts as "next".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    Repeat,
    Next,
}

impl Intent {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(START_INTENT) => Intent::Start,
            Some(REPEAT_INTENT) => Intent::Repeat,
            _ => Intent::Next,
        }
    }
}

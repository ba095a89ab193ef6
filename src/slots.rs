//! Conversation slots
//!
//! Slots are owned by the dialogue engine. Actions receive a snapshot in
//! [`SlotBag`] and hand back [`SlotEvent`]s describing what to persist.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Read-only snapshot of a conversation's slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotBag(Map<String, Value>);

impl SlotBag {
    pub fn new(slots: Map<String, Value>) -> Self {
        Self(slots)
    }

    /// Raw value; an explicit `null` reads as unset
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Non-blank string value
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Non-negative integral value.
    ///
    /// Numeric slots often come back as floats (`2.0`) or strings (`"2"`).
    pub fn index(&self, name: &str) -> Option<usize> {
        match self.get(name)? {
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    usize::try_from(u).ok()
                } else {
                    n.as_f64().and_then(float_to_index)
                }
            }
            Value::String(s) => s.trim().parse::<f64>().ok().and_then(float_to_index),
            _ => None,
        }
    }

    /// Set or overwrite a slot (used to build fixtures and apply events)
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    /// Fold slot events into the snapshot, as the dialogue engine would
    pub fn apply(&mut self, events: &[SlotEvent]) {
        for event in events {
            self.insert(event.name.clone(), event.value.clone());
        }
    }
}

impl From<Value> for SlotBag {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_index(f: f64) -> Option<usize> {
    let whole = f.is_finite() && f >= 0.0 && f.fract() == 0.0;
    (whole && f <= f64::from(u32::MAX)).then(|| f as usize)
}

/// Slot write, in the dialogue engine's event format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotEvent {
    pub event: String,
    pub timestamp: Option<f64>,
    pub name: String,
    pub value: Value,
}

impl SlotEvent {
    pub fn set(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            event: "slot".to_string(),
            timestamp: None,
            name: name.into(),
            value: value.into(),
        }
    }
}

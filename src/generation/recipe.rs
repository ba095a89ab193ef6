//! Recipe documents
//!
//! [`GeneratedRecipe`] is what the client returns: the parsed mapping with a
//! guaranteed `recipe` object. [`RecipeCard`] is the strict typed view; the
//! JSON-object mode is not bound by the schema, so that view can fail on an
//! otherwise accepted document.

use super::GenerationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed generation result whose `recipe` key holds a mapping
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRecipe {
    recipe: Map<String, Value>,
    /// Any other top-level keys, kept as returned
    rest: Map<String, Value>,
}

impl GeneratedRecipe {
    /// Minimal shape check: a mapping with a mapping under `recipe`
    pub fn from_value(value: Value) -> Result<Self, GenerationError> {
        let Value::Object(mut document) = value else {
            return Err(GenerationError::UnexpectedShape { value });
        };

        match document.remove("recipe") {
            Some(Value::Object(recipe)) => Ok(Self {
                recipe,
                rest: document,
            }),
            other => {
                if let Some(original) = other {
                    document.insert("recipe".to_string(), original);
                }
                Err(GenerationError::UnexpectedShape {
                    value: Value::Object(document),
                })
            }
        }
    }

    pub fn recipe(&self) -> &Map<String, Value> {
        &self.recipe
    }

    /// Typed view of the recipe
    pub fn card(&self) -> Result<RecipeCard, serde_json::Error> {
        RecipeCard::from_value(Value::Object(self.recipe.clone()))
    }

    /// The whole document, `recipe` key included
    pub fn to_value(&self) -> Value {
        let mut document = self.rest.clone();
        document.insert("recipe".to_string(), Value::Object(self.recipe.clone()));
        Value::Object(document)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipeCard {
    pub name: String,
    pub servings: Option<u32>,
    pub times: Times,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Times {
    pub total_min: u32,
    pub prep_min: Option<u32>,
    pub cook_min: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ingredient {
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub critical: bool,
    pub alternative: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub index: u32,
    pub instruction: String,
    pub timer_min: Option<u32>,
}

impl RecipeCard {
    /// Deserialize and enforce the cardinality rules serde cannot express
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        use serde::de::Error as _;

        let card: Self = serde_json::from_value(value)?;
        if card.ingredients.is_empty() {
            return Err(serde_json::Error::custom("recipe has no ingredients"));
        }
        if card.steps.is_empty() {
            return Err(serde_json::Error::custom("recipe has no steps"));
        }
        if card.times.total_min == 0 {
            return Err(serde_json::Error::custom("total_min must be at least 1"));
        }
        let invalid = card
            .steps
            .iter()
            .find(|s| s.index == 0 || s.instruction.is_empty());
        if let Some(step) = invalid {
            return Err(serde_json::Error::custom(format!(
                "invalid step {}: index must be >= 1 and instruction non-empty",
                step.index
            )));
        }
        Ok(card)
    }

    /// Critical ingredients that still carry an alternative
    pub fn critical_alternatives(&self) -> Vec<&Ingredient> {
        self.ingredients
            .iter()
            .filter(|i| i.critical && i.alternative.is_some())
            .collect()
    }
}

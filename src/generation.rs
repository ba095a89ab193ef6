//! Structured recipe generation
//!
//! Turns a natural-language request into a schema-shaped recipe document,
//! trying the schema-constrained backend mode first and the JSON-object
//! mode second.

mod client;
mod error;
mod prompt;
mod recipe;
mod schema;

pub use client::{
    GenerationSettings, StructuredGenerationClient, Tier, TierFailure, TierOutcome,
    SYSTEM_INSTRUCTION,
};
pub use error::{GenerationError, GenerationErrorKind, SNIPPET_LIMIT};
pub use prompt::{ingredients_prompt, name_prompt};
pub use recipe::{GeneratedRecipe, Ingredient, RecipeCard, Step, Times};
pub use schema::recipe_schema;

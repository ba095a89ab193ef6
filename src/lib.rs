//! Recipe assistant - custom actions for a voice cooking assistant
//!
//! Generates schema-shaped recipes through a two-tier structured-generation
//! client and narrates them step by step, behind the dialogue engine's
//! custom-action HTTP protocol.

pub mod actions;
pub mod api;
pub mod config;
pub mod generation;
pub mod llm;
pub mod navigator;
pub mod slots;
pub mod tts;

#[cfg(test)]
pub(crate) mod testing;

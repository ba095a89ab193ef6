//! HTTP action server
//!
//! Speaks the dialogue engine's custom-action protocol. The server keeps
//! no per-conversation state; the engine owns slots and serializes turns
//! of one conversation.

mod handlers;
mod types;

pub use handlers::{create_router, AppError};
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::actions::ActionRegistry;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ActionRegistry>,
}

impl AppState {
    pub fn new(registry: ActionRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

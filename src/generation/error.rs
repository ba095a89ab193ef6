//! Generation error taxonomy

use crate::config::ConfigError;
use crate::llm::{LlmError, LlmErrorKind};
use serde_json::Value;
use thiserror::Error;

/// Longest slice of an unparsable payload kept for diagnostics
pub const SNIPPET_LIMIT: usize = 500;

/// Why a generation call produced no recipe
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// The fallback tier itself failed; there is nothing left to try.
    #[error("Erreur lors de l'appel OpenAI: {0}")]
    Transport(#[source] LlmError),

    #[error("Réponse OpenAI vide.")]
    EmptyResponse,

    #[error("Réponse non-JSON ou JSON invalide: {reason}. Extrait: {snippet}")]
    InvalidJson { reason: String, snippet: String },

    #[error("JSON inattendu (clé 'recipe' manquante): {value}")]
    UnexpectedShape { value: Value },
}

/// Flat classification of [`GenerationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    Configuration,
    Transport,
    EmptyResponse,
    InvalidJson,
    UnexpectedShape,
}

impl GenerationError {
    pub fn invalid_json(text: &str, err: &serde_json::Error) -> Self {
        Self::InvalidJson {
            reason: err.to_string(),
            snippet: snippet(text),
        }
    }

    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            Self::Configuration(_) => GenerationErrorKind::Configuration,
            Self::Transport(_) => GenerationErrorKind::Transport,
            Self::EmptyResponse => GenerationErrorKind::EmptyResponse,
            Self::InvalidJson { .. } => GenerationErrorKind::InvalidJson,
            Self::UnexpectedShape { .. } => GenerationErrorKind::UnexpectedShape,
        }
    }

    /// The single line spoken back to the user.
    ///
    /// Transport failures get a fixed sentence per kind; the backend's own
    /// detail stays in the `Display` form for the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(e) => transport_message(e.kind).to_string(),
            other => other.to_string(),
        }
    }
}

fn transport_message(kind: LlmErrorKind) -> &'static str {
    match kind {
        LlmErrorKind::Network => {
            "Je n'arrive pas à joindre le service de recettes. Réessaie dans un instant."
        }
        LlmErrorKind::RateLimit => {
            "Le service de recettes est très sollicité. Réessaie dans quelques secondes."
        }
        LlmErrorKind::ServerError => {
            "Le service de recettes rencontre un problème. Réessaie un peu plus tard."
        }
        LlmErrorKind::Auth => {
            "L'accès au service de recettes a été refusé. Vérifie la clé OpenAI configurée."
        }
        LlmErrorKind::InvalidRequest | LlmErrorKind::Unknown => {
            "Je n'ai pas pu générer la recette cette fois-ci. Réessaie dans un instant."
        }
    }
}

/// First [`SNIPPET_LIMIT`] characters, cut on a char boundary
fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_LIMIT).collect()
}

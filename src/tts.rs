//! Text-to-speech
//!
//! Synthesis goes through a [`SpeechSynthesizer`]; the `OpenAI` speech
//! endpoint is the only production implementation. Playback is local and
//! best-effort.

mod openai;
mod playback;

pub use openai::OpenAiSpeech;
pub use playback::play_audio_detached;

use crate::config::ConfigError;
use crate::llm::LlmError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// A synthesized clip, already written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeechClip {
    pub text: String,
    pub mime_type: String,
    pub audio_base64: String,
    pub file_path: String,
    pub model: String,
    pub voice: String,
}

impl SpeechClip {
    /// Channel payload: `{"tts": {...}}`
    pub fn to_message(&self) -> Value {
        json!({ "tts": self })
    }
}

#[derive(Debug, Error)]
pub enum TtsError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("Erreur lors de l'appel OpenAI TTS: {0}")]
    Request(#[from] LlmError),

    #[error("Réponse OpenAI TTS vide.")]
    EmptyAudio,

    #[error("Impossible d'écrire le fichier audio: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<SpeechClip, TtsError>;
}

/// MIME type for an audio format name
pub fn mime_type_for(format: &str) -> String {
    match format.to_lowercase().as_str() {
        "mp3" | "mpeg" => "audio/mpeg".to_string(),
        other => format!("audio/{other}"),
    }
}

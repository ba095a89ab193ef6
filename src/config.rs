//! Process configuration
//!
//! Read once from the environment at startup and passed by reference into
//! the generation client and the speech synthesizer.

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_PORT: u16 = 5055;

/// Configuration problems that must be fixed by the operator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY n'est pas défini. Configure la variable d'environnement et réessaie.")]
    MissingCredential,
}

/// Raw configuration as found in the environment
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub openai_base_url: Option<String>,
    pub tts: TtsSettings,
    pub port: u16,
}

/// Speech synthesis and playback settings
#[derive(Debug, Clone)]
pub struct TtsSettings {
    pub model: String,
    pub voice: String,
    pub format: String,
    pub output_dir: PathBuf,
    pub play_audio: bool,
    pub emit_message: bool,
}

impl Default for TtsSettings {
    fn default() -> Self {
        Self {
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            format: "wav".to_string(),
            output_dir: PathBuf::from("tts_outputs"),
            play_audio: true,
            emit_message: false,
        }
    }
}

/// Validated credentials and endpoint for the completion backend
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup (tests inject a map here)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = TtsSettings::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            openai_api_key: lookup("OPENAI_API_KEY"),
            openai_model: non_empty("OPENAI_MODEL"),
            openai_base_url: non_empty("OPENAI_BASE_URL"),
            tts: TtsSettings {
                model: non_empty("OPENAI_TTS_MODEL").unwrap_or(defaults.model),
                voice: non_empty("OPENAI_TTS_VOICE").unwrap_or(defaults.voice),
                format: non_empty("OPENAI_TTS_FORMAT").unwrap_or(defaults.format),
                output_dir: non_empty("TTS_OUTPUT_DIR")
                    .map_or(defaults.output_dir, PathBuf::from),
                play_audio: truthy(lookup("TTS_PLAY_AUDIO").as_deref(), defaults.play_audio),
                emit_message: truthy(
                    lookup("TTS_EMIT_MESSAGE").as_deref(),
                    defaults.emit_message,
                ),
            },
            port: lookup("ACTION_SERVER_PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    /// Validate the backend credentials.
    ///
    /// A blank key is treated the same as a missing one.
    pub fn openai(&self) -> Result<OpenAiConfig, ConfigError> {
        let api_key = self
            .openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingCredential)?;

        Ok(OpenAiConfig {
            api_key: api_key.to_string(),
            model: self
                .openai_model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: self
                .openai_base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

/// Parse a boolean-ish environment value
pub fn truthy(value: Option<&str>, default: bool) -> bool {
    match value {
        None => default,
        Some(v) => matches!(
            v.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "y" | "on"
        ),
    }
}

//! Text-to-speech action
//!
//! A technical action: whatever goes wrong, the user hears nothing about
//! it and no slot changes.

use super::{Action, Dispatcher, Tracker};
use crate::config::{ConfigError, TtsSettings};
use crate::slots::SlotEvent;
use crate::tts::{play_audio_detached, SpeechSynthesizer, TtsError};
use async_trait::async_trait;
use std::sync::Arc;

/// Slots that may carry the text to speak, in priority order
pub const TEXT_SLOTS: [&str; 3] = ["tts_text", "texte_a_dire", "texte"];
pub const LAST_FILE_SLOT: &str = "tts_last_file";

pub struct TextToSpeechAction {
    synthesizer: Result<Arc<dyn SpeechSynthesizer>, ConfigError>,
    play_audio: bool,
    emit_message: bool,
}

impl TextToSpeechAction {
    pub fn new(
        synthesizer: Result<Arc<dyn SpeechSynthesizer>, ConfigError>,
        settings: &TtsSettings,
    ) -> Self {
        Self {
            synthesizer,
            play_audio: settings.play_audio,
            emit_message: settings.emit_message,
        }
    }

    /// First non-blank candidate, slots before the latest message
    fn text_to_speak(tracker: &Tracker) -> Option<String> {
        TEXT_SLOTS
            .iter()
            .find_map(|slot| tracker.slots.text(slot))
            .or_else(|| tracker.latest_text().filter(|t| !t.trim().is_empty()))
            .map(|t| t.trim().to_string())
    }
}

#[async_trait]
impl Action for TextToSpeechAction {
    fn name(&self) -> &str {
        "action_text_to_speech"
    }

    async fn run(&self, tracker: &Tracker, dispatcher: &mut Dispatcher) -> Vec<SlotEvent> {
        let Some(text) = Self::text_to_speak(tracker) else {
            return vec![];
        };

        let result = match &self.synthesizer {
            Ok(synthesizer) => synthesizer.synthesize(&text).await,
            Err(e) => Err(TtsError::from(e.clone())),
        };

        let clip = match result {
            Ok(clip) => clip,
            Err(e) => {
                tracing::warn!(error = %e, "Speech synthesis failed");
                return vec![];
            }
        };

        if self.play_audio {
            play_audio_detached(&clip.file_path);
        }
        if self.emit_message {
            dispatcher.utter_json(None, clip.to_message());
        }

        vec![SlotEvent::set(LAST_FILE_SLOT, clip.file_path)]
    }
}

//! `OpenAI` speech endpoint
//!
//! `POST {base_url}/audio/speech` returns raw audio bytes. Every clip is
//! written to a fresh file so concurrent requests never share a path.

use super::{mime_type_for, SpeechClip, SpeechSynthesizer, TtsError};
use crate::config::{OpenAiConfig, TtsSettings};
use crate::llm::{send_error, status_error, LlmError};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct OpenAiSpeech {
    client: Client,
    api_key: String,
    base_url: String,
    settings: TtsSettings,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
}

impl OpenAiSpeech {
    pub fn new(config: &OpenAiConfig, settings: TtsSettings) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            settings,
        }
    }

    fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.base_url)
    }

    async fn fetch_audio(&self, text: &str) -> Result<Vec<u8>, TtsError> {
        let body = SpeechRequest {
            model: &self.settings.model,
            voice: &self.settings.voice,
            input: text,
            response_format: &self.settings.format,
        };

        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body).into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read audio: {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    async fn synthesize(&self, text: &str) -> Result<SpeechClip, TtsError> {
        let audio = self.fetch_audio(text).await?;
        let path = write_clip(&self.settings.output_dir, &self.settings.format, &audio).await?;

        tracing::info!(
            model = %self.settings.model,
            voice = %self.settings.voice,
            bytes = audio.len(),
            path = %path.display(),
            "Speech synthesized"
        );

        Ok(SpeechClip {
            text: text.to_string(),
            mime_type: mime_type_for(&self.settings.format),
            audio_base64: BASE64.encode(&audio),
            file_path: path.display().to_string(),
            model: self.settings.model.clone(),
            voice: self.settings.voice.clone(),
        })
    }
}

/// Write `audio` to `dir/tts_<uuid>.<format>`, creating `dir` if needed
pub(crate) async fn write_clip(
    dir: &Path,
    format: &str,
    audio: &[u8],
) -> Result<PathBuf, TtsError> {
    if audio.is_empty() {
        return Err(TtsError::EmptyAudio);
    }
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("tts_{}.{format}", uuid::Uuid::new_v4().simple()));
    tokio::fs::write(&path, audio).await?;
    Ok(path)
}

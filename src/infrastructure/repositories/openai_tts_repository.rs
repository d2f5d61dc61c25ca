use super::batching::split_into_batches;
use super::error::UpstreamError;
use super::tts_repository::TtsRepository;
use crate::domain::language::LanguageCode;
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
const MAX_BATCH_SIZE: usize = 4096;

const PROVIDER: &str = "openai";

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    default_voice: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, default_voice: String) -> Self {
        Self {
            client,
            model,
            default_voice,
        }
    }

    /// OpenAI voices are multilingual; pick one whose timbre suits the language
    fn get_voice_for_language(language: LanguageCode) -> Voice {
        match language {
            LanguageCode::English | LanguageCode::Korean => Voice::Alloy,
            LanguageCode::Spanish | LanguageCode::Arabic => Voice::Echo,
            LanguageCode::French | LanguageCode::Japanese => Voice::Nova,
            LanguageCode::German | LanguageCode::Russian => Voice::Onyx,
            LanguageCode::Italian | LanguageCode::Chinese => Voice::Fable,
            LanguageCode::Portuguese
            | LanguageCode::Hindi
            | LanguageCode::Bengali
            | LanguageCode::Tamil
            | LanguageCode::Telugu
            | LanguageCode::Urdu => Voice::Shimmer,
        }
    }

    fn parse_voice(voice: &str) -> Option<Voice> {
        match voice.to_lowercase().as_str() {
            "alloy" => Some(Voice::Alloy),
            "echo" => Some(Voice::Echo),
            "fable" => Some(Voice::Fable),
            "onyx" => Some(Voice::Onyx),
            "nova" => Some(Voice::Nova),
            "shimmer" => Some(Voice::Shimmer),
            _ => None,
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    fn select_voice(&self, language: LanguageCode) -> Voice {
        Self::parse_voice(&self.default_voice)
            .unwrap_or_else(|| Self::get_voice_for_language(language))
    }

    /// Call OpenAI TTS API to synthesize a single text batch
    async fn call_openai(&self, text: &str, voice: Voice) -> Result<Vec<u8>, UpstreamError> {
        tracing::info!(
            model = %self.model,
            voice = ?voice,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice: voice.clone(),
            response_format: None, // Defaults to MP3
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                voice = ?voice,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            match &e {
                OpenAIError::ApiError(api_error)
                    if is_rate_limit(api_error.r#type.as_deref(), &api_error.message) =>
                {
                    UpstreamError::RateLimited { provider: PROVIDER }
                }
                _ => UpstreamError::transport(PROVIDER, &e),
            }
        })?;

        Ok(response.bytes.to_vec())
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<u8>, UpstreamError> {
        let start_time = std::time::Instant::now();
        let voice = self.select_voice(language);

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        tracing::info!(
            language = %language,
            voice = ?voice,
            batch_count = batches.len(),
            text_length = text.len(),
            "Starting OpenAI TTS synthesis"
        );

        let mut merged_audio = Vec::new();
        for batch in &batches {
            let audio_data = self.call_openai(batch, voice.clone()).await?;
            merged_audio.extend(audio_data);
        }

        tracing::info!(
            provider = PROVIDER,
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }

    fn supports(&self, _language: LanguageCode) -> bool {
        true
    }

    fn provider(&self) -> &'static str {
        PROVIDER
    }
}

/// OpenAI reports 429s as API errors typed by the exhausted limit
fn is_rate_limit(error_type: Option<&str>, message: &str) -> bool {
    matches!(
        error_type,
        Some("requests") | Some("tokens") | Some("insufficient_quota") | Some("rate_limit_exceeded")
    ) || message.to_lowercase().contains("rate limit")
}

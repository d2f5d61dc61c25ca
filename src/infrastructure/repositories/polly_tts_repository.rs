use super::batching::split_into_batches;
use super::error::UpstreamError;
use super::tts_repository::TtsRepository;
use crate::domain::language::LanguageCode;
use async_trait::async_trait;
use aws_sdk_polly::{
    error::ProvideErrorMetadata,
    types::{Engine, LanguageCode as PollyLanguageCode, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

const PROVIDER: &str = "polly";

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Select the Polly voice for a language, if Polly has one
    pub fn get_voice_for_language(language: LanguageCode) -> Option<&'static str> {
        match language {
            LanguageCode::English => Some("Joanna"),
            LanguageCode::Hindi => Some("Kajal"),
            LanguageCode::Spanish => Some("Lupe"),
            LanguageCode::French => Some("Lea"),
            LanguageCode::German => Some("Vicki"),
            LanguageCode::Italian => Some("Bianca"),
            LanguageCode::Portuguese => Some("Ines"),
            LanguageCode::Russian => Some("Tatyana"),
            LanguageCode::Japanese => Some("Takumi"),
            LanguageCode::Korean => Some("Seoyeon"),
            LanguageCode::Chinese => Some("Zhiyu"),
            LanguageCode::Arabic => Some("Hala"),
            LanguageCode::Bengali
            | LanguageCode::Tamil
            | LanguageCode::Telugu
            | LanguageCode::Urdu => None,
        }
    }

    /// Bilingual voices need the language pinned explicitly
    fn language_override(language: LanguageCode) -> Option<PollyLanguageCode> {
        match language {
            LanguageCode::Hindi => Some(PollyLanguageCode::from("hi-IN")),
            LanguageCode::Arabic => Some(PollyLanguageCode::from("ar-AE")),
            _ => None,
        }
    }

    /// Check if a voice supports neural engine
    pub fn is_voice_neural_compatible(voice: &str) -> bool {
        // Based on AWS Polly documentation
        const NEURAL_VOICES: &[&str] = &[
            // English
            "Joanna", "Matthew", "Ivy", "Kendra", "Kimberly", "Salli", "Joey", "Justin", "Kevin",
            // Hindi
            "Kajal", // Spanish
            "Lupe", "Pedro", "Sergio", // French
            "Lea", "Remi", // German
            "Vicki", "Daniel", // Italian
            "Bianca", "Adriano", // Portuguese
            "Ines", "Camila", "Vitoria", "Thiago", // Japanese
            "Takumi", "Kazuha", "Tomoko", // Korean
            "Seoyeon", // Mandarin Chinese
            "Zhiyu",   // Arabic
            "Hala", "Zayd",
        ];

        NEURAL_VOICES.contains(&voice)
    }

    /// Call AWS Polly to synthesize a single text batch
    async fn call_polly(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, UpstreamError> {
        let voice_name = Self::get_voice_for_language(language).ok_or(
            UpstreamError::UnsupportedLanguage {
                provider: PROVIDER,
                language,
            },
        )?;
        let voice_id = VoiceId::from(voice_name);
        let engine = if Self::is_voice_neural_compatible(voice_name) {
            Engine::Neural
        } else {
            Engine::Standard
        };

        tracing::info!(
            language = %language,
            voice = voice_name,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .set_language_code(Self::language_override(language))
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    error_display = %e,
                    language = %language,
                    voice = voice_name,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                if is_throttling_code(e.code()) {
                    UpstreamError::RateLimited { provider: PROVIDER }
                } else {
                    UpstreamError::transport(PROVIDER, e)
                }
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            UpstreamError::transport(PROVIDER, e)
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Audio stream collected successfully"
        );

        Ok(audio_bytes)
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<u8>, UpstreamError> {
        if !self.supports(language) {
            return Err(UpstreamError::UnsupportedLanguage {
                provider: PROVIDER,
                language,
            });
        }

        let start_time = std::time::Instant::now();

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        tracing::info!(
            batch_count = batches.len(),
            text_length = text.len(),
            "Text split into batches"
        );

        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self.call_polly(batch, language).await?;
            merged_audio.extend(audio_data);

            tracing::debug!(
                batch_index = index,
                total_audio_size = merged_audio.len(),
                "Batch synthesized and merged"
            );
        }

        let duration = start_time.elapsed();
        tracing::info!(
            provider = PROVIDER,
            language = %language,
            latency_ms = duration.as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }

    fn supports(&self, language: LanguageCode) -> bool {
        Self::get_voice_for_language(language).is_some()
    }

    fn provider(&self) -> &'static str {
        PROVIDER
    }
}

/// Polly error codes that mean the account is over its request quota
fn is_throttling_code(code: Option<&str>) -> bool {
    matches!(
        code,
        Some("ThrottlingException") | Some("TooManyRequestsException")
    )
}

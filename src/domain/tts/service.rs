use super::error::TtsServiceError;
use crate::domain::language::{LanguageCode, LanguageIdentifier, UnsupportedLanguage};
use crate::domain::text::{char_count, clean_for_speech, MAX_TEXT_LENGTH};
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SpeechResult {
    pub audio_data: Vec<u8>,
    pub language: LanguageCode,
    /// True when the language was detected rather than given
    pub language_detected: bool,
    pub char_count: usize,
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    identifier: Arc<LanguageIdentifier>,
    cache: Option<Cache<String, Arc<Vec<u8>>>>,
}

impl TtsService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        identifier: Arc<LanguageIdentifier>,
        cache_enabled: bool,
    ) -> Self {
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(100)
                    .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self {
            tts_repo,
            identifier,
            cache,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Synthesize text to speech
    ///
    /// This operation:
    /// - Cleans the text (HTML, URLs, whitespace) and validates its length
    /// - Detects the language when none is given
    /// - Checks the provider has a voice for the language
    /// - Calls the provider, which handles batching and merging
    async fn synthesize(
        &self,
        text: &str,
        language: Option<LanguageCode>,
    ) -> Result<SpeechResult, TtsServiceError>;

    fn provider(&self) -> &'static str;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        text: &str,
        language: Option<LanguageCode>,
    ) -> Result<SpeechResult, TtsServiceError> {
        let cleaned_text = clean_for_speech(text);
        let char_count = char_count(&cleaned_text);

        if char_count == 0 {
            return Err(TtsServiceError::Invalid("Text cannot be empty".to_string()));
        }
        if char_count > MAX_TEXT_LENGTH {
            return Err(TtsServiceError::TooLarge(format!(
                "Text must be {} characters or less",
                MAX_TEXT_LENGTH
            )));
        }

        let (language, language_detected) = match language {
            Some(language) => (language, false),
            None => (self.detect_language(&cleaned_text)?, true),
        };

        if !self.tts_repo.supports(language) {
            return Err(UnsupportedLanguage(format!(
                "{} (no {} voice)",
                language,
                self.tts_repo.provider()
            ))
            .into());
        }

        tracing::info!(
            provider = self.tts_repo.provider(),
            language = %language,
            language_detected,
            char_count,
            "TTS synthesis request"
        );

        let cache_key = format!("{}:{}", language, cleaned_text);
        if let Some(cache) = &self.cache {
            if let Some(cached_audio) = cache.get(&cache_key).await {
                tracing::info!(
                    language = %language,
                    cached_audio_size = cached_audio.len(),
                    "TTS cache hit - returning cached audio"
                );
                return Ok(SpeechResult {
                    audio_data: cached_audio.as_ref().clone(),
                    language,
                    language_detected,
                    char_count,
                });
            }
        }

        let audio_data = self.tts_repo.synthesize(&cleaned_text, language).await?;

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, Arc::new(audio_data.clone())).await;
        }

        Ok(SpeechResult {
            audio_data,
            language,
            language_detected,
            char_count,
        })
    }

    fn provider(&self) -> &'static str {
        self.tts_repo.provider()
    }
}

impl TtsService {
    fn detect_language(&self, text: &str) -> Result<LanguageCode, TtsServiceError> {
        self.identifier.detect(text).ok_or_else(|| {
            tracing::warn!("Could not detect language for speech synthesis");
            TtsServiceError::Invalid(
                "Could not detect the language of the text, please specify one".to_string(),
            )
        })
    }
}

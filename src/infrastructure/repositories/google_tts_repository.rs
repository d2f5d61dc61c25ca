use super::batching::split_into_batches;
use super::error::UpstreamError;
use super::tts_repository::TtsRepository;
use crate::domain::language::LanguageCode;
use async_trait::async_trait;

/// The translate TTS endpoint rejects requests longer than 100 characters
const MAX_BATCH_SIZE: usize = 100;

const PROVIDER: &str = "google";

/// Google Translate TTS implementation of TTS repository
pub struct GoogleTtsRepository {
    http_client: reqwest::Client,
    tts_url: String,
}

impl GoogleTtsRepository {
    pub fn new(http_client: reqwest::Client, tts_url: String) -> Self {
        Self {
            http_client,
            tts_url,
        }
    }

    fn batch_url(&self, text: &str, language: LanguageCode, index: usize, total: usize) -> String {
        format!(
            "{}?ie=UTF-8&client=tw-ob&tl={}&total={}&idx={}&textlen={}&q={}",
            self.tts_url,
            language.as_str(),
            total,
            index,
            text.chars().count(),
            urlencoding::encode(text)
        )
    }

    async fn call_google(
        &self,
        text: &str,
        language: LanguageCode,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, UpstreamError> {
        let url = self.batch_url(text, language, index, total);

        let response = self
            .http_client
            .get(&url)
            .header("Referer", "https://translate.google.com/")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, language = %language, "Google TTS request failed");
                UpstreamError::transport(PROVIDER, e)
            })?;

        if !response.status().is_success() {
            let err = UpstreamError::from_response(PROVIDER, response).await;
            tracing::warn!(error = %err, language = %language, "Google TTS returned an error");
            return Err(err);
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::transport(PROVIDER, e))?;

        tracing::debug!(audio_size = audio.len(), "Google TTS audio received");

        Ok(audio.to_vec())
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<u8>, UpstreamError> {
        let start_time = std::time::Instant::now();

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        tracing::info!(
            batch_count = batches.len(),
            text_length = text.len(),
            "Text split into batches"
        );

        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self
                .call_google(batch, language, index, batches.len())
                .await?;
            merged_audio.extend(audio_data);
        }

        tracing::info!(
            provider = PROVIDER,
            language = %language,
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

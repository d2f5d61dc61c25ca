use super::error::UpstreamError;
use super::translation_repository::{TranslationRepository, UpstreamTranslation};
use crate::domain::language::{LanguageCode, SourceLanguage};
use async_trait::async_trait;
use serde_json::Value;

const PROVIDER: &str = "google";

/// Google Translate implementation backed by the public `gtx` endpoint
pub struct GoogleTranslationRepository {
    http_client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslationRepository {
    pub fn new(http_client: reqwest::Client, api_url: String) -> Self {
        Self {
            http_client,
            api_url,
        }
    }
}

#[async_trait]
impl TranslationRepository for GoogleTranslationRepository {
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
        target: LanguageCode,
    ) -> Result<UpstreamTranslation, UpstreamError> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            source = %source,
            target = %target,
            text_length = text.len(),
            "Calling Google Translate"
        );

        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("client", "gtx"),
                ("sl", source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, target = %target, "Google Translate request failed");
                UpstreamError::transport(PROVIDER, e)
            })?;

        if !response.status().is_success() {
            let err = UpstreamError::from_response(PROVIDER, response).await;
            tracing::warn!(error = %err, target = %target, "Google Translate returned an error");
            return Err(err);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::malformed(PROVIDER, e.to_string()))?;

        let translation = parse_gtx_response(&body)?;

        tracing::info!(
            provider = PROVIDER,
            source = %source,
            target = %target,
            detected_source = ?translation.detected_source,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            "Translation completed"
        );

        Ok(translation)
    }

    fn provider(&self) -> &'static str {
        PROVIDER
    }
}

/// Decode a `gtx` response body.
///
/// The translation is split into segments at `[0][*][0]`; the detected source
/// language, when present, sits at `[2]`.
pub fn parse_gtx_response(body: &Value) -> Result<UpstreamTranslation, UpstreamError> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| UpstreamError::malformed(PROVIDER, "missing translation segments"))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|v| v.as_str()))
        .collect();

    if text.is_empty() {
        return Err(UpstreamError::malformed(PROVIDER, "empty translation"));
    }

    let detected_source = body
        .get(2)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    Ok(UpstreamTranslation {
        text,
        detected_source,
    })
}

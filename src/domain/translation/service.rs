use super::error::TranslationServiceError;
use crate::domain::language::{LanguageCode, LanguageIdentifier, SourceLanguage};
use crate::domain::text::{char_count, normalize_text, MAX_TEXT_LENGTH};
use crate::infrastructure::repositories::{TranslationRepository, UpstreamTranslation};
use async_trait::async_trait;
use futures::future::try_join_all;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Validated translation request
#[derive(Debug, Clone)]
pub struct TranslationInput {
    pub text: String,
    pub source: SourceLanguage,
    pub targets: Vec<LanguageCode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetTranslation {
    pub target: LanguageCode,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    /// Normalized text that was sent upstream
    pub text: String,
    pub source: SourceLanguage,
    /// Only set when the source was auto-detected
    pub detected_source: Option<String>,
    pub translations: Vec<TargetTranslation>,
}

pub struct TranslationService {
    translation_repo: Arc<dyn TranslationRepository>,
    identifier: Arc<LanguageIdentifier>,
    cache: Option<Cache<String, UpstreamTranslation>>,
}

impl TranslationService {
    pub fn new(
        translation_repo: Arc<dyn TranslationRepository>,
        identifier: Arc<LanguageIdentifier>,
        cache_enabled: bool,
    ) -> Self {
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(1000)
                    .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
                    .build(),
            )
        } else {
            None
        };

        Self {
            translation_repo,
            identifier,
            cache,
        }
    }
}

#[async_trait]
pub trait TranslationServiceApi: Send + Sync {
    /// Translate text into every requested target language
    ///
    /// This operation:
    /// - Normalizes and validates the text
    /// - Translates each distinct target concurrently
    /// - Resolves the detected source language when `auto` was requested,
    ///   falling back to local detection if the provider reports none
    async fn translate(
        &self,
        input: TranslationInput,
    ) -> Result<TranslationOutcome, TranslationServiceError>;

    fn provider(&self) -> &'static str;
}

#[async_trait]
impl TranslationServiceApi for TranslationService {
    async fn translate(
        &self,
        input: TranslationInput,
    ) -> Result<TranslationOutcome, TranslationServiceError> {
        let text = normalize_text(&input.text);
        validate_text(&text)?;
        let targets = dedupe_targets(&input.targets)?;

        tracing::info!(
            source = %input.source,
            targets = ?targets.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
            text_length = text.len(),
            "Translation request"
        );

        let results = try_join_all(
            targets
                .iter()
                .map(|target| self.translate_one(&text, input.source, *target)),
        )
        .await?;

        let detected_source = if input.source.is_auto() {
            self.resolve_detected_source(&text, &results)
        } else {
            None
        };

        let translations = targets
            .into_iter()
            .zip(results)
            .map(|(target, result)| TargetTranslation {
                target,
                text: result.text,
            })
            .collect();

        Ok(TranslationOutcome {
            text,
            source: input.source,
            detected_source,
            translations,
        })
    }

    fn provider(&self) -> &'static str {
        self.translation_repo.provider()
    }
}

impl TranslationService {
    async fn translate_one(
        &self,
        text: &str,
        source: SourceLanguage,
        target: LanguageCode,
    ) -> Result<UpstreamTranslation, TranslationServiceError> {
        if source == SourceLanguage::Explicit(target) {
            return Ok(UpstreamTranslation {
                text: text.to_string(),
                detected_source: None,
            });
        }

        let cache_key = format!("{}:{}:{}", source, target, text);
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&cache_key).await {
                tracing::debug!(source = %source, target = %target, "Translation cache hit");
                return Ok(cached);
            }
        }

        let translation = self.translation_repo.translate(text, source, target).await?;

        if let Some(cache) = &self.cache {
            cache.insert(cache_key, translation.clone()).await;
        }

        Ok(translation)
    }

    fn resolve_detected_source(&self, text: &str, results: &[UpstreamTranslation]) -> Option<String> {
        if let Some(detected) = results.iter().find_map(|r| r.detected_source.as_deref()) {
            return Some(canonical_tag(detected));
        }

        tracing::warn!("Provider reported no source language, falling back to local detection");
        let detected = self.identifier.detect(text).map(|code| code.as_str().to_string());
        if detected.is_none() {
            tracing::warn!("Could not detect source language");
        }
        detected
    }
}

fn validate_text(text: &str) -> Result<(), TranslationServiceError> {
    if text.is_empty() {
        return Err(TranslationServiceError::Invalid(
            "Text cannot be empty".to_string(),
        ));
    }

    if char_count(text) > MAX_TEXT_LENGTH {
        return Err(TranslationServiceError::TooLarge(format!(
            "Text must be {} characters or less",
            MAX_TEXT_LENGTH
        )));
    }

    Ok(())
}

/// Drop repeated targets, keeping first-seen order
fn dedupe_targets(targets: &[LanguageCode]) -> Result<Vec<LanguageCode>, TranslationServiceError> {
    let mut unique = Vec::with_capacity(targets.len());
    for target in targets {
        if !unique.contains(target) {
            unique.push(*target);
        }
    }

    if unique.is_empty() {
        return Err(TranslationServiceError::Invalid(
            "At least one target language is required".to_string(),
        ));
    }

    Ok(unique)
}

/// Supported tags are reported in their canonical spelling, others lowercased
fn canonical_tag(tag: &str) -> String {
    LanguageCode::parse(tag)
        .map(|code| code.as_str().to_string())
        .unwrap_or_else(|| tag.to_lowercase())
}

use super::error::UpstreamError;
use crate::domain::language::{LanguageCode, SourceLanguage};
use async_trait::async_trait;

/// Text returned by a translation provider for a single target language
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamTranslation {
    pub text: String,
    /// Source language tag reported by the provider, when it detected one
    pub detected_source: Option<String>,
}

/// Repository for machine translation.
/// Abstracts the hosted translation API the service proxies.
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Translate already-normalized text into a single target language
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
        target: LanguageCode,
    ) -> Result<UpstreamTranslation, UpstreamError>;

    /// Provider name, used in logs and readiness output
    fn provider(&self) -> &'static str;
}

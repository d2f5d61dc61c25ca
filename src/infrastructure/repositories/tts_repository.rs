use super::error::UpstreamError;
use crate::domain::language::LanguageCode;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Google, AWS Polly, OpenAI)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single audio stream
/// - Provider-specific voice selection
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech for a given language
    ///
    /// Returns merged audio data ready for playback (MP3 format)
    ///
    /// # Errors
    /// Returns error if synthesis fails, the provider is unavailable, or it
    /// has no voice for `language`
    async fn synthesize(&self, text: &str, language: LanguageCode)
        -> Result<Vec<u8>, UpstreamError>;

    /// Whether the provider can speak the given language
    fn supports(&self, language: LanguageCode) -> bool;

    /// Provider name, used in logs and readiness output
    fn provider(&self) -> &'static str;
}

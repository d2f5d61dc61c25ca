use crate::domain::language::UnsupportedLanguage;
use crate::error::AppError;
use crate::infrastructure::repositories::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("text too large: {0}")]
    TooLarge(String),
    #[error(transparent)]
    UnsupportedLanguage(#[from] UnsupportedLanguage),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<UpstreamError> for TtsServiceError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::RateLimited { .. } => TtsServiceError::RateLimited(err.to_string()),
            UpstreamError::UnsupportedLanguage { language, .. } => {
                TtsServiceError::UnsupportedLanguage(UnsupportedLanguage(language.to_string()))
            }
            _ => TtsServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TtsServiceError::TooLarge(msg) => AppError::PayloadTooLarge(msg),
            TtsServiceError::UnsupportedLanguage(e) => AppError::UnsupportedLanguage(e.0),
            TtsServiceError::RateLimited(msg) => AppError::RateLimitExceeded(msg),
            TtsServiceError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}

use crate::domain::language::UnsupportedLanguage;
use crate::error::AppError;
use crate::infrastructure::repositories::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum TranslationServiceError {
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

impl From<UpstreamError> for TranslationServiceError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::RateLimited { .. } => TranslationServiceError::RateLimited(err.to_string()),
            UpstreamError::UnsupportedLanguage { language, .. } => {
                TranslationServiceError::UnsupportedLanguage(UnsupportedLanguage(language.to_string()))
            }
            _ => TranslationServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<TranslationServiceError> for AppError {
    fn from(err: TranslationServiceError) -> Self {
        match err {
            TranslationServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TranslationServiceError::TooLarge(msg) => AppError::PayloadTooLarge(msg),
            TranslationServiceError::UnsupportedLanguage(e) => AppError::UnsupportedLanguage(e.0),
            TranslationServiceError::RateLimited(msg) => AppError::RateLimitExceeded(msg),
            TranslationServiceError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}

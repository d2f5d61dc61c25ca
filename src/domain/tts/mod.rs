pub mod error;
pub mod service;

pub use error::TtsServiceError;
pub use service::{SpeechResult, TtsService, TtsServiceApi};

use crate::domain::language::{LanguageCode, SourceLanguage};
use serde::{Deserialize, Serialize};

/// Request for POST /api/speech
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    /// Language tag; omitted or `auto` means detect from the text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SpeechRequest {
    pub fn language(&self) -> Result<Option<LanguageCode>, TtsServiceError> {
        let Some(tag) = self.language.as_deref() else {
            return Ok(None);
        };

        match tag.parse::<SourceLanguage>()? {
            SourceLanguage::Auto => Ok(None),
            SourceLanguage::Explicit(code) => Ok(Some(code)),
        }
    }
}

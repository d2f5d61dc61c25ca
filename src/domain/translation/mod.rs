pub mod error;
pub mod service;

pub use error::TranslationServiceError;
pub use service::{
    TargetTranslation, TranslationInput, TranslationOutcome, TranslationService,
    TranslationServiceApi,
};

use crate::domain::language::{LanguageCode, SourceLanguage, AUTO_DETECT};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_source() -> String {
    AUTO_DETECT.to_string()
}

/// Request for POST /api/translate
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub targets: Vec<String>,
    /// Single-target shorthand, merged in front of `targets`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub speak: bool,
}

impl TranslateRequest {
    /// Resolve language tags against the supported set
    pub fn to_input(&self) -> Result<TranslationInput, TranslationServiceError> {
        let source: SourceLanguage = self.source.parse()?;
        let targets = self
            .target
            .iter()
            .chain(self.targets.iter())
            .map(|tag| tag.parse::<LanguageCode>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TranslationInput {
            text: self.text.clone(),
            source,
            targets,
        })
    }
}

/// Response for POST /api/translate
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_source: Option<String>,
    pub translations: Vec<TargetTranslationResponse>,
    pub history_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TargetTranslationResponse {
    pub target: LanguageCode,
    pub text: String,
    /// Base64-encoded MP3, present when speech was requested and succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_error: Option<String>,
}

/// Entry of GET /api/languages
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageResponse {
    pub code: LanguageCode,
    pub name: String,
}

impl From<LanguageCode> for LanguageResponse {
    fn from(code: LanguageCode) -> Self {
        Self {
            code,
            name: code.name().to_string(),
        }
    }
}

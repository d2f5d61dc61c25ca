use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tag used by clients to request upstream language detection
pub const AUTO_DETECT: &str = "auto";

/// Languages supported for both translation and speech (Google language tags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "zh-CN")]
    Chinese,
    #[serde(rename = "ar")]
    Arabic,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "ur")]
    Urdu,
}

const ALL_LANGUAGES: [LanguageCode; 16] = [
    LanguageCode::English,
    LanguageCode::Hindi,
    LanguageCode::Spanish,
    LanguageCode::French,
    LanguageCode::German,
    LanguageCode::Italian,
    LanguageCode::Portuguese,
    LanguageCode::Russian,
    LanguageCode::Japanese,
    LanguageCode::Korean,
    LanguageCode::Chinese,
    LanguageCode::Arabic,
    LanguageCode::Bengali,
    LanguageCode::Tamil,
    LanguageCode::Telugu,
    LanguageCode::Urdu,
];

impl LanguageCode {
    /// Every supported language, in display order
    pub fn all() -> &'static [LanguageCode] {
        &ALL_LANGUAGES
    }

    /// Get the language tag understood by the upstream services
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::English => "en",
            LanguageCode::Hindi => "hi",
            LanguageCode::Spanish => "es",
            LanguageCode::French => "fr",
            LanguageCode::German => "de",
            LanguageCode::Italian => "it",
            LanguageCode::Portuguese => "pt",
            LanguageCode::Russian => "ru",
            LanguageCode::Japanese => "ja",
            LanguageCode::Korean => "ko",
            LanguageCode::Chinese => "zh-CN",
            LanguageCode::Arabic => "ar",
            LanguageCode::Bengali => "bn",
            LanguageCode::Tamil => "ta",
            LanguageCode::Telugu => "te",
            LanguageCode::Urdu => "ur",
        }
    }

    /// English display name
    pub fn name(&self) -> &'static str {
        match self {
            LanguageCode::English => "English",
            LanguageCode::Hindi => "Hindi",
            LanguageCode::Spanish => "Spanish",
            LanguageCode::French => "French",
            LanguageCode::German => "German",
            LanguageCode::Italian => "Italian",
            LanguageCode::Portuguese => "Portuguese",
            LanguageCode::Russian => "Russian",
            LanguageCode::Japanese => "Japanese",
            LanguageCode::Korean => "Korean",
            LanguageCode::Chinese => "Chinese",
            LanguageCode::Arabic => "Arabic",
            LanguageCode::Bengali => "Bengali",
            LanguageCode::Tamil => "Tamil",
            LanguageCode::Telugu => "Telugu",
            LanguageCode::Urdu => "Urdu",
        }
    }

    /// Parse a language tag or English language name, case-insensitively
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        if tag == "zh" {
            return Some(LanguageCode::Chinese);
        }
        ALL_LANGUAGES
            .iter()
            .copied()
            .find(|lang| lang.as_str().to_lowercase() == tag || lang.name().to_lowercase() == tag)
    }

    /// Convert lingua Language to LanguageCode
    pub fn from_lingua(language: Language) -> Self {
        match language {
            Language::English => LanguageCode::English,
            Language::Hindi => LanguageCode::Hindi,
            Language::Spanish => LanguageCode::Spanish,
            Language::French => LanguageCode::French,
            Language::German => LanguageCode::German,
            Language::Italian => LanguageCode::Italian,
            Language::Portuguese => LanguageCode::Portuguese,
            Language::Russian => LanguageCode::Russian,
            Language::Japanese => LanguageCode::Japanese,
            Language::Korean => LanguageCode::Korean,
            Language::Chinese => LanguageCode::Chinese,
            Language::Arabic => LanguageCode::Arabic,
            Language::Bengali => LanguageCode::Bengali,
            Language::Tamil => LanguageCode::Tamil,
            Language::Telugu => LanguageCode::Telugu,
            Language::Urdu => LanguageCode::Urdu,
        }
    }

    fn to_lingua(self) -> Language {
        match self {
            LanguageCode::English => Language::English,
            LanguageCode::Hindi => Language::Hindi,
            LanguageCode::Spanish => Language::Spanish,
            LanguageCode::French => Language::French,
            LanguageCode::German => Language::German,
            LanguageCode::Italian => Language::Italian,
            LanguageCode::Portuguese => Language::Portuguese,
            LanguageCode::Russian => Language::Russian,
            LanguageCode::Japanese => Language::Japanese,
            LanguageCode::Korean => Language::Korean,
            LanguageCode::Chinese => Language::Chinese,
            LanguageCode::Arabic => Language::Arabic,
            LanguageCode::Bengali => Language::Bengali,
            LanguageCode::Tamil => Language::Tamil,
            LanguageCode::Telugu => Language::Telugu,
            LanguageCode::Urdu => Language::Urdu,
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a supported language")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for LanguageCode {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageCode::parse(s).ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}

/// Source language of a translation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    Auto,
    Explicit(LanguageCode),
}

impl SourceLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::Auto => AUTO_DETECT,
            SourceLanguage::Explicit(code) => code.as_str(),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, SourceLanguage::Auto)
    }
}

impl FromStr for SourceLanguage {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.is_empty() || tag.eq_ignore_ascii_case(AUTO_DETECT) {
            return Ok(SourceLanguage::Auto);
        }
        tag.parse().map(SourceLanguage::Explicit)
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Local language detection restricted to the supported languages
pub struct LanguageIdentifier {
    detector: LanguageDetector,
}

impl LanguageIdentifier {
    pub fn new() -> Self {
        let languages: Vec<Language> = ALL_LANGUAGES.iter().map(|l| l.to_lingua()).collect();
        let detector = LanguageDetectorBuilder::from_languages(&languages).build();

        Self { detector }
    }

    pub fn detect(&self, text: &str) -> Option<LanguageCode> {
        self.detector
            .detect_language_of(text)
            .map(LanguageCode::from_lingua)
    }
}

impl Default for LanguageIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

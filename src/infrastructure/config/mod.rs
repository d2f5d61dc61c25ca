use serde::Deserialize;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Translation
    pub translation_api_url: String,
    pub translation_cache_enabled: bool,
    // Speech synthesis
    pub tts_provider: TtsProvider,
    pub google_tts_url: String,
    pub aws_region: String,
    pub openai_api_key: Option<String>,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    pub tts_cache_enabled: bool,
    // Upstream HTTP
    pub upstream_timeout_secs: u64,
    // History
    pub session_idle_minutes: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Google,
    Polly,
    OpenAi,
}

impl TtsProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsProvider::Google => "google",
            TtsProvider::Polly => "polly",
            TtsProvider::OpenAi => "openai",
        }
    }
}

impl FromStr for TtsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(TtsProvider::Google),
            "polly" => Ok(TtsProvider::Polly),
            "openai" => Ok(TtsProvider::OpenAi),
            other => Err(format!(
                "TTS_PROVIDER must be one of google, polly, openai (got '{}')",
                other
            )),
        }
    }
}

pub const DEFAULT_TRANSLATION_API_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_GOOGLE_TTS_URL: &str = "https://translate.google.com/translate_tts";

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let tts_provider: TtsProvider = env::var("TTS_PROVIDER")
            .unwrap_or_else(|_| "google".to_string())
            .parse()?;
        let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());

        if tts_provider == TtsProvider::OpenAi && openai_api_key.is_none() {
            return Err("OPENAI_API_KEY is required when TTS_PROVIDER=openai".into());
        }

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            translation_api_url: env::var("TRANSLATION_API_URL")
                .unwrap_or_else(|_| DEFAULT_TRANSLATION_API_URL.to_string()),
            translation_cache_enabled: parse_flag("TRANSLATION_CACHE_ENABLED"),
            tts_provider,
            google_tts_url: env::var("GOOGLE_TTS_URL")
                .unwrap_or_else(|_| DEFAULT_GOOGLE_TTS_URL.to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            openai_api_key,
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            openai_tts_voice: env::var("OPENAI_TTS_VOICE").unwrap_or_default(),
            tts_cache_enabled: parse_flag("TTS_CACHE_ENABLED"),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            session_idle_minutes: env::var("SESSION_IDLE_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_flag(name: &str) -> bool {
    env::var(name)
        .map(|s| s.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

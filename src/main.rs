use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use speakeasy_backend::controllers::{
    health::Readiness, history::HistoryController, speech::SpeechController,
    translate::TranslateController,
};
use speakeasy_backend::domain::{
    history::{HistoryService, HISTORY_LIMIT},
    language::LanguageIdentifier,
    translation::{TranslationService, TranslationServiceApi},
    tts::{TtsService, TtsServiceApi},
};
use speakeasy_backend::infrastructure::config::{Config, LogFormat, TtsProvider};
use speakeasy_backend::infrastructure::http::{create_router, start_http_server};
use speakeasy_backend::infrastructure::repositories::{
    GoogleTranslationRepository, GoogleTtsRepository, HistoryRepository, OpenAiTtsRepository,
    PollyTtsRepository, TtsRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        development = config.is_development(),
        "Starting SpeakEasy Backend on {}:{}",
        config.host,
        config.port
    );

    // Shared HTTP client for the Google endpoints
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
        .build()?;

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let translation_repo = Arc::new(GoogleTranslationRepository::new(
        http_client.clone(),
        config.translation_api_url.clone(),
    ));
    let tts_repo = create_tts_repository(&config, http_client).await?;
    let history_repo = Arc::new(HistoryRepository::new(
        HISTORY_LIMIT,
        Duration::from_secs(config.session_idle_minutes * 60),
    ));

    // 2. Instantiate services
    tracing::info!("Instantiating services...");
    let identifier = Arc::new(LanguageIdentifier::new());
    let translation_service = Arc::new(TranslationService::new(
        translation_repo,
        identifier.clone(),
        config.translation_cache_enabled,
    ));
    let tts_service = Arc::new(TtsService::new(
        tts_repo,
        identifier,
        config.tts_cache_enabled,
    ));
    let history_service = Arc::new(HistoryService::new(history_repo));

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let readiness = Arc::new(Readiness {
        translation_provider: translation_service.provider(),
        tts_provider: tts_service.provider(),
    });
    let translate_controller = Arc::new(TranslateController::new(
        translation_service,
        tts_service.clone(),
        history_service.clone(),
    ));
    let speech_controller = Arc::new(SpeechController::new(tts_service));
    let history_controller = Arc::new(HistoryController::new(history_service));

    let app = create_router(
        readiness,
        translate_controller,
        speech_controller,
        history_controller,
    );

    start_http_server(config, app).await?;

    Ok(())
}

async fn create_tts_repository(
    config: &Config,
    http_client: reqwest::Client,
) -> Result<Arc<dyn TtsRepository>, Box<dyn std::error::Error>> {
    tracing::info!(provider = config.tts_provider.as_str(), "Initializing TTS provider");

    let repo: Arc<dyn TtsRepository> = match config.tts_provider {
        TtsProvider::Google => Arc::new(GoogleTtsRepository::new(
            http_client,
            config.google_tts_url.clone(),
        )),
        TtsProvider::Polly => {
            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

            let polly_client = aws_sdk_polly::Client::new(&aws_config);
            Arc::new(PollyTtsRepository::new(Arc::new(polly_client)))
        }
        TtsProvider::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or("OPENAI_API_KEY is required when TTS_PROVIDER=openai")?;
            let openai_config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
            let client = async_openai::Client::with_config(openai_config);
            Arc::new(OpenAiTtsRepository::new(
                Arc::new(client),
                config.openai_tts_model.clone(),
                config.openai_tts_voice.clone(),
            ))
        }
    };

    Ok(repo)
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "speakeasy_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

use anyhow::Result;
use axum::Router;
use once_cell::sync::Lazy;
use speakeasy_backend::domain::language::LanguageIdentifier;
use speakeasy_backend::infrastructure::config::{Config, Environment, LogFormat, TtsProvider};
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod api_client;
pub mod mock_upstream;

use api_client::TestClient;
use mock_upstream::MockUpstream;

// Language models are loaded lazily and are expensive, share one detector
static IDENTIFIER: Lazy<Arc<LanguageIdentifier>> = Lazy::new(|| Arc::new(LanguageIdentifier::new()));

pub struct TestContext {
    pub client: TestClient,
    pub upstream: MockUpstream,
    #[allow(dead_code)]
    pub config: Config,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            // Fake Google endpoints for this test only
            let upstream = MockUpstream::start().await;

            // Create test configuration
            let config = Config {
                host: "127.0.0.1".to_string(),
                port: 0, // Will be assigned by the OS
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
                translation_api_url: upstream.translation_url(),
                translation_cache_enabled: false, // Disable caches to count upstream calls
                tts_provider: TtsProvider::Google,
                google_tts_url: upstream.tts_url(),
                aws_region: "us-east-1".to_string(),
                openai_api_key: None,
                openai_tts_model: "tts-1".to_string(),
                openai_tts_voice: String::new(),
                tts_cache_enabled: false,
                upstream_timeout_secs: 5,
                session_idle_minutes: 30,
            };

            let app = create_app(&config).expect("Failed to create app");

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

            Self {
                client: TestClient::new(&base_url),
                upstream,
                config,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Servers stop with the test runtime
        }
    }
}

fn create_app(config: &Config) -> Result<Router> {
    use speakeasy_backend::{
        controllers::{
            health::Readiness, history::HistoryController, speech::SpeechController,
            translate::TranslateController,
        },
        domain::{
            history::{HistoryService, HISTORY_LIMIT},
            translation::{TranslationService, TranslationServiceApi},
            tts::{TtsService, TtsServiceApi},
        },
        infrastructure::{
            http::create_router,
            repositories::{GoogleTranslationRepository, GoogleTtsRepository, HistoryRepository},
        },
    };

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()?;

    // Instantiate repositories
    let translation_repo = Arc::new(GoogleTranslationRepository::new(
        http_client.clone(),
        config.translation_api_url.clone(),
    ));
    let tts_repo = Arc::new(GoogleTtsRepository::new(
        http_client,
        config.google_tts_url.clone(),
    ));
    let history_repo = Arc::new(HistoryRepository::new(
        HISTORY_LIMIT,
        Duration::from_secs(config.session_idle_minutes * 60),
    ));

    // Instantiate services
    let translation_service = Arc::new(TranslationService::new(
        translation_repo,
        IDENTIFIER.clone(),
        config.translation_cache_enabled,
    ));
    let tts_service = Arc::new(TtsService::new(
        tts_repo,
        IDENTIFIER.clone(),
        config.tts_cache_enabled,
    ));
    let history_service = Arc::new(HistoryService::new(history_repo));

    // Instantiate controllers
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

    Ok(create_router(
        readiness,
        translate_controller,
        speech_controller,
        history_controller,
    ))
}

/// Fresh session id for tests that need a stable history
pub fn new_session() -> String {
    uuid::Uuid::new_v4().to_string()
}

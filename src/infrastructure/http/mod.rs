use axum::{
    http::HeaderName,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::controllers::{
    health::{self, Readiness},
    history::HistoryController,
    speech::SpeechController,
    translate::TranslateController,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::session::{
    request_id_middleware, session_middleware, X_REQUEST_ID, X_SESSION_ID,
};

/// Build the application router with every route and middleware layer
pub fn create_router(
    readiness: Arc<Readiness>,
    translate_controller: Arc<TranslateController>,
    speech_controller: Arc<SpeechController>,
    history_controller: Arc<HistoryController>,
) -> Router {
    // Translation routes (session scoped, feed the history)
    let translate_routes = Router::new()
        .route("/api/translate", post(TranslateController::translate))
        .route("/api/languages", get(TranslateController::list_languages))
        .with_state(translate_controller);

    // Speech routes
    let speech_routes = Router::new()
        .route("/api/speech", post(SpeechController::synthesize))
        .with_state(speech_controller);

    // History routes (session scoped)
    let history_routes = Router::new()
        .route(
            "/api/history",
            get(HistoryController::list).delete(HistoryController::clear),
        )
        .with_state(history_controller);

    // Browser clients read the session id back to keep their history
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static(X_SESSION_ID),
            HeaderName::from_static(X_REQUEST_ID),
        ]);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(readiness)
        .merge(translate_routes)
        .merge(speech_routes)
        .merge(history_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware))
                .layer(cors)
                .layer(middleware::from_fn(session_middleware)),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::tts::{SpeechRequest, TtsService, TtsServiceApi},
    error::AppResult,
};

pub struct SpeechController {
    tts_service: Arc<TtsService>,
}

impl SpeechController {
    pub fn new(tts_service: Arc<TtsService>) -> Self {
        Self { tts_service }
    }

    /// POST /api/speech - Convert text to speech
    pub async fn synthesize(
        State(controller): State<Arc<SpeechController>>,
        payload: Result<Json<SpeechRequest>, JsonRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let Json(request) = payload?;
        let language = request.language()?;

        let result = controller
            .tts_service
            .synthesize(&request.text, language)
            .await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
        headers.insert("X-Character-Count", HeaderValue::from(result.char_count));
        headers.insert(
            "X-Language",
            HeaderValue::from_static(result.language.as_str()),
        );
        headers.insert(
            "X-Language-Detected",
            HeaderValue::from_static(if result.language_detected { "true" } else { "false" }),
        );

        Ok((StatusCode::OK, headers, Body::from(result.audio_data)))
    }
}

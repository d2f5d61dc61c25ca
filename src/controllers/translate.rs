use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::join_all;
use std::sync::Arc;

use crate::{
    domain::{
        history::{HistoryService, HistoryServiceApi},
        language::LanguageCode,
        translation::{
            LanguageResponse, TargetTranslationResponse, TranslateRequest, TranslateResponse,
            TranslationOutcome, TranslationService, TranslationServiceApi,
        },
        tts::{TtsService, TtsServiceApi},
    },
    error::AppResult,
    infrastructure::session::SessionId,
};

pub struct TranslateController {
    translation_service: Arc<TranslationService>,
    tts_service: Arc<TtsService>,
    history_service: Arc<HistoryService>,
}

impl TranslateController {
    pub fn new(
        translation_service: Arc<TranslationService>,
        tts_service: Arc<TtsService>,
        history_service: Arc<HistoryService>,
    ) -> Self {
        Self {
            translation_service,
            tts_service,
            history_service,
        }
    }

    /// POST /api/translate - Translate text into one or more languages
    pub async fn translate(
        State(controller): State<Arc<TranslateController>>,
        Extension(session): Extension<SessionId>,
        payload: Result<Json<TranslateRequest>, JsonRejection>,
    ) -> AppResult<Json<TranslateResponse>> {
        let Json(request) = payload?;
        let input = request.to_input()?;

        let outcome = controller.translation_service.translate(input).await?;
        let entry = controller.history_service.record(session.0, &outcome).await;

        let translations = if request.speak {
            controller.with_speech(&outcome).await
        } else {
            outcome
                .translations
                .iter()
                .map(|t| TargetTranslationResponse {
                    target: t.target,
                    text: t.text.clone(),
                    audio: None,
                    speech_error: None,
                })
                .collect()
        };

        Ok(Json(TranslateResponse {
            source: outcome.source.to_string(),
            detected_source: outcome.detected_source.clone(),
            translations,
            history_id: entry.id,
        }))
    }

    /// GET /api/languages - Supported languages
    pub async fn list_languages() -> Json<Vec<LanguageResponse>> {
        Json(
            LanguageCode::all()
                .iter()
                .copied()
                .map(LanguageResponse::from)
                .collect(),
        )
    }

    /// Synthesize every translation; a failed synthesis only affects its own target
    async fn with_speech(&self, outcome: &TranslationOutcome) -> Vec<TargetTranslationResponse> {
        let speech_results = join_all(
            outcome
                .translations
                .iter()
                .map(|t| self.tts_service.synthesize(&t.text, Some(t.target))),
        )
        .await;

        outcome
            .translations
            .iter()
            .zip(speech_results)
            .map(|(translation, speech)| {
                let (audio, speech_error) = match speech {
                    Ok(result) => (Some(STANDARD.encode(&result.audio_data)), None),
                    Err(e) => {
                        tracing::warn!(
                            target_language = %translation.target,
                            error = %e,
                            "Speech synthesis failed for translation"
                        );
                        (None, Some(e.to_string()))
                    }
                };

                TargetTranslationResponse {
                    target: translation.target,
                    text: translation.text.clone(),
                    audio,
                    speech_error,
                }
            })
            .collect()
    }
}

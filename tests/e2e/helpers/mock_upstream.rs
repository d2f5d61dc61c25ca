use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Text that makes the fake upstream answer 429
pub const RATE_LIMITED_TEXT: &str = "trigger rate limit";
/// Text that makes the fake upstream answer 500
pub const FAILING_TEXT: &str = "trigger upstream failure";
/// Text for which the fake upstream reports no detected language
pub const UNDETECTED_TEXT: &str = "The weather is lovely today and we are going to the beach";

pub const MOCK_AUDIO_PREFIX: &[u8] = b"ID3mock-";

#[derive(Default)]
struct Counters {
    translate_calls: AtomicUsize,
    tts_calls: AtomicUsize,
}

/// In-process stand-in for the Google translate and translate_tts endpoints
pub struct MockUpstream {
    pub base_url: String,
    counters: Arc<Counters>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let counters = Arc::new(Counters::default());

        let app = Router::new()
            .route("/translate_a/single", get(translate))
            .route("/translate_tts", get(translate_tts))
            .with_state(counters.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let addr = listener.local_addr().expect("Failed to get mock upstream addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            counters,
        }
    }

    pub fn translation_url(&self) -> String {
        format!("{}/translate_a/single", self.base_url)
    }

    pub fn tts_url(&self) -> String {
        format!("{}/translate_tts", self.base_url)
    }

    pub fn translate_calls(&self) -> usize {
        self.counters.translate_calls.load(Ordering::SeqCst)
    }

    pub fn tts_calls(&self) -> usize {
        self.counters.tts_calls.load(Ordering::SeqCst)
    }
}

/// Fake translation is `[<tl>] <q>`; the detected language is `en` for auto requests
async fn translate(
    State(counters): State<Arc<Counters>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    counters.translate_calls.fetch_add(1, Ordering::SeqCst);

    let q = params.get("q").cloned().unwrap_or_default();
    let sl = params.get("sl").cloned().unwrap_or_else(|| "auto".to_string());
    let tl = params.get("tl").cloned().unwrap_or_default();

    match q.as_str() {
        RATE_LIMITED_TEXT => return StatusCode::TOO_MANY_REQUESTS.into_response(),
        FAILING_TEXT => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded").into_response()
        }
        _ => {}
    }

    let detected = if q == UNDETECTED_TEXT {
        serde_json::Value::Null
    } else if sl == "auto" {
        json!("en")
    } else {
        json!(sl)
    };

    let translated = format!("[{}] {}", tl, q);
    Json(json!([[[translated, q, null, null, 1]], null, detected])).into_response()
}

async fn translate_tts(
    State(counters): State<Arc<Counters>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    counters.tts_calls.fetch_add(1, Ordering::SeqCst);

    let q = params.get("q").cloned().unwrap_or_default();
    if q.contains(FAILING_TEXT) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "speech backend exploded").into_response();
    }

    let tl = params.get("tl").cloned().unwrap_or_default();
    let mut audio = MOCK_AUDIO_PREFIX.to_vec();
    audio.extend_from_slice(tl.as_bytes());

    ([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response()
}

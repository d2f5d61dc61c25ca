use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

pub const X_SESSION_ID: &str = "x-session-id";

/// Browser session the recent-history panel belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

/// Session middleware
///
/// Reuses the session from the `x-session-id` header when it holds a valid
/// UUID, otherwise starts a new one. The session id is always echoed back.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let session_id = request
        .headers()
        .get(X_SESSION_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .unwrap_or_else(|| {
            let session_id = Uuid::new_v4();
            tracing::debug!(session_id = %session_id, "Starting new session");
            session_id
        });

    request.extensions_mut().insert(SessionId(session_id));

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&session_id.to_string()) {
        response.headers_mut().insert(X_SESSION_ID, header_value);
    }

    response
}

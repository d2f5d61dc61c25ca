use axum::{extract::State, http::StatusCode, Extension, Json};
use std::sync::Arc;

use crate::{
    domain::history::{HistoryResponse, HistoryService, HistoryServiceApi},
    infrastructure::session::SessionId,
};

pub struct HistoryController {
    history_service: Arc<HistoryService>,
}

impl HistoryController {
    pub fn new(history_service: Arc<HistoryService>) -> Self {
        Self { history_service }
    }

    /// GET /api/history - Recent translations of the session, newest first
    pub async fn list(
        State(controller): State<Arc<HistoryController>>,
        Extension(session): Extension<SessionId>,
    ) -> Json<HistoryResponse> {
        let entries = controller.history_service.recent(session.0).await;
        Json(HistoryResponse { entries })
    }

    /// DELETE /api/history - Forget the session's history
    pub async fn clear(
        State(controller): State<Arc<HistoryController>>,
        Extension(session): Extension<SessionId>,
    ) -> StatusCode {
        controller.history_service.clear(session.0).await;
        StatusCode::NO_CONTENT
    }
}

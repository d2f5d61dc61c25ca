use super::model::{HistoryEntry, HistoryTranslation};
use crate::domain::translation::TranslationOutcome;
use crate::infrastructure::repositories::HistoryRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct HistoryService {
    history_repo: Arc<HistoryRepository>,
}

impl HistoryService {
    pub fn new(history_repo: Arc<HistoryRepository>) -> Self {
        Self { history_repo }
    }
}

#[async_trait]
pub trait HistoryServiceApi: Send + Sync {
    /// Record a finished translation for the session and return the stored entry
    async fn record(&self, session_id: Uuid, outcome: &TranslationOutcome) -> HistoryEntry;

    /// Most recent entries, newest first
    async fn recent(&self, session_id: Uuid) -> Vec<HistoryEntry>;

    async fn clear(&self, session_id: Uuid);
}

#[async_trait]
impl HistoryServiceApi for HistoryService {
    async fn record(&self, session_id: Uuid, outcome: &TranslationOutcome) -> HistoryEntry {
        let entry = HistoryEntry {
            id: Uuid::new_v4(),
            text: outcome.text.clone(),
            source: outcome.source.to_string(),
            detected_source: outcome.detected_source.clone(),
            translations: outcome
                .translations
                .iter()
                .map(|t| HistoryTranslation {
                    target: t.target.to_string(),
                    text: t.text.clone(),
                })
                .collect(),
            created_at: Utc::now(),
        };

        self.history_repo.push(session_id, entry.clone()).await;
        tracing::debug!(session_id = %session_id, entry_id = %entry.id, "History entry recorded");

        entry
    }

    async fn recent(&self, session_id: Uuid) -> Vec<HistoryEntry> {
        self.history_repo.list(session_id).await
    }

    async fn clear(&self, session_id: Uuid) {
        self.history_repo.clear(session_id).await;
        tracing::debug!(session_id = %session_id, "History cleared");
    }
}

pub mod model;
pub mod service;

pub use model::{HistoryEntry, HistoryTranslation};
pub use service::{HistoryService, HistoryServiceApi};

use serde::{Deserialize, Serialize};

/// Number of recent translations kept per session
pub const HISTORY_LIMIT: usize = 5;

/// Response for GET /api/history
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntry>,
}

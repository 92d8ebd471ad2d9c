//! Play history types

use super::ids::ListenerId;
use serde::{Deserialize, Serialize};

/// Aggregate view of one listener's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub listener_id: ListenerId,
    /// Number of distinct songs in the history
    pub played_count: usize,
    /// Whether a history has ever been created for this listener.
    ///
    /// `false` means the listener never played anything; `true` with a
    /// zero count means the history was cleared.
    pub exists: bool,
}

impl HistorySummary {
    /// Summary for a listener without a history row
    pub fn missing(listener_id: ListenerId) -> Self {
        Self {
            listener_id,
            played_count: 0,
            exists: false,
        }
    }
}

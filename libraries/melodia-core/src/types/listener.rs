//! Listener account types

use super::ids::ListenerId;
use serde::{Deserialize, Serialize};

/// A listener account (owns at most one play history)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listener {
    pub id: ListenerId,
    pub username: String,
    pub created_at: String,
    /// Set whenever a play is recorded
    pub last_played_at: Option<String>,
}

/// Data for creating a new listener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListener {
    pub username: String,
}

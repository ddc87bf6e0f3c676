use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::view_model::ViewModel;

/// State published to the presentation layer after every poll cycle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayState {
    /// Last successfully built view model; kept across failed polls
    pub game_data: Option<Arc<ViewModel>>,

    /// A poll is in flight
    pub loading: bool,

    /// User-facing message for the most recent failure
    pub error: Option<String>,

    /// The most recent poll produced a valid snapshot
    pub is_in_game: bool,

    /// Completion time of the most recent poll that reached the client
    pub last_refresh: Option<DateTime<Utc>>,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            game_data: None,
            loading: true,
            error: None,
            is_in_game: false,
            last_refresh: None,
        }
    }
}

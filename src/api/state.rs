use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::engine::navigation::Navigator;
use crate::ws::WsManager;

// =========================================================================
// Viewer
// =========================================================================

/// One rendered board: its notation and its own navigation state.
#[derive(Clone, Debug)]
pub struct Viewer {
    pub id: String,
    /// Position string as supplied; only the placement field is used.
    pub start: String,
    /// Move text as supplied.
    pub moves_text: String,
    pub navigator: Navigator,
    pub created_at: DateTime<Utc>,
}

impl Viewer {
    /// Create a viewer positioned at the start. A missing id gets a fresh UUID.
    pub fn new(id: Option<String>, start: &str, moves_text: &str) -> Self {
        Viewer {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            start: start.to_string(),
            moves_text: moves_text.to_string(),
            navigator: Navigator::new(start, moves_text),
            created_at: Utc::now(),
        }
    }
}

// =========================================================================
// Shared state
// =========================================================================

/// Viewers stored by id.
pub type BoardStore = RwLock<HashMap<String, Viewer>>;

/// Shared application state passed to all handlers via Axum's State extractor.
pub struct AppState {
    pub boards: BoardStore,
    pub ws: Arc<WsManager>,
    pub config: AppConfig,
    pub start_time: std::time::Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(AppState {
            boards: RwLock::new(HashMap::new()),
            ws: WsManager::new(),
            config,
            start_time: std::time::Instant::now(),
        })
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::movetext::render_movetext;
use crate::engine::navigation::{BoardView, NavCommand};
use crate::lessons::Catalog;

use super::state::Viewer;

// ---------------------------------------------------------------------------
// Request models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    pub id: Option<String>,
    /// Position string; defaults to the standard starting placement.
    pub start: Option<String>,
    #[serde(default)]
    pub moves: String,
}

/// Navigation command body: `{"type": "step_forward"}`,
/// `{"type": "jump", "index": 4}`, `{"type": "jump_to_move", "move": "Nf3"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandRequest {
    StepForward,
    StepBackward,
    Jump {
        index: usize,
    },
    JumpToMove {
        #[serde(rename = "move")]
        notation: String,
    },
}

impl From<CommandRequest> for NavCommand {
    fn from(req: CommandRequest) -> Self {
        match req {
            CommandRequest::StepForward => NavCommand::StepForward,
            CommandRequest::StepBackward => NavCommand::StepBackward,
            CommandRequest::Jump { index } => NavCommand::JumpToIndex(index),
            CommandRequest::JumpToMove { notation } => NavCommand::JumpToMove(notation),
        }
    }
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub language: String,
    pub uptime: u64,
    pub boards: usize,
    pub connections: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Full state of one board instance at its current index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub id: String,
    #[serde(flatten)]
    pub view: BoardView,
    /// Canonical numbered move text, for building clickable move spans.
    pub movetext: String,
    pub start: String,
    pub created_at: DateTime<Utc>,
}

/// Board listing entry; no replay is performed to build it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub id: String,
    pub index: usize,
    pub total: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBoardsResponse {
    pub boards: Vec<BoardSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonsResponse {
    pub catalogs: Vec<Catalog>,
    pub total: usize,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Build the response for a viewer from an already computed view.
pub fn board_response(viewer: &Viewer, view: BoardView) -> BoardResponse {
    BoardResponse {
        id: viewer.id.clone(),
        view,
        movetext: render_movetext(viewer.navigator.moves()),
        start: viewer.start.clone(),
        created_at: viewer.created_at,
    }
}

/// Replay the viewer at its current index and build its response.
pub fn viewer_to_response(viewer: &Viewer) -> BoardResponse {
    board_response(viewer, viewer.navigator.view())
}

pub fn viewer_summary(viewer: &Viewer) -> BoardSummary {
    BoardSummary {
        id: viewer.id.clone(),
        index: viewer.navigator.index(),
        total: viewer.navigator.total(),
        created_at: viewer.created_at,
    }
}

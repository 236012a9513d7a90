use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::{debug, info};

use crate::engine::board::START_PLACEMENT;
use crate::engine::movetext::find_move_index;
use crate::engine::navigation::NavCommand;
use crate::lessons::load_catalogs;
use crate::ws::WsEvent;

use super::errors::ApiError;
use super::models::*;
use super::state::{SharedState, Viewer};

// =========================================================================
// Health
// =========================================================================

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    let boards = state.boards.read().await.len();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        language: "rust".to_string(),
        uptime,
        boards,
        connections: state.ws.total_connections().await,
    })
}

// =========================================================================
// Create Board
// =========================================================================

/// POST /api/boards
pub async fn create_board(
    State(state): State<SharedState>,
    payload: Result<Json<CreateBoardRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BoardResponse>), ApiError> {
    let Json(input) = payload?;
    if let Some(ref id) = input.id {
        validate_id(id)?;
    }
    let start = input.start.as_deref().unwrap_or(START_PLACEMENT);
    let viewer = Viewer::new(input.id, start, &input.moves);

    let mut boards = state.boards.write().await;
    if boards.contains_key(&viewer.id) {
        return Err(ApiError::BoardExists(viewer.id));
    }
    if boards.len() >= state.config.max_boards {
        return Err(ApiError::TooManyBoards(state.config.max_boards));
    }

    let response = viewer_to_response(&viewer);
    if !response.view.board.is_well_formed() {
        debug!(id = %viewer.id, squares = response.view.board.len(), "start position is not 64 squares");
    }
    info!(id = %viewer.id, plies = viewer.navigator.total(), "board created");
    boards.insert(viewer.id.clone(), viewer);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Ids name boards in lesson markup and URLs.
fn validate_id(id: &str) -> Result<(), ApiError> {
    let ok = !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(())
    } else {
        Err(ApiError::InvalidRequest(format!(
            "invalid board id '{id}': use 1-64 letters, digits, '-', '_' or '.'"
        )))
    }
}

// =========================================================================
// List Boards
// =========================================================================

/// GET /api/boards
pub async fn list_boards(State(state): State<SharedState>) -> Json<ListBoardsResponse> {
    let boards = state.boards.read().await;

    let mut viewers: Vec<&Viewer> = boards.values().collect();
    viewers.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

    Json(ListBoardsResponse {
        total: viewers.len(),
        boards: viewers.into_iter().map(viewer_summary).collect(),
    })
}

// =========================================================================
// Get Board
// =========================================================================

/// GET /api/boards/{id}
pub async fn get_board(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<BoardResponse>, ApiError> {
    let boards = state.boards.read().await;
    let viewer = boards
        .get(&id)
        .ok_or_else(|| ApiError::BoardNotFound(id.clone()))?;
    Ok(Json(viewer_to_response(viewer)))
}

// =========================================================================
// Delete Board
// =========================================================================

/// DELETE /api/boards/{id}
pub async fn delete_board(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let mut boards = state.boards.write().await;
    boards
        .remove(&id)
        .ok_or_else(|| ApiError::BoardNotFound(id.clone()))?;

    // Still under the lock: a socket subscribing concurrently either saw the
    // board and gets this event, or finds it gone.
    state.ws.broadcast(&id, WsEvent::board_deleted(&id)).await;
    state.ws.disconnect_all(&id).await;
    drop(boards);
    info!(id = %id, "board deleted");

    Ok(Json(DeleteResponse {
        success: true,
        message: "Board deleted".to_string(),
    }))
}

// =========================================================================
// Navigation
// =========================================================================

/// POST /api/boards/{id}/commands
pub async fn board_command(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<Json<BoardResponse>, ApiError> {
    let Json(input) = payload?;
    let response = dispatch_command(&state, &id, input.into()).await?;
    Ok(Json(response))
}

/// Run a navigation command against one board and broadcast the new view.
///
/// A move lookup that matches nothing leaves the index where it was and is
/// reported as `MoveNotFound`. The broadcast happens under the board write
/// lock, so subscribers receive views in the order the index changed.
pub async fn dispatch_command(
    state: &SharedState,
    id: &str,
    cmd: NavCommand,
) -> Result<BoardResponse, ApiError> {
    let mut boards = state.boards.write().await;
    let viewer = boards
        .get_mut(id)
        .ok_or_else(|| ApiError::BoardNotFound(id.to_string()))?;

    if let NavCommand::JumpToMove(ref text) = cmd
        && find_move_index(viewer.navigator.moves(), text).is_none()
    {
        return Err(ApiError::MoveNotFound(text.clone()));
    }

    debug!(id, command = ?cmd, "dispatching navigation command");
    let view = viewer.navigator.dispatch(cmd);
    let response = board_response(viewer, view);

    state
        .ws
        .broadcast(id, WsEvent::board_view(response.clone()))
        .await;

    Ok(response)
}

// =========================================================================
// Lessons
// =========================================================================

/// GET /api/lessons
pub async fn list_lessons(
    State(state): State<SharedState>,
) -> Result<Json<LessonsResponse>, ApiError> {
    let dir = state.config.lessons_dir.clone();

    // Directory scans are blocking I/O.
    let catalogs = tokio::task::spawn_blocking(move || load_catalogs(&dir))
        .await
        .map_err(|e| ApiError::InternalError(format!("lesson loader panicked: {e}")))??;

    Ok(Json(LessonsResponse {
        total: catalogs.len(),
        catalogs,
    }))
}

// =========================================================================
// Tests
// =========================================================================

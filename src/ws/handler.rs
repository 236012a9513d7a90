//! WebSocket upgrade handler: connects a client to one board's live views
//! via the `WsManager` and accepts navigation commands for that board.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tracing::debug;

use crate::api::handlers::dispatch_command;
use crate::api::models::viewer_to_response;
use crate::api::state::SharedState;

use super::manager::ClientId;
use super::messages::{WsCommand, WsEvent};

/// GET /ws/boards/{id}: upgrade to WebSocket.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(id): Path<String>,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, id, state))
}

/// Core WebSocket session logic.
async fn handle_socket(socket: WebSocket, board_id: String, state: SharedState) {
    // Subscribe while the snapshot's read guard is held, so every later
    // command or deletion reaches this client's queue.
    let subscription = {
        let boards = state.boards.read().await;
        match boards.get(&board_id) {
            Some(viewer) => {
                let event = WsEvent::subscribed(viewer_to_response(viewer));
                Some((event, state.ws.subscribe(&board_id).await))
            }
            None => None,
        }
    };

    let (mut sink, mut stream) = socket.split();
    let Some((initial_event, (client_id, mut rx))) = subscription else {
        let err = WsEvent::error(&format!("board not found: {board_id}"));
        let _ = sink.send(Message::Text(err.to_json().into())).await;
        let _ = sink.close().await;
        return;
    };

    if sink
        .send(Message::Text(initial_event.to_json().into()))
        .await
        .is_err()
    {
        cleanup(&state, &board_id, client_id).await;
        return;
    }

    // Writer task: forward events from the manager to the WS sink. Ends when
    // the manager drops this client (board deleted) or the socket fails.
    let mut writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if sink
                .send(Message::Text(event.to_json().into()))
                .await
                .is_err()
            {
                break;
            }
        }
        let _ = sink.close().await;
    });

    // Reader task: handle client commands.
    let reader_state = state.clone();
    let reader_bid = board_id.clone();
    let mut reader = tokio::spawn(async move {
        while let Some(Ok(msg)) = stream.next().await {
            match msg {
                Message::Text(text) => {
                    handle_client_message(&reader_state, &reader_bid, client_id, &text).await;
                }
                Message::Close(_) => break,
                _ => {} // Binary / Ping / Pong handled by Axum
            }
        }
    });

    tokio::select! {
        _ = &mut writer => { reader.abort(); }
        _ = &mut reader => { writer.abort(); }
    }

    cleanup(&state, &board_id, client_id).await;
}

/// Process a client-sent text message.
///
/// Navigation results go to every subscriber of the board; errors and pongs
/// go back to the sender only.
async fn handle_client_message(
    state: &SharedState,
    board_id: &str,
    client_id: ClientId,
    text: &str,
) {
    let cmd = match serde_json::from_str::<WsCommand>(text) {
        Ok(c) => c,
        Err(e) => {
            debug!(board_id, client_id, "invalid WS command: {e}");
            let err = WsEvent::error(&format!("invalid command: {e}"));
            state.ws.send_to(board_id, client_id, err).await;
            return;
        }
    };

    let Some(nav) = cmd.into_nav() else {
        state.ws.send_to(board_id, client_id, WsEvent::pong()).await;
        return;
    };

    if let Err(err) = dispatch_command(state, board_id, nav).await {
        debug!(board_id, client_id, code = err.code(), "WS command rejected");
        state
            .ws
            .send_to(board_id, client_id, WsEvent::error(&err.message()))
            .await;
    }
}

/// Remove client from the manager.
async fn cleanup(state: &SharedState, board_id: &str, client_id: ClientId) {
    state.ws.unsubscribe(board_id, client_id).await;
    debug!(board_id, client_id, "WS session cleaned up");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! WebSocket message types for live board views.

use serde::{Deserialize, Serialize};

use crate::api::models::BoardResponse;
use crate::engine::navigation::NavCommand;

// ---------------------------------------------------------------------------
// Server → Client events
// ---------------------------------------------------------------------------

/// Envelope sent from server to every subscribed WebSocket client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsEvent {
    /// Discriminator so clients can switch on event type.
    #[serde(rename = "type")]
    pub event_type: WsEventType,
    /// Event-specific payload.
    #[serde(flatten)]
    pub payload: WsPayload,
}

/// Event type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WsEventType {
    Subscribed,
    BoardView,
    BoardDeleted,
    Error,
    Pong,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum WsPayload {
    View(Box<BoardResponse>),
    BoardDeleted(BoardDeletedPayload),
    Error(ErrorPayload),
    Pong(PongPayload),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDeletedPayload {
    pub board_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PongPayload {
    pub timestamp: i64,
}

// ---------------------------------------------------------------------------
// Client → Server commands
// ---------------------------------------------------------------------------

/// Commands sent from client to server over WebSocket. The board is the one
/// named in the connection URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsCommand {
    StepForward,
    StepBackward,
    Jump {
        index: usize,
    },
    JumpToMove {
        #[serde(rename = "move")]
        notation: String,
    },
    Ping,
}

impl WsCommand {
    /// The navigation command carried, if any.
    pub fn into_nav(self) -> Option<NavCommand> {
        match self {
            WsCommand::StepForward => Some(NavCommand::StepForward),
            WsCommand::StepBackward => Some(NavCommand::StepBackward),
            WsCommand::Jump { index } => Some(NavCommand::JumpToIndex(index)),
            WsCommand::JumpToMove { notation } => Some(NavCommand::JumpToMove(notation)),
            WsCommand::Ping => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

impl WsEvent {
    pub fn subscribed(view: BoardResponse) -> Self {
        WsEvent {
            event_type: WsEventType::Subscribed,
            payload: WsPayload::View(Box::new(view)),
        }
    }

    pub fn board_view(view: BoardResponse) -> Self {
        WsEvent {
            event_type: WsEventType::BoardView,
            payload: WsPayload::View(Box::new(view)),
        }
    }

    pub fn board_deleted(board_id: &str) -> Self {
        WsEvent {
            event_type: WsEventType::BoardDeleted,
            payload: WsPayload::BoardDeleted(BoardDeletedPayload {
                board_id: board_id.to_string(),
            }),
        }
    }

    pub fn error(message: &str) -> Self {
        WsEvent {
            event_type: WsEventType::Error,
            payload: WsPayload::Error(ErrorPayload {
                message: message.to_string(),
            }),
        }
    }

    pub fn pong() -> Self {
        WsEvent {
            event_type: WsEventType::Pong,
            payload: WsPayload::Pong(PongPayload {
                timestamp: chrono::Utc::now().timestamp_millis(),
            }),
        }
    }

    /// Serialize to JSON text for sending over WebSocket.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"type":"error","message":"serialization failed"}"#.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::viewer_to_response;
    use crate::api::state::Viewer;
    use crate::engine::board::START_PLACEMENT;

    fn parse(evt: &WsEvent) -> serde_json::Value {
        serde_json::from_str(&evt.to_json()).unwrap()
    }

    fn sample_view() -> BoardResponse {
        let viewer = Viewer::new(Some("b1".into()), START_PLACEMENT, "1. e4 e5");
        viewer_to_response(&viewer)
    }

    #[test]
    fn board_view_event_serializes() {
        let parsed = parse(&WsEvent::board_view(sample_view()));
        assert_eq!(parsed["type"], "board_view");
        assert_eq!(parsed["id"], "b1");
        assert_eq!(parsed["index"], 0);
        assert_eq!(parsed["total"], 2);
        assert_eq!(parsed["movetext"], "1. e4 e5");
        assert_eq!(parsed["board"].as_array().unwrap().len(), 64);
    }

    #[test]
    fn subscribed_event_serializes() {
        let parsed = parse(&WsEvent::subscribed(sample_view()));
        assert_eq!(parsed["type"], "subscribed");
        assert_eq!(parsed["id"], "b1");
        assert_eq!(parsed["sideToMove"], "white");
    }

    #[test]
    fn board_deleted_event_serializes() {
        let parsed = parse(&WsEvent::board_deleted("b1"));
        assert_eq!(parsed["type"], "board_deleted");
        assert_eq!(parsed["boardId"], "b1");
    }

    #[test]
    fn error_event_serializes() {
        let parsed = parse(&WsEvent::error("something went wrong"));
        assert_eq!(parsed["type"], "error");
        assert_eq!(parsed["message"], "something went wrong");
    }

    #[test]
    fn pong_event_serializes() {
        let parsed = parse(&WsEvent::pong());
        assert_eq!(parsed["type"], "pong");
        assert!(parsed["timestamp"].is_number());
    }

    #[test]
    fn ws_commands_deserialize() {
        let cmd: WsCommand = serde_json::from_str(r#"{"type":"step_forward"}"#).unwrap();
        assert_eq!(cmd.into_nav(), Some(NavCommand::StepForward));

        let cmd: WsCommand = serde_json::from_str(r#"{"type":"jump","index":5}"#).unwrap();
        assert_eq!(cmd.into_nav(), Some(NavCommand::JumpToIndex(5)));

        let cmd: WsCommand =
            serde_json::from_str(r#"{"type":"jump_to_move","move":"3... a6"}"#).unwrap();
        assert_eq!(cmd.into_nav(), Some(NavCommand::JumpToMove("3... a6".into())));
    }

    #[test]
    fn ping_carries_no_navigation() {
        let cmd: WsCommand = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert_eq!(cmd, WsCommand::Ping);
        assert_eq!(cmd.into_nav(), None);
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(serde_json::from_str::<WsCommand>(r#"{"type":"castle"}"#).is_err());
    }
}

pub mod apply;
pub mod board;
pub mod diff;
pub mod movetext;
pub mod navigation;
pub mod notation;
pub mod reach;
pub mod types;

pub use apply::{apply_move, try_apply_move};
pub use board::{Board, START_PLACEMENT};
pub use diff::{Highlight, diff};
pub use movetext::{find_move_index, render_movetext, tokenize};
pub use navigation::{BoardView, NavCommand, Navigator, Replay, replay};
pub use notation::{MoveToken, NotationError, parse_move};
pub use types::*;

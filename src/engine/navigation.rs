//! Navigation through a notated game.
//!
//! A `Navigator` owns one board instance's move list and current index.
//! Every index change rebuilds the displayed board by replaying the moves
//! from the starting position; nothing is undone incrementally.

use serde::Serialize;
use tracing::debug;

use crate::engine::apply::apply_move;
use crate::engine::board::Board;
use crate::engine::diff::{Highlight, diff};
use crate::engine::movetext::{find_move_index, tokenize};
use crate::engine::types::Color;

// =========================================================================
// Commands
// =========================================================================

/// A navigation request, whatever input produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavCommand {
    /// One ply forward; wraps to the start after the last move.
    StepForward,
    /// One ply back; stays at the start.
    StepBackward,
    /// Show the position after `n` plies (clamped to the move count).
    JumpToIndex(usize),
    /// Show the position after the first move matching this notation.
    JumpToMove(String),
}

// =========================================================================
// Replay
// =========================================================================

/// The board after a replay and the board one ply earlier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replay {
    pub board: Board,
    pub prev: Board,
}

/// Apply `moves[..index]` to `start`, white first.
///
/// `index` past the end is treated as the end. At index 0 both boards are
/// the starting board.
pub fn replay(start: &Board, moves: &[String], index: usize) -> Replay {
    let index = index.min(moves.len());
    let mut board = start.clone();
    let mut prev = start.clone();

    for (ply, token) in moves[..index].iter().enumerate() {
        let next = apply_move(&board, token, Color::for_ply(ply));
        prev = std::mem::replace(&mut board, next);
    }

    Replay { board, prev }
}

// =========================================================================
// View
// =========================================================================

/// What a renderer needs to draw one navigation state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    /// Plies applied.
    pub index: usize,
    /// Plies in the move list.
    pub total: usize,
    pub board: Board,
    pub highlight: Highlight,
    /// Side to play the next ply.
    pub side_to_move: Color,
    /// The token that produced this board, if any.
    pub last_move: Option<String>,
}

// =========================================================================
// Navigator
// =========================================================================

/// Per-instance navigation state over a fixed move list.
#[derive(Clone, Debug)]
pub struct Navigator {
    start: Board,
    moves: Vec<String>,
    index: usize,
}

impl Navigator {
    /// Build from a placement string and raw move text, positioned at the start.
    pub fn new(start_placement: &str, moves_text: &str) -> Self {
        Self::from_parts(Board::from_placement(start_placement), tokenize(moves_text))
    }

    pub fn from_parts(start: Board, moves: Vec<String>) -> Self {
        Self {
            start,
            moves,
            index: 0,
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of plies in the move list.
    pub fn total(&self) -> usize {
        self.moves.len()
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn start(&self) -> &Board {
        &self.start
    }

    // -----------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------

    /// Apply a command and return the resulting view.
    pub fn dispatch(&mut self, cmd: NavCommand) -> BoardView {
        self.index = self.target_index(&cmd);
        self.view()
    }

    fn target_index(&self, cmd: &NavCommand) -> usize {
        let total = self.total();
        match cmd {
            NavCommand::StepForward if self.index < total => self.index + 1,
            NavCommand::StepForward => 0,
            NavCommand::StepBackward => self.index.saturating_sub(1),
            NavCommand::JumpToIndex(n) => (*n).min(total),
            NavCommand::JumpToMove(text) => match find_move_index(&self.moves, text) {
                Some(i) => i + 1,
                None => {
                    debug!(text = %text, "no move matches; index unchanged");
                    self.index
                }
            },
        }
    }

    /// Replay to the current index and describe the result.
    pub fn view(&self) -> BoardView {
        let Replay { board, prev } = replay(&self.start, &self.moves, self.index);
        let highlight = if self.index == 0 {
            Highlight::default()
        } else {
            diff(&prev, &board)
        };

        BoardView {
            index: self.index,
            total: self.total(),
            board,
            highlight,
            side_to_move: Color::for_ply(self.index),
            last_move: self
                .index
                .checked_sub(1)
                .and_then(|i| self.moves.get(i))
                .cloned(),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

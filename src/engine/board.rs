//! Array-based board state and the piece-placement decoder.
//!
//! `Board` is a plain value: a sequence of square contents in diagram order
//! (a8 first, h1 last). Boards are never mutated once handed out; every move
//! produces a fresh copy.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::engine::types::{Color, Piece, PieceType, Square};

/// Piece placement of the standard starting position.
pub const START_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// Square contents in diagram order.
///
/// A well-formed board holds exactly 64 entries. The decoder does not
/// enforce that: a malformed placement string yields a shorter or longer
/// board, and every accessor tolerates that by treating missing squares as
/// empty and ignoring writes past the end.
///
/// Serializes as the plain list of squares, `null` for empty.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Board {
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// A board with 64 empty squares.
    pub fn empty() -> Self {
        Board {
            squares: vec![None; Square::NUM],
        }
    }

    /// Standard starting position.
    pub fn starting() -> Self {
        Self::from_placement(START_PLACEMENT)
    }

    /// Build a board directly from square contents.
    pub fn from_squares(squares: Vec<Option<Piece>>) -> Self {
        Board { squares }
    }

    // -----------------------------------------------------------------------
    // Decoding / encoding
    // -----------------------------------------------------------------------

    /// Decode the piece-placement field of a position string.
    ///
    /// Only the first whitespace-separated field is read; side to move and
    /// the other trailing fields are ignored. Ranks are separated by `/`,
    /// a digit `n` expands to `n` empty squares and a piece letter fills one
    /// square (uppercase white, lowercase black). The total square count is
    /// not checked.
    pub fn from_placement(text: &str) -> Self {
        let placement = text.split_whitespace().next().unwrap_or("");
        let mut squares = Vec::with_capacity(Square::NUM);

        for rank in placement.split('/') {
            for ch in rank.chars() {
                if let Some(run) = ch.to_digit(10) {
                    squares.extend(std::iter::repeat_n(None, run as usize));
                } else if let Some(piece) = Piece::from_char(ch) {
                    squares.push(Some(piece));
                } else {
                    // Keeps the square count aligned with the symbol count.
                    debug!(symbol = %ch, "unknown placement symbol treated as empty square");
                    squares.push(None);
                }
            }
        }

        Board { squares }
    }

    /// Encode as a piece-placement field (`rnbqkbnr/pppppppp/8/...`).
    ///
    /// Rank separators are emitted every eight squares, so a board of the
    /// wrong length encodes with a short or extra final rank.
    pub fn to_placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for (rank_idx, rank) in self.squares.chunks(8).enumerate() {
            if rank_idx > 0 {
                out.push('/');
            }
            let mut empty_count = 0u8;
            for cell in rank {
                match cell {
                    Some(piece) => {
                        if empty_count > 0 {
                            out.push((b'0' + empty_count) as char);
                            empty_count = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                out.push((b'0' + empty_count) as char);
            }
        }
        out
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Number of squares held. 64 unless decoded from a malformed string.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Whether the board has the full 64 squares.
    pub fn is_well_formed(&self) -> bool {
        self.squares.len() == Square::NUM
    }

    /// Contents of `sq`; squares past the end read as empty.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.at_index(sq.index())
    }

    /// Contents at a raw index; out-of-range reads as empty.
    #[inline]
    pub fn at_index(&self, index: usize) -> Option<Piece> {
        self.squares.get(index).copied().flatten()
    }

    /// Squares holding exactly `piece`, in ascending index order.
    pub fn squares_of(&self, piece: Piece) -> impl Iterator<Item = Square> + '_ {
        self.squares
            .iter()
            .take(Square::NUM)
            .enumerate()
            .filter(move |(_, cell)| **cell == Some(piece))
            .map(|(i, _)| Square(i as u8))
    }

    /// Raw square contents.
    pub fn cells(&self) -> &[Option<Piece>] {
        &self.squares
    }

    /// Count of pieces of `kind` for `color`.
    pub fn count(&self, color: Color, kind: PieceType) -> usize {
        self.squares_of(Piece::new(color, kind)).count()
    }

    // -----------------------------------------------------------------------
    // Construction helpers
    // -----------------------------------------------------------------------

    /// Copy of this board with `sq` set to `content`.
    pub fn with(&self, sq: Square, content: Option<Piece>) -> Self {
        let mut next = self.clone();
        next.set(sq, content);
        next
    }

    /// Write a square. Writes past the end of a short board are dropped.
    pub(crate) fn set(&mut self, sq: Square, content: Option<Piece>) {
        if let Some(cell) = self.squares.get_mut(sq.index()) {
            *cell = content;
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 1..=8u8 {
            write!(f, "  {} ", 9 - rank)?;
            for file in 0..8u8 {
                let sq = Square::from_file_rank(file, 9 - rank);
                let ch = self.piece_at(sq).map_or('.', Piece::to_char);
                write!(f, "{ch}")?;
                if file < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

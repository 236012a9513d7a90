//! Highlighting: which squares changed between two consecutive boards.

use serde::Serialize;

use crate::engine::board::Board;
use crate::engine::types::Square;

/// The origin and destination squares of the last change.
///
/// Both are `None` when nothing changed (the starting position, or a move
/// that could not be applied).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub from: Option<Square>,
    pub to: Option<Square>,
}

impl Highlight {
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Compare two boards square by square.
///
/// A square that was occupied and is now empty is an origin; a square whose
/// contents changed to a piece (including a capture) is a destination. Only
/// one pair is reported, so when several squares change (castling, en
/// passant) the highest-indexed origin and destination win.
pub fn diff(prev: &Board, next: &Board) -> Highlight {
    let mut highlight = Highlight::default();

    for sq in (0..Square::NUM as u8).map(Square) {
        let before = prev.piece_at(sq);
        let after = next.piece_at(sq);
        if before == after {
            continue;
        }
        match after {
            None => highlight.from = Some(sq),
            Some(_) => highlight.to = Some(sq),
        }
    }

    highlight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::apply::apply_move;
    use crate::engine::types::Color;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn identical_boards_have_no_highlight() {
        let b = Board::starting();
        let h = diff(&b, &b);
        assert!(h.is_empty());
        assert_eq!(h, Highlight::default());
    }

    #[test]
    fn pawn_push() {
        let prev = Board::starting();
        let next = apply_move(&prev, "e4", Color::White);
        assert_eq!(
            diff(&prev, &next),
            Highlight {
                from: Some(sq("e2")),
                to: Some(sq("e4")),
            }
        );
    }

    #[test]
    fn capture_counts_as_destination() {
        let prev = Board::from_placement("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR");
        let next = apply_move(&prev, "exd5", Color::White);
        let h = diff(&prev, &next);
        assert_eq!(h.from, Some(sq("e4")));
        assert_eq!(h.to, Some(sq("d5")));
    }

    #[test]
    fn castling_reports_a_single_pair() {
        let prev = Board::from_placement("4k3/8/8/8/8/8/8/4K2R");
        let next = apply_move(&prev, "O-O", Color::White);
        // e1 and h1 empty out, f1 and g1 fill; the later index of each wins.
        assert_eq!(
            diff(&prev, &next),
            Highlight {
                from: Some(sq("h1")),
                to: Some(sq("g1")),
            }
        );
    }

    #[test]
    fn serializes_as_square_names() {
        let h = Highlight {
            from: Some(sq("g1")),
            to: Some(sq("f3")),
        };
        let json = serde_json::to_value(h).unwrap();
        assert_eq!(json, serde_json::json!({"from": "g1", "to": "f3"}));
        let json = serde_json::to_value(Highlight::default()).unwrap();
        assert_eq!(json, serde_json::json!({"from": null, "to": null}));
    }
}

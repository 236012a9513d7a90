//! Move application: one token against one board, producing the next board.
//!
//! The applier trusts the notation. It does not generate moves or test
//! legality; it finds a piece of the named kind and color that passes the
//! token's disambiguation filter and moves it. Among those, pieces whose
//! movement shape reaches the destination come first, and ties go to the
//! lowest board index.

use tracing::debug;

use crate::engine::board::Board;
use crate::engine::notation::{MoveToken, NotationError, PieceMove, parse_move};
use crate::engine::reach::reaches;
use crate::engine::types::{CastleSide, Color, Piece, PieceType, Square};

/// Apply `token` for `side`, returning the resulting board.
///
/// Never fails: a token that names no destination or matches no piece
/// leaves the board unchanged. Use [`try_apply_move`] to see why.
pub fn apply_move(board: &Board, token: &str, side: Color) -> Board {
    match try_apply_move(board, token, side) {
        Ok(next) => next,
        Err(err) => {
            debug!(token, %side, error = %err, "move left the board unchanged");
            board.clone()
        }
    }
}

/// Apply `token` for `side`, reporting why nothing could be moved.
///
/// The input board is never modified.
pub fn try_apply_move(board: &Board, token: &str, side: Color) -> Result<Board, NotationError> {
    match parse_move(token)? {
        MoveToken::Castle(castle) => Ok(castle_move(board, castle, side)),
        MoveToken::Piece(pm) => piece_move(board, token, &pm, side),
    }
}

/// Castling is a fixed lookup: the king and rook land on their castled
/// squares whatever the board holds.
fn castle_move(board: &Board, castle: CastleSide, side: Color) -> Board {
    let (king_from, rook_from, king_to, rook_to) = castle.squares(side);
    let mut next = board.clone();
    next.set(king_from, None);
    next.set(rook_from, None);
    next.set(king_to, Some(Piece::new(side, PieceType::King)));
    next.set(rook_to, Some(Piece::new(side, PieceType::Rook)));
    next
}

fn piece_move(
    board: &Board,
    token: &str,
    pm: &PieceMove,
    side: Color,
) -> Result<Board, NotationError> {
    let mover = Piece::new(side, pm.kind);
    let filter = pm.origin_filter();

    let candidates: Vec<Square> = board
        .squares_of(mover)
        .filter(|&sq| filter.matches(sq))
        .collect();

    // Prefer a piece whose movement can reach the destination; otherwise the
    // lowest-indexed match moves anyway.
    let from = match candidates
        .iter()
        .copied()
        .find(|&sq| reaches(board, mover, sq, pm.dest, pm.capture))
    {
        Some(sq) => sq,
        None => {
            let sq = candidates
                .first()
                .copied()
                .ok_or_else(|| NotationError::NoCandidate {
                    token: token.to_string(),
                    color: side,
                    kind: pm.kind,
                })?;
            debug!(token, from = %sq, "no candidate reaches the destination; using lowest index");
            sq
        }
    };

    let mut next = board.clone();

    if let Some(victim) = en_passant_victim(board, pm, side) {
        next.set(victim, None);
    }

    let landing = pm.promotion.map_or(mover, |kind| Piece::new(side, kind));
    next.set(from, None);
    next.set(pm.dest, Some(landing));
    Ok(next)
}

/// Square of the pawn taken en passant, if this capture is one.
///
/// A pawn capture onto an empty square with an enemy pawn directly behind
/// the destination (from the mover's point of view) takes that pawn. The
/// previous ply is not checked.
fn en_passant_victim(board: &Board, pm: &PieceMove, side: Color) -> Option<Square> {
    if pm.kind != PieceType::Pawn || !pm.capture || board.piece_at(pm.dest).is_some() {
        return None;
    }
    let behind = match side {
        Color::White => pm.dest.index() + 8,
        Color::Black => pm.dest.index().checked_sub(8)?,
    };
    let behind = Square::from_index(behind)?;
    (board.piece_at(behind) == Some(Piece::new(!side, PieceType::Pawn))).then_some(behind)
}

// =========================================================================
// Tests
// =========================================================================

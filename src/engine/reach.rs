//! Movement geometry: whether a piece standing on one square could travel to
//! another on a given board.
//!
//! This is shape only. It ignores checks, pins, castling rights, the colour
//! of whatever stands on the target square, and the previous ply.

use crate::engine::board::Board;
use crate::engine::types::{Color, Piece, PieceType, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const ROOK_DELTAS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DELTAS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Whether `piece` on `from` can move to `to`.
///
/// `capture` selects between a pawn's diagonal step and its straight
/// advance; other pieces move the same either way.
pub fn reaches(board: &Board, piece: Piece, from: Square, to: Square, capture: bool) -> bool {
    if from == to {
        return false;
    }
    let dr = to.rank() as i8 - from.rank() as i8;
    let df = to.file() as i8 - from.file() as i8;

    match piece.kind {
        PieceType::Knight => KNIGHT_OFFSETS.contains(&(dr, df)),
        PieceType::King => dr.abs() <= 1 && df.abs() <= 1,
        PieceType::Rook => slides(board, from, dr, df, &ROOK_DELTAS),
        PieceType::Bishop => slides(board, from, dr, df, &BISHOP_DELTAS),
        PieceType::Queen => {
            slides(board, from, dr, df, &ROOK_DELTAS) || slides(board, from, dr, df, &BISHOP_DELTAS)
        }
        PieceType::Pawn => pawn_reaches(board, piece.color, from, dr, df, capture),
    }
}

/// Walk the ray from `from` along whichever delta points at the target,
/// requiring every square strictly between to be empty.
fn slides(board: &Board, from: Square, dr: i8, df: i8, deltas: &[(i8, i8)]) -> bool {
    let steps = dr.abs().max(df.abs());
    let Some(&(sr, sf)) = deltas
        .iter()
        .find(|&&(sr, sf)| sr * steps == dr && sf * steps == df)
    else {
        return false;
    };

    let (rank, file) = (from.rank() as i8, from.file() as i8);
    (1..steps).all(|k| {
        let sq = Square::from_file_rank((file + sf * k) as u8, (rank + sr * k) as u8);
        board.piece_at(sq).is_none()
    })
}

fn pawn_reaches(board: &Board, color: Color, from: Square, dr: i8, df: i8, capture: bool) -> bool {
    let forward: i8 = match color {
        Color::White => 1,
        Color::Black => -1,
    };
    if capture {
        return dr == forward && df.abs() == 1;
    }
    if df != 0 {
        return false;
    }
    if dr == forward {
        return true;
    }

    // Double step from the pawn's home rank over an empty square.
    let home_rank = match color {
        Color::White => 2,
        Color::Black => 7,
    };
    if dr != 2 * forward || from.rank() != home_rank {
        return false;
    }
    let passed = Square::from_file_rank(from.file(), (from.rank() as i8 + forward) as u8);
    board.piece_at(passed).is_none()
}

//! Structural parsing of a single algebraic move token.
//!
//! Token examples: `e4`, `Nf3`, `exd5`, `Rdd5`, `Qh4xe1`, `e8=Q+`, `O-O`,
//! `0-0-0`. Parsing looks only at the text; which piece actually moves is
//! decided later against a concrete board (see [`crate::engine::apply`]).

use crate::engine::types::{CastleSide, Color, PieceType, Square};

// =========================================================================
// Errors
// =========================================================================

/// Why a move token could not be turned into a board change.
///
/// These never reach navigation callers: the applier logs them and leaves
/// the board unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("empty move token")]
    Empty,

    #[error("no destination square in '{0}'")]
    NoDestination(String),

    #[error("invalid promotion suffix '={suffix}' in '{token}'")]
    InvalidPromotion { token: String, suffix: String },

    #[error("disambiguator '{disambiguator}' in '{token}' is not a square")]
    InvalidDisambiguator {
        token: String,
        disambiguator: String,
    },

    #[error("no {color} {kind} matches '{token}'")]
    NoCandidate {
        token: String,
        color: Color,
        kind: PieceType,
    },
}

// =========================================================================
// Parsed token
// =========================================================================

/// Fragment distinguishing between several pieces of the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disambiguator {
    None,
    /// File 0..7.
    File(u8),
    /// Rank 1..8.
    Rank(u8),
    Square(Square),
}

impl Disambiguator {
    /// Whether a piece standing on `sq` passes this filter.
    pub fn matches(self, sq: Square) -> bool {
        match self {
            Disambiguator::None => true,
            Disambiguator::File(f) => sq.file() == f,
            Disambiguator::Rank(r) => sq.rank() == r,
            Disambiguator::Square(s) => sq == s,
        }
    }
}

/// Any non-castling move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceMove {
    pub kind: PieceType,
    pub disambiguator: Disambiguator,
    pub capture: bool,
    pub dest: Square,
    pub promotion: Option<PieceType>,
}

impl PieceMove {
    /// Disambiguator used to pick the moving piece.
    ///
    /// A pawn push names no origin, but a pawn that does not capture stays on
    /// its file, so the destination file narrows the candidates.
    pub fn origin_filter(&self) -> Disambiguator {
        match self.disambiguator {
            Disambiguator::None if self.kind == PieceType::Pawn && !self.capture => {
                Disambiguator::File(self.dest.file())
            }
            d => d,
        }
    }
}

/// A move token after structural parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveToken {
    Castle(CastleSide),
    Piece(PieceMove),
}

// =========================================================================
// Parsing
// =========================================================================

/// Strip trailing check, mate and annotation marks (`+`, `#`, `!`, `?`).
pub fn strip_decorations(token: &str) -> &str {
    token.trim_end_matches(['+', '#', '!', '?'])
}

/// Parse one move token.
pub fn parse_move(token: &str) -> Result<MoveToken, NotationError> {
    let stripped = strip_decorations(token.trim());

    match stripped {
        "O-O" | "0-0" => return Ok(MoveToken::Castle(CastleSide::Kingside)),
        "O-O-O" | "0-0-0" => return Ok(MoveToken::Castle(CastleSide::Queenside)),
        "" => return Err(NotationError::Empty),
        _ => {}
    }

    // Promotion suffix: the first letter after '=' names the new piece.
    let (core, promotion) = match stripped.split_once('=') {
        Some((core, suffix)) => {
            let piece = suffix.chars().next().and_then(PieceType::from_letter);
            match piece {
                Some(pt) => (core, Some(pt)),
                None => {
                    return Err(NotationError::InvalidPromotion {
                        token: token.to_string(),
                        suffix: suffix.to_string(),
                    });
                }
            }
        }
        None => (stripped, None),
    };

    // Destination: the file+rank pair ending the core.
    let bytes = core.as_bytes();
    let dest = match bytes {
        [.., file, rank] => Square::from_bytes(*file, *rank),
        _ => None,
    }
    .ok_or_else(|| NotationError::NoDestination(token.to_string()))?;

    // Leading piece letter; absent means a pawn.
    let (kind, body) = match core.chars().next().and_then(PieceType::from_move_letter) {
        Some(pt) => (pt, &core[1..]),
        None => (PieceType::Pawn, core),
    };

    let capture = core.contains('x');
    let disambiguator = parse_disambiguator(token, body)?;

    Ok(MoveToken::Piece(PieceMove {
        kind,
        disambiguator,
        capture,
        dest,
        promotion,
    }))
}

/// Read the fragment between the piece letter and the destination.
///
/// `body` is the token core without its piece letter and still ends with the
/// destination square. The fragment is up to two file/rank characters
/// optionally followed by `x`; anything else carries no disambiguation.
fn parse_disambiguator(token: &str, body: &str) -> Result<Disambiguator, NotationError> {
    // The last two bytes are the ASCII destination square.
    let prefix = &body[..body.len().saturating_sub(2)];
    let prefix = prefix.strip_suffix('x').unwrap_or(prefix);

    let well_formed = prefix.len() <= 2
        && prefix
            .bytes()
            .all(|b| (b'a'..=b'h').contains(&b) || (b'1'..=b'8').contains(&b));
    if !well_formed {
        return Ok(Disambiguator::None);
    }

    match prefix.as_bytes() {
        [] => Ok(Disambiguator::None),
        [c @ b'a'..=b'h'] => Ok(Disambiguator::File(c - b'a')),
        [c] => Ok(Disambiguator::Rank(c - b'0')),
        [file, rank] => Square::from_bytes(*file, *rank)
            .map(Disambiguator::Square)
            .ok_or_else(|| NotationError::InvalidDisambiguator {
                token: token.to_string(),
                disambiguator: prefix.to_string(),
            }),
        _ => Ok(Disambiguator::None),
    }
}

// =========================================================================
// Tests
// =========================================================================

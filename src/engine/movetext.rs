//! Move text: tokenizing a game's notation and rendering it back.
//!
//! Input looks like `1.e4 e5 2.Nf3 Nc6` or `1. e4 e5 2. Nf3 Nc6 3. Bb5 a6`;
//! black continuations may carry `12...` prefixes.

use crate::engine::notation::strip_decorations;

// =========================================================================
// Tokenizing
// =========================================================================

/// Split move text into move tokens.
///
/// Move-number prefixes (`12.`, `12...`) are stripped wherever a
/// whitespace-separated word starts with one, and empty words are dropped.
/// Tokens are not validated here.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(strip_move_number)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove a leading `<digits>.` or `<digits>...` from a word.
///
/// Words that start with digits not followed by a dot (`1-0`, `0-0`) are
/// left alone.
fn strip_move_number(word: &str) -> &str {
    let rest = word.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == word.len() || !rest.starts_with('.') {
        return word;
    }
    rest.trim_start_matches('.')
}

// =========================================================================
// Lookup
// =========================================================================

/// Find the first move matching a piece of notation clicked in lesson text.
///
/// `text` may carry a move number (`"12. Nf3+"`, `"3... exd4"`) and check
/// or annotation marks; both sides of the comparison have their marks
/// stripped. Returns the index of the first matching token.
pub fn find_move_index(moves: &[String], text: &str) -> Option<usize> {
    let needle = strip_decorations(strip_move_number(text.trim()).trim());
    if needle.is_empty() {
        return None;
    }
    moves
        .iter()
        .position(|m| strip_decorations(m) == needle)
}

// =========================================================================
// Rendering
// =========================================================================

/// Render tokens as numbered move text: `1. e4 e5 2. Nf3 Nc6`.
pub fn render_movetext(moves: &[String]) -> String {
    let mut out = String::with_capacity(moves.len() * 6);

    for (ply, token) in moves.iter().enumerate() {
        if ply > 0 {
            out.push(' ');
        }
        if ply % 2 == 0 {
            out.push_str(&format!("{}. ", ply / 2 + 1));
        }
        out.push_str(token);
    }

    out
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn tokenize_compact_numbers() {
        assert_eq!(tokenize("1.e4 e5 2.Nf3 Nc6"), strings(&["e4", "e5", "Nf3", "Nc6"]));
    }

    #[test]
    fn tokenize_spaced_numbers_and_newlines() {
        let text = "1. e4 e5\n2. Nf3  Nc6\t3. Bb5 a6\n";
        assert_eq!(
            tokenize(text),
            strings(&["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"])
        );
    }

    #[test]
    fn tokenize_black_continuation() {
        assert_eq!(tokenize("12...Nf6 13. O-O"), strings(&["Nf6", "O-O"]));
        assert_eq!(tokenize("12... Nf6"), strings(&["Nf6"]));
    }

    #[test]
    fn tokenize_keeps_castling_digits_and_results() {
        assert_eq!(
            tokenize("1. 0-0 0-0-0 1-0"),
            strings(&["0-0", "0-0-0", "1-0"])
        );
    }

    #[test]
    fn tokenize_empty_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n 1. ").is_empty());
    }

    #[test]
    fn find_move_strips_number_and_marks() {
        let moves = strings(&["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Bxc6+"]);
        assert_eq!(find_move_index(&moves, "2. Nf3"), Some(2));
        assert_eq!(find_move_index(&moves, "Nc6"), Some(3));
        assert_eq!(find_move_index(&moves, "3... a6"), Some(5));
        assert_eq!(find_move_index(&moves, "4.Bxc6"), Some(6));
        assert_eq!(find_move_index(&moves, "Bxc6+"), Some(6));
    }

    #[test]
    fn find_move_returns_first_occurrence() {
        let moves = strings(&["Nf3", "Nf6", "Ng1", "Ng8", "Nf3"]);
        assert_eq!(find_move_index(&moves, "Nf3"), Some(0));
    }

    #[test]
    fn find_move_without_match() {
        let moves = strings(&["e4", "e5"]);
        assert_eq!(find_move_index(&moves, "d4"), None);
        assert_eq!(find_move_index(&moves, ""), None);
        assert_eq!(find_move_index(&moves, "1."), None);
    }

    #[test]
    fn render_numbers_white_plies() {
        let moves = strings(&["e4", "e5", "Nf3", "Nc6", "Bb5"]);
        assert_eq!(render_movetext(&moves), "1. e4 e5 2. Nf3 Nc6 3. Bb5");
        assert_eq!(render_movetext(&[]), "");
    }

    #[test]
    fn render_then_tokenize_recovers_tokens() {
        let moves = strings(&["d4", "d5", "c4", "dxc4", "e8=Q+"]);
        assert_eq!(tokenize(&render_movetext(&moves)), moves);
    }
}

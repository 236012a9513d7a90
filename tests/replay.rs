//! End-to-end replay properties through the public engine API.

use chessnotes::engine::{
    Board, Color, Highlight, NavCommand, Navigator, Piece, PieceType, START_PLACEMENT, Square,
    apply_move, diff, replay, tokenize,
};

const RUY_LOPEZ: &str = "1. e4 e5 2. Nf3 Nc6 3. Bb5 a6";

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn piece(c: char) -> Option<Piece> {
    Piece::from_char(c)
}

#[test]
fn starting_layout() {
    let b = Board::from_placement(START_PLACEMENT);
    assert_eq!(b.len(), 64);
    assert_eq!(b.at_index(0), piece('r'));
    assert_eq!(b.at_index(4), piece('k'));
    assert_eq!(b.at_index(8), piece('p'));
    assert_eq!(b.at_index(27), None);
    assert_eq!(b.at_index(52), piece('P'));
    assert_eq!(b.at_index(60), piece('K'));
    assert_eq!(b.at_index(63), piece('R'));
    assert_eq!(b.to_placement(), START_PLACEMENT);
}

#[test]
fn tokenize_strips_numbers() {
    assert_eq!(
        tokenize("1.e4 e5 2.Nf3 Nc6"),
        vec!["e4", "e5", "Nf3", "Nc6"]
    );
    assert_eq!(tokenize("  "), Vec::<String>::new());
}

#[test]
fn replay_is_deterministic() {
    let start = Board::starting();
    let moves = tokenize(RUY_LOPEZ);
    for i in 0..=moves.len() {
        assert_eq!(replay(&start, &moves, i), replay(&start, &moves, i));
    }
    assert_eq!(replay(&start, &moves, 0).board, start);
}

#[test]
fn navigating_back_and_forth_matches_fresh_replay() {
    let mut nav = Navigator::new(START_PLACEMENT, RUY_LOPEZ);
    nav.dispatch(NavCommand::JumpToIndex(5));
    nav.dispatch(NavCommand::StepBackward);
    nav.dispatch(NavCommand::StepBackward);
    let view = nav.dispatch(NavCommand::StepForward);

    let expected = replay(&Board::starting(), &tokenize(RUY_LOPEZ), 4);
    assert_eq!(view.index, 4);
    assert_eq!(view.board, expected.board);
}

#[test]
fn step_forward_wraps_and_jump_clamps() {
    let mut nav = Navigator::new(START_PLACEMENT, RUY_LOPEZ);
    assert_eq!(nav.dispatch(NavCommand::JumpToIndex(99)).index, 6);
    let view = nav.dispatch(NavCommand::StepForward);
    assert_eq!(view.index, 0);
    assert!(view.highlight.is_empty());
    assert_eq!(view.board, Board::starting());
    assert_eq!(nav.dispatch(NavCommand::StepBackward).index, 0);
}

#[test]
fn castling_from_the_start_position() {
    let b = apply_move(&Board::starting(), "O-O", Color::White);
    assert_eq!(b.piece_at(sq("e1")), None);
    assert_eq!(b.piece_at(sq("h1")), None);
    assert_eq!(b.piece_at(sq("g1")), piece('K'));
    assert_eq!(b.piece_at(sq("f1")), piece('R'));
    assert_eq!(b.len(), 64);
}

#[test]
fn castling_both_sides() {
    let b = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R");

    let w = apply_move(&b, "O-O", Color::White);
    assert_eq!(w.piece_at(sq("g1")), piece('K'));
    assert_eq!(w.piece_at(sq("f1")), piece('R'));
    assert_eq!(w.piece_at(sq("e1")), None);
    assert_eq!(w.piece_at(sq("h1")), None);

    let bl = apply_move(&b, "O-O-O", Color::Black);
    assert_eq!(bl.piece_at(sq("c8")), piece('k'));
    assert_eq!(bl.piece_at(sq("d8")), piece('r'));
    assert_eq!(bl.piece_at(sq("a8")), None);
    assert_eq!(bl.piece_at(sq("e8")), None);
}

#[test]
fn en_passant_removes_passed_pawn() {
    let moves = tokenize("1. e4 a6 2. e5 d5 3. exd6");
    let r = replay(&Board::starting(), &moves, moves.len());
    assert_eq!(r.board.piece_at(sq("d6")), piece('P'));
    assert_eq!(r.board.piece_at(sq("d5")), None);
    assert_eq!(r.board.piece_at(sq("e5")), None);
    assert_eq!(r.board.count(Color::Black, PieceType::Pawn), 7);
}

#[test]
fn disambiguated_and_tied_moves() {
    let b = Board::from_placement("8/8/8/8/8/8/8/R6R");
    let moved = apply_move(&b, "Rhd1", Color::White);
    assert_eq!(moved.piece_at(sq("d1")), piece('R'));
    assert_eq!(moved.piece_at(sq("h1")), None);
    assert_eq!(moved.piece_at(sq("a1")), piece('R'));

    // Both rooks reach d1; the one scanned first moves.
    let moved = apply_move(&b, "Rd1", Color::White);
    assert_eq!(moved.piece_at(sq("a1")), None);
    assert_eq!(moved.piece_at(sq("h1")), piece('R'));
}

#[test]
fn highlight_follows_each_ply() {
    let moves = tokenize(RUY_LOPEZ);
    let r = replay(&Board::starting(), &moves, 3);
    assert_eq!(
        diff(&r.prev, &r.board),
        Highlight {
            from: Some(sq("g1")),
            to: Some(sq("f3")),
        }
    );

    let mut nav = Navigator::new(START_PLACEMENT, RUY_LOPEZ);
    let view = nav.dispatch(NavCommand::JumpToMove("3. Bb5".into()));
    assert_eq!(view.index, 5);
    assert_eq!(view.highlight.from, Some(sq("f1")));
    assert_eq!(view.highlight.to, Some(sq("b5")));
    assert_eq!(view.side_to_move, Color::Black);
}

#[test]
fn unparseable_tokens_leave_board_unchanged() {
    let moves = tokenize("1. e4 Zz9 2. 1-0");
    let r = replay(&Board::starting(), &moves, moves.len());
    let after_e4 = replay(&Board::starting(), &moves, 1).board;
    assert_eq!(r.board, after_e4);
}

use cozy_chess::{Color, File, Piece, Rank};
use utils::board::{distance, relative_rank};
use utils::Position;

use super::relative_to_move;
use crate::tables::{PUSH_CLOSE, PUSH_TO_EDGES};
use crate::values::{
    verify_material, PAWN_VALUE_EG, QUEEN_VALUE_EG, QUEEN_VALUE_MG, ROOK_VALUE_EG, ROOK_VALUE_MG,
    VALUE_KNOWN_WIN,
};

/// Queen against pawn. A win, except that a pawn on the seventh rank on
/// the a, c, f or h file with its king beside it may hold; then only the
/// king distance counts.
pub(crate) fn kqkp(pos: &Position, strong_side: Color) -> i16 {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, QUEEN_VALUE_MG, 0));
    debug_assert!(verify_material(pos, weak_side, 0, 1));

    let winner_ksq = pos.king(strong_side);
    let loser_ksq = pos.king(weak_side);
    let pawn_sq = pos.square(weak_side, Piece::Pawn);

    let mut result = PUSH_CLOSE[distance(winner_ksq, loser_ksq) as usize]
        / (pos.rule50_count() as i16 + 1);

    let drawing_file = matches!(pawn_sq.file(), File::A | File::C | File::F | File::H);
    if relative_rank(weak_side, pawn_sq) != Rank::Seventh
        || distance(loser_ksq, pawn_sq) != 1
        || !drawing_file
    {
        result += VALUE_KNOWN_WIN + QUEEN_VALUE_EG / 10 - PAWN_VALUE_EG;
    }

    relative_to_move(pos, strong_side, result)
}

/// Queen against rook. Push the defending king to the edge and bring the
/// attacking king close.
pub(crate) fn kqkr(pos: &Position, strong_side: Color) -> i16 {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, QUEEN_VALUE_MG, 0));
    debug_assert!(verify_material(pos, weak_side, ROOK_VALUE_MG, 0));

    let winner_ksq = pos.king(strong_side);
    let loser_ksq = pos.king(weak_side);

    let result = QUEEN_VALUE_EG - ROOK_VALUE_EG
        + PUSH_TO_EDGES[loser_ksq as usize]
        + PUSH_CLOSE[distance(winner_ksq, loser_ksq) as usize];

    relative_to_move(pos, strong_side, result)
}

use cozy_chess::{get_king_moves, get_pawn_attacks, Color, Piece};
use utils::board::relative_rank;
use utils::Position;

use crate::tables::FORTRESS_MASK;
use crate::values::{verify_material, ScaleFactor, QUEEN_VALUE_MG};

/// Queen against rook and pawns. A rook on its third rank, defended by a
/// pawn next to its king and with the attacking king unable to get behind
/// it, is a fortress.
pub(crate) fn kqkrps(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, QUEEN_VALUE_MG, 0));
    debug_assert_eq!(pos.count(weak_side, Piece::Rook), 1);
    debug_assert!(pos.count(weak_side, Piece::Pawn) >= 1);

    let strong_king_sq = pos.king(strong_side);
    let weak_king_sq = pos.king(weak_side);
    let rsq = pos.square(weak_side, Piece::Rook);
    let pawns = pos.pieces(weak_side, Piece::Pawn);

    if !(pawns & FORTRESS_MASK[weak_side as usize]).is_empty()
        && relative_rank(weak_side, strong_king_sq) > relative_rank(weak_side, rsq)
        && !(pawns & get_king_moves(weak_king_sq) & get_pawn_attacks(rsq, strong_side)).is_empty()
    {
        return ScaleFactor::DRAW;
    }

    // The ratio truncates to zero for every reachable counter, so a long
    // shuffle without progress is scored as a draw
    let rule50 = pos.rule50_count() as i32;
    if rule50 > 14 {
        return ScaleFactor::clamped(ScaleFactor::NORMAL.0 as i32 * ((101 - rule50) / 172));
    }

    ScaleFactor::NONE
}

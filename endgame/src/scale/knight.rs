use cozy_chess::{get_bishop_moves, Color, Piece, Square};
use utils::board::{distance, forward_file, opposite_colors};
use utils::Position;

use crate::normalize::Normalizer;
use crate::values::{verify_material, ScaleFactor, BISHOP_VALUE_MG, KNIGHT_VALUE_MG};

/// Knight and pawn against king. A rook pawn on the seventh with the
/// defending king in the corner is drawn.
pub(crate) fn knpk(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, KNIGHT_VALUE_MG, 1));
    debug_assert!(verify_material(pos, weak_side, 0, 0));

    let normalizer = Normalizer::new(pos, strong_side);
    let pawn_sq = normalizer.apply(pos.square(strong_side, Piece::Pawn));
    let knight_sq = normalizer.apply(pos.square(strong_side, Piece::Knight));
    let strong_king_sq = normalizer.apply(pos.king(strong_side));
    let weak_king_sq = normalizer.apply(pos.king(weak_side));

    if pawn_sq != Square::A7 {
        return ScaleFactor::NONE;
    }

    if weak_king_sq == Square::A8 || weak_king_sq == Square::B7 {
        return ScaleFactor::DRAW;
    }

    // Attacking king stuck on a8: the knight can never gain the tempo needed
    // to chase the defender off c7/c8
    if (weak_king_sq == Square::C8 || weak_king_sq == Square::C7)
        && strong_king_sq == Square::A8
        && (pos.side_to_move() == strong_side) == !opposite_colors(weak_king_sq, knight_sq)
    {
        return ScaleFactor::DRAW;
    }

    ScaleFactor::NONE
}

/// Knight and pawn against bishop. If the bishop already covers the pawn's
/// path, the defence holds roughly as well as its king is close.
pub(crate) fn knpkb(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, KNIGHT_VALUE_MG, 1));
    debug_assert!(verify_material(pos, weak_side, BISHOP_VALUE_MG, 0));

    let pawn_sq = pos.square(strong_side, Piece::Pawn);
    let bishop_sq = pos.square(weak_side, Piece::Bishop);
    let weak_king_sq = pos.king(weak_side);

    let path = forward_file(strong_side, pawn_sq);
    if !(path & get_bishop_moves(bishop_sq, pos.board.occupied())).is_empty() {
        return ScaleFactor(distance(weak_king_sq, pawn_sq));
    }

    ScaleFactor::NONE
}

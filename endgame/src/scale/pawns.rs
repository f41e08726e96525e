use cozy_chess::{Color, File, Piece};
use utils::board::{file_distance, ranks_in_front};
use utils::Position;

use crate::values::{non_pawn_material, verify_material, ScaleFactor};

/// Two or more pawns against a lone king. All pawns on one rook file, in
/// front of a defending king that stands within a file of them, is a draw.
pub(crate) fn kpsk(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;
    debug_assert_eq!(non_pawn_material(pos, strong_side), 0);
    debug_assert!(pos.count(strong_side, Piece::Pawn) >= 2);
    debug_assert!(verify_material(pos, weak_side, 0, 0));

    let ksq = pos.king(weak_side);
    let pawns = pos.pieces(strong_side, Piece::Pawn);
    let Some(first_pawn) = pawns.next_square() else {
        return ScaleFactor::NONE;
    };

    let ahead_of_king = (pawns & !ranks_in_front(weak_side, ksq.rank())).is_empty();
    let single_rook_file = (pawns & !File::A.bitboard()).is_empty()
        || (pawns & !File::H.bitboard()).is_empty();

    if ahead_of_king && single_rook_file && file_distance(ksq, first_pawn) <= 1 {
        return ScaleFactor::DRAW;
    }

    ScaleFactor::NONE
}

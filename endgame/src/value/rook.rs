use cozy_chess::{Color, Piece, Rank, Square};
use utils::board::{distance, file_distance, forward, relative_square};
use utils::Position;

use super::relative_to_move;
use crate::tables::{PUSH_AWAY, PUSH_TO_EDGES};
use crate::values::{
    verify_material, BISHOP_VALUE_MG, KNIGHT_VALUE_MG, PAWN_VALUE_EG, ROOK_VALUE_EG, ROOK_VALUE_MG,
    VALUE_KNOWN_WIN,
};

/// Rook against pawn. Drawish when the pawn is far advanced with its king
/// beside it and the attacking king is far away.
pub(crate) fn krkp(pos: &Position, strong_side: Color) -> i16 {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, ROOK_VALUE_MG, 0));
    debug_assert!(verify_material(pos, weak_side, 0, 1));

    // Seen from the strong side, the pawn runs towards the first rank
    let wksq = relative_square(strong_side, pos.king(strong_side));
    let bksq = relative_square(strong_side, pos.king(weak_side));
    let rsq = relative_square(strong_side, pos.square(strong_side, Piece::Rook));
    let psq = relative_square(strong_side, pos.square(weak_side, Piece::Pawn));

    let queening_sq = Square::new(psq.file(), Rank::First);
    let strong_to_move = pos.side_to_move() == strong_side;
    let won = VALUE_KNOWN_WIN + ROOK_VALUE_EG / 10 - PAWN_VALUE_EG;

    let result = if bksq.rank() >= Rank::Sixth && psq.rank() >= Rank::Sixth && strong_to_move {
        // Pawn and king still at home
        won
    } else if (wksq as usize) < (psq as usize)
        && file_distance(wksq, psq) <= 1
        && (psq.rank() >= Rank::Third || distance(bksq, psq) >= 2)
    {
        // Attacking king in front of the pawn
        won
    } else if distance(bksq, psq) >= 3 + !strong_to_move as u8
        && distance(bksq, rsq) >= 2
        && (psq.rank() != Rank::Second || distance(wksq, queening_sq) <= 1)
    {
        // Defending king too far from both pawn and rook
        won
    } else if bksq.rank() <= Rank::Third
        && distance(bksq, psq) == 1
        && wksq.rank() >= Rank::Fourth
        && distance(wksq, psq) > 2 + strong_to_move as u8
    {
        80 - 8 * distance(wksq, psq) as i16
    } else {
        let stop_sq = forward(Color::Black, psq, 1);
        200 - 8
            * (distance(wksq, stop_sq) as i16
                - distance(bksq, stop_sq) as i16
                - distance(psq, queening_sq) as i16)
    };

    relative_to_move(pos, strong_side, result)
}

/// Rook against bishop is usually a draw; push the defending king to the edge.
pub(crate) fn krkb(pos: &Position, strong_side: Color) -> i16 {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, ROOK_VALUE_MG, 0));
    debug_assert!(verify_material(pos, weak_side, BISHOP_VALUE_MG, 0));

    let result = PUSH_TO_EDGES[pos.king(weak_side) as usize];
    relative_to_move(pos, strong_side, result)
}

/// Rook against knight is usually a draw; push the defending king to the
/// edge and keep the knight away from it.
pub(crate) fn krkn(pos: &Position, strong_side: Color) -> i16 {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, ROOK_VALUE_MG, 0));
    debug_assert!(verify_material(pos, weak_side, KNIGHT_VALUE_MG, 0));

    let bksq = pos.king(weak_side);
    let bnsq = pos.square(weak_side, Piece::Knight);
    let result = PUSH_TO_EDGES[bksq as usize] + PUSH_AWAY[distance(bksq, bnsq) as usize];
    relative_to_move(pos, strong_side, result)
}

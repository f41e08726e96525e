// Value evaluators. Each returns a definitive score from the side to move's
// point of view and is only called on positions whose material matches its
// endgame.

mod kpk;
mod kxk;
mod queen;
mod rook;

pub(crate) use kpk::evaluate as kpk;
pub(crate) use kxk::evaluate as kxk;
pub(crate) use queen::{kqkp, kqkr};
pub(crate) use rook::{krkb, krkn, krkp};

use cozy_chess::{Color, Piece};
use utils::Position;

use crate::values::{verify_material, KNIGHT_VALUE_MG, VALUE_DRAW};

/// Turn a score seen from the strong side into one seen from the side to move.
#[inline(always)]
fn relative_to_move(pos: &Position, strong_side: Color, value: i16) -> i16 {
    if pos.side_to_move() == strong_side {
        value
    } else {
        -value
    }
}

/// Two knights cannot force mate against a bare king.
pub(crate) fn knnk(pos: &Position, strong_side: Color) -> i16 {
    debug_assert!(verify_material(pos, strong_side, 2 * KNIGHT_VALUE_MG, 0));
    debug_assert_eq!(pos.count(strong_side, Piece::Knight), 2);
    VALUE_DRAW
}

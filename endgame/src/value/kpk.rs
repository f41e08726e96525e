use cozy_chess::{Color, Piece};
use utils::Position;

use super::relative_to_move;
use crate::normalize::Normalizer;
use crate::values::{verify_material, PAWN_VALUE_EG, VALUE_DRAW, VALUE_KNOWN_WIN};

/// King and pawn against king, decided by the KPK bitbase. Only the size of
/// a won score is computed here: the further the pawn, the higher.
pub(crate) fn evaluate(pos: &Position, strong_side: Color) -> i16 {
    debug_assert!(verify_material(pos, strong_side, 0, 1));
    debug_assert!(verify_material(pos, !strong_side, 0, 0));

    let normalizer = Normalizer::new(pos, strong_side);
    let wksq = normalizer.apply(pos.king(strong_side));
    let bksq = normalizer.apply(pos.king(!strong_side));
    let psq = normalizer.apply(pos.square(strong_side, Piece::Pawn));

    let us = if pos.side_to_move() == strong_side {
        Color::White
    } else {
        Color::Black
    };

    if !bitbase::probe(wksq, psq, bksq, us) {
        return VALUE_DRAW;
    }

    let result = VALUE_KNOWN_WIN - PAWN_VALUE_EG / 4 * (7 - psq.rank() as i16);

    relative_to_move(pos, strong_side, result)
}

use cozy_chess::{get_bishop_moves, BitBoard, Color, File, Piece, Rank, Square};
use utils::board::{
    distance, file_distance, forward, opposite_colors, pawn_push, relative_rank, shift,
};
use utils::Position;

use crate::normalize::Normalizer;
use crate::tables::KRPPKRP_SCALE_FACTORS;
use crate::values::{verify_material, ScaleFactor, BISHOP_VALUE_MG, ROOK_VALUE_MG};

/// Rook and pawn against rook.
///
/// Knows the classical drawing methods: third rank defence, checking from
/// behind, the a7/a8 trap, and the defending king blocking the pawn. Also
/// rewards a seventh rank pawn backed by its rook when the attacking king
/// is close enough.
pub(crate) fn krpkr(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, ROOK_VALUE_MG, 1));
    debug_assert!(verify_material(pos, weak_side, ROOK_VALUE_MG, 0));

    let normalizer = Normalizer::new(pos, strong_side);
    let wksq = normalizer.apply(pos.king(strong_side));
    let bksq = normalizer.apply(pos.king(weak_side));
    let wrsq = normalizer.apply(pos.square(strong_side, Piece::Rook));
    let wpsq = normalizer.apply(pos.square(strong_side, Piece::Pawn));
    let brsq = normalizer.apply(pos.square(weak_side, Piece::Rook));

    let f = wpsq.file();
    let r = wpsq.rank();
    let queening_sq = Square::new(f, Rank::Eighth);
    let stop_sq = forward(Color::White, wpsq, 1);
    let tempo = (pos.side_to_move() == strong_side) as i32;

    let d = |a: Square, b: Square| distance(a, b) as i32;

    // Third rank defence while the pawn is not too far advanced
    if r <= Rank::Fifth
        && d(bksq, queening_sq) <= 1
        && (wksq as usize) <= (Square::H5 as usize)
        && (brsq.rank() == Rank::Sixth || (r <= Rank::Third && wrsq.rank() != Rank::Sixth))
    {
        return ScaleFactor::DRAW;
    }

    // Checks from behind once the pawn reaches the sixth with its king behind
    if r == Rank::Sixth
        && d(bksq, queening_sq) <= 1
        && wksq.rank() as i32 + tempo <= Rank::Sixth as i32
        && (brsq.rank() == Rank::First || (tempo == 0 && file_distance(brsq, wpsq) >= 3))
    {
        return ScaleFactor::DRAW;
    }

    if r >= Rank::Sixth
        && bksq == queening_sq
        && brsq.rank() == Rank::First
        && (tempo == 0 || d(wksq, wpsq) >= 2)
    {
        return ScaleFactor::DRAW;
    }

    // Pawn on a7, rook on a8: the defending king shelters on g7 or h7 with
    // its rook behind the pawn
    if wpsq == Square::A7
        && wrsq == Square::A8
        && (bksq == Square::H7 || bksq == Square::G7)
        && brsq.file() == File::A
        && (brsq.rank() <= Rank::Third || wksq.file() >= File::D || wksq.rank() <= Rank::Fifth)
    {
        return ScaleFactor::DRAW;
    }

    // Defending king right in front of the pawn, attacking king too far
    if r <= Rank::Fifth
        && bksq == stop_sq
        && d(wksq, wpsq) - tempo >= 2
        && d(wksq, brsq) - tempo >= 2
    {
        return ScaleFactor::DRAW;
    }

    // Seventh rank pawn backed by its rook, attacking king closer to the
    // queening square and safe from tempo gains on the rook
    if r == Rank::Seventh
        && f != File::A
        && wrsq.file() == f
        && wrsq != queening_sq
        && d(wksq, queening_sq) < d(bksq, queening_sq) - 2 + tempo
        && d(wksq, queening_sq) < d(bksq, wrsq) + tempo
    {
        return ScaleFactor::clamped(ScaleFactor::MAX.0 as i32 - 2 * d(wksq, queening_sq));
    }

    // The same with the pawn further back
    if f != File::A
        && wrsq.file() == f
        && (wrsq as usize) < (wpsq as usize)
        && d(wksq, queening_sq) < d(bksq, queening_sq) - 2 + tempo
        && d(wksq, stop_sq) < d(bksq, stop_sq) - 2 + tempo
        && (d(bksq, wrsq) + tempo >= 3
            || (d(wksq, queening_sq) < d(bksq, wrsq) + tempo
                && d(wksq, stop_sq) < d(bksq, wrsq) + tempo))
    {
        return ScaleFactor::clamped(
            ScaleFactor::MAX.0 as i32 - 8 * d(wpsq, queening_sq) - 2 * d(wksq, queening_sq),
        );
    }

    // Defending king somewhere on the path of a pawn that has not gone far
    if r <= Rank::Fourth && (bksq as usize) > (wpsq as usize) {
        if bksq.file() == wpsq.file() {
            return ScaleFactor(10);
        }
        if file_distance(bksq, wpsq) == 1 && d(wksq, bksq) > 2 {
            return ScaleFactor::clamped(24 - 2 * d(wksq, bksq));
        }
    }

    ScaleFactor::NONE
}

/// Rook and pawn against bishop. Only rook pawns are considered, where the
/// bishop and king may set up a fortress.
pub(crate) fn krpkb(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, ROOK_VALUE_MG, 1));
    debug_assert!(verify_material(pos, weak_side, BISHOP_VALUE_MG, 0));

    let rook_files: BitBoard = File::A.bitboard() | File::H.bitboard();
    if (pos.board.pieces(Piece::Pawn) & rook_files).is_empty() {
        return ScaleFactor::NONE;
    }

    let ksq = pos.king(weak_side);
    let bsq = pos.square(weak_side, Piece::Bishop);
    let psq = pos.square(strong_side, Piece::Pawn);
    let rk = relative_rank(strong_side, psq);

    // Pawn on the fifth on the bishop's colour: a fortress may be possible.
    // Reduce more when the defending king is near the corner but not
    // trapped there.
    if rk == Rank::Fifth && !opposite_colors(bsq, psq) {
        let d = distance(forward(strong_side, psq, 3), ksq);
        let push = 2 * pawn_push(strong_side);
        let trapped = d == 0 && shift(pos.king(strong_side), 0, push) == Some(ksq);

        if d <= 2 && !trapped {
            return ScaleFactor(24);
        }
        return ScaleFactor(48);
    }

    // Pawn on the sixth: drawn if the bishop hits the square in front from a
    // distance and the king is near the corner
    if rk == Rank::Sixth
        && distance(forward(strong_side, psq, 2), ksq) <= 1
        && get_bishop_moves(bsq, BitBoard::EMPTY).has(forward(strong_side, psq, 1))
        && file_distance(bsq, psq) >= 2
    {
        return ScaleFactor(8);
    }

    ScaleFactor::NONE
}

/// Rook and two pawns against rook and pawn. Drawish when the strong side
/// has no passed pawn and the defending king stands in front of both pawns.
pub(crate) fn krppkrp(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, ROOK_VALUE_MG, 2));
    debug_assert!(verify_material(pos, weak_side, ROOK_VALUE_MG, 1));

    let [wpsq1, wpsq2] = pos.squares::<2>(strong_side, Piece::Pawn);
    let bksq = pos.king(weak_side);

    if pos.pawn_passed(strong_side, wpsq1) || pos.pawn_passed(strong_side, wpsq2) {
        return ScaleFactor::NONE;
    }

    let r = relative_rank(strong_side, wpsq1).max(relative_rank(strong_side, wpsq2));

    if file_distance(bksq, wpsq1) <= 1
        && file_distance(bksq, wpsq2) <= 1
        && relative_rank(strong_side, bksq) > r
    {
        debug_assert!(r > Rank::First && r < Rank::Seventh);
        return ScaleFactor(KRPPKRP_SCALE_FACTORS[r as usize]);
    }

    ScaleFactor::NONE
}

use cozy_chess::{get_bishop_moves, Color, File, Piece, Rank, Square};
use utils::board::{
    backmost_square, distance, file_distance, forward, forward_file, opposite_colors,
    relative_rank, relative_square,
};
use utils::Position;

use crate::normalize::Normalizer;
use crate::values::{
    non_pawn_material, verify_material, ScaleFactor, BISHOP_VALUE_MG, KNIGHT_VALUE_MG,
};

/// Bishop and pawns against king, possibly with pawns of its own.
///
/// Catches rook pawns with the wrong bishop, the b6/a7 fortress, and pawns
/// on the b or g file blocked on the seventh rank.
pub(crate) fn kbpsk(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;
    debug_assert_eq!(non_pawn_material(pos, strong_side), BISHOP_VALUE_MG as i32);
    debug_assert!(pos.count(strong_side, Piece::Pawn) >= 1);

    let pawns = pos.pieces(strong_side, Piece::Pawn);
    let Some(first_pawn) = pawns.next_square() else {
        return ScaleFactor::NONE;
    };
    let pawns_file = first_pawn.file();
    let knight_file = matches!(pawns_file, File::B | File::G);

    // All pawns on one rook file, promoting on a square the bishop never sees
    if matches!(pawns_file, File::A | File::H) && (pawns & !pawns_file.bitboard()).is_empty() {
        let bishop_sq = pos.square(strong_side, Piece::Bishop);
        let queening_sq = relative_square(strong_side, Square::new(pawns_file, Rank::Eighth));
        let king_sq = pos.king(weak_side);

        if opposite_colors(queening_sq, bishop_sq) && distance(queening_sq, king_sq) <= 1 {
            return ScaleFactor::DRAW;
        }
    }

    // Pawn on b6, bishop on a7, defending king on b7 or a8
    if knight_file
        && pos.count(strong_side, Piece::Pawn) == 1
        && pos.board.colors(weak_side).len() <= 1
    {
        let normalizer = Normalizer::new(pos, strong_side);
        let pawn_sq = normalizer.apply(first_pawn);
        let weak_king_sq = normalizer.apply(pos.king(weak_side));
        let bishop_sq = normalizer.apply(pos.square(strong_side, Piece::Bishop));

        if pawn_sq == Square::B6
            && bishop_sq == Square::A7
            && (weak_king_sq == Square::B7 || weak_king_sq == Square::A8)
        {
            return ScaleFactor::DRAW;
        }
    }

    // Every pawn on the same b or g file
    if knight_file
        && (pos.board.pieces(Piece::Pawn) & !pawns_file.bitboard()).is_empty()
        && non_pawn_material(pos, weak_side) == 0
        && pos.count(weak_side, Piece::Pawn) >= 1
    {
        let Some(weak_pawn_sq) = backmost_square(weak_side, pos.pieces(weak_side, Piece::Pawn))
        else {
            return ScaleFactor::NONE;
        };
        let strong_king_sq = pos.king(strong_side);
        let weak_king_sq = pos.king(weak_side);
        let bishop_sq = pos.square(strong_side, Piece::Bishop);

        // Our pawn blocked on the seventh, and either the bishop cannot win the
        // blocker or only one of our pawns is left
        if relative_rank(strong_side, weak_pawn_sq) == Rank::Seventh
            && pawns.has(forward(weak_side, weak_pawn_sq, 1))
            && (opposite_colors(bishop_sq, weak_pawn_sq)
                || pos.count(strong_side, Piece::Pawn) == 1)
        {
            let strong_king_dist = distance(weak_pawn_sq, strong_king_sq);
            let weak_king_dist = distance(weak_pawn_sq, weak_king_sq);

            if relative_rank(strong_side, weak_king_sq) >= Rank::Seventh
                && weak_king_dist <= 2
                && weak_king_dist <= strong_king_dist
            {
                return ScaleFactor::DRAW;
            }
        }
    }

    ScaleFactor::NONE
}

/// Defending king in front of the pawn on a square the bishop cannot
/// attack, or anywhere up to the sixth rank.
fn king_blocks_pawn(pos: &Position, strong_side: Color) -> bool {
    let pawn_sq = pos.square(strong_side, Piece::Pawn);
    let strong_bishop_sq = pos.square(strong_side, Piece::Bishop);
    let weak_king_sq = pos.king(!strong_side);

    weak_king_sq.file() == pawn_sq.file()
        && relative_rank(strong_side, pawn_sq) < relative_rank(strong_side, weak_king_sq)
        && (opposite_colors(weak_king_sq, strong_bishop_sq)
            || relative_rank(strong_side, weak_king_sq) <= Rank::Sixth)
}

/// Bishop and pawn against bishop.
pub(crate) fn kbpkb(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, BISHOP_VALUE_MG, 1));
    debug_assert!(verify_material(pos, weak_side, BISHOP_VALUE_MG, 0));

    if king_blocks_pawn(pos, strong_side) {
        return ScaleFactor::DRAW;
    }

    let pawn_sq = pos.square(strong_side, Piece::Pawn);
    let strong_bishop_sq = pos.square(strong_side, Piece::Bishop);
    let weak_bishop_sq = pos.square(weak_side, Piece::Bishop);

    // Opposite coloured bishops draw unless the pawn is far advanced with a
    // free path
    if opposite_colors(strong_bishop_sq, weak_bishop_sq) {
        if relative_rank(strong_side, pawn_sq) <= Rank::Fifth {
            return ScaleFactor::DRAW;
        }

        let path = forward_file(strong_side, pawn_sq);
        if !(path & pos.pieces(weak_side, Piece::King)).is_empty() {
            return ScaleFactor::DRAW;
        }

        let bishop_attacks = get_bishop_moves(weak_bishop_sq, pos.board.occupied());
        if !(bishop_attacks & path).is_empty() && distance(weak_bishop_sq, pawn_sq) >= 3 {
            return ScaleFactor::DRAW;
        }
    }

    ScaleFactor::NONE
}

/// Bishop and two pawns against bishop, with opposite coloured bishops.
pub(crate) fn kbppkb(pos: &Position, strong_side: Color) -> ScaleFactor {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, strong_side, BISHOP_VALUE_MG, 2));
    debug_assert!(verify_material(pos, weak_side, BISHOP_VALUE_MG, 0));

    let wbsq = pos.square(strong_side, Piece::Bishop);
    let bbsq = pos.square(weak_side, Piece::Bishop);

    if !opposite_colors(wbsq, bbsq) {
        return ScaleFactor::NONE;
    }

    let ksq = pos.king(weak_side);
    let [psq1, psq2] = pos.squares::<2>(strong_side, Piece::Pawn);

    // In front of the leading pawn, and beside it on the other pawn's file
    let (block_sq1, block_sq2) =
        if relative_rank(strong_side, psq1) > relative_rank(strong_side, psq2) {
            (forward(strong_side, psq1, 1), Square::new(psq2.file(), psq1.rank()))
        } else {
            (forward(strong_side, psq2, 1), Square::new(psq1.file(), psq2.rank()))
        };

    let weak_bishops = pos.pieces(weak_side, Piece::Bishop);
    let controls = |sq: Square| {
        bbsq == sq || !(get_bishop_moves(sq, pos.board.occupied()) & weak_bishops).is_empty()
    };

    match file_distance(psq1, psq2) {
        0 => {
            if ksq.file() == block_sq1.file()
                && relative_rank(strong_side, ksq) >= relative_rank(strong_side, block_sq1)
                && opposite_colors(ksq, wbsq)
            {
                return ScaleFactor::DRAW;
            }
        }
        1 => {
            let rank_gap = (psq1.rank() as i8 - psq2.rank() as i8).abs();
            if ksq == block_sq1
                && opposite_colors(ksq, wbsq)
                && (controls(block_sq2) || rank_gap >= 2)
            {
                return ScaleFactor::DRAW;
            }
            if ksq == block_sq2 && opposite_colors(ksq, wbsq) && controls(block_sq1) {
                return ScaleFactor::DRAW;
            }
        }
        _ => {}
    }

    ScaleFactor::NONE
}

/// Bishop and pawn against knight.
pub(crate) fn kbpkn(pos: &Position, strong_side: Color) -> ScaleFactor {
    debug_assert!(verify_material(pos, strong_side, BISHOP_VALUE_MG, 1));
    debug_assert!(verify_material(pos, !strong_side, KNIGHT_VALUE_MG, 0));

    if king_blocks_pawn(pos, strong_side) {
        return ScaleFactor::DRAW;
    }
    ScaleFactor::NONE
}

use cozy_chess::{Color, Piece};
use utils::Position;

pub const PAWN_VALUE_MG: i16 = 198;
pub const PAWN_VALUE_EG: i16 = 258;
pub const KNIGHT_VALUE_MG: i16 = 817;
pub const KNIGHT_VALUE_EG: i16 = 846;
pub const BISHOP_VALUE_MG: i16 = 836;
pub const BISHOP_VALUE_EG: i16 = 857;
pub const ROOK_VALUE_MG: i16 = 1270;
pub const ROOK_VALUE_EG: i16 = 1278;
pub const QUEEN_VALUE_MG: i16 = 2521;
pub const QUEEN_VALUE_EG: i16 = 2558;

pub const VALUE_DRAW: i16 = 0;
/// Baseline for positions known to be won but not yet a forced mate.
pub const VALUE_KNOWN_WIN: i16 = 10_000;

/// Midgame value of a non-pawn piece.
#[inline(always)]
pub fn piece_value_mg(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE_MG as i32,
        Piece::Knight => KNIGHT_VALUE_MG as i32,
        Piece::Bishop => BISHOP_VALUE_MG as i32,
        Piece::Rook => ROOK_VALUE_MG as i32,
        Piece::Queen => QUEEN_VALUE_MG as i32,
        Piece::King => 0,
    }
}

/// Midgame value of everything `color` holds except pawns and the king.
#[inline(always)]
pub fn non_pawn_material(pos: &Position, color: Color) -> i32 {
    [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen]
        .into_iter()
        .map(|piece| piece_value_mg(piece) * pos.count(color, piece) as i32)
        .sum()
}

/// Exact non-pawn material and pawn count, checked in debug builds to catch
/// an evaluator bound to the wrong material.
pub(crate) fn verify_material(pos: &Position, color: Color, npm: i16, pawns: u8) -> bool {
    non_pawn_material(pos, color) == npm as i32 && pos.count(color, Piece::Pawn) == pawns
}

/// Multiplier applied to the endgame part of a generic evaluation.
///
/// `DRAW` scales to zero, `NORMAL` leaves the score as is and `MAX` doubles
/// it. `NONE` means the evaluator has no opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaleFactor(pub u8);

impl ScaleFactor {
    pub const DRAW: Self = Self(0);
    pub const NORMAL: Self = Self(64);
    pub const MAX: Self = Self(128);
    pub const NONE: Self = Self(255);

    /// Build a scale factor from a formula result, clamped to `[DRAW, MAX]`.
    #[inline(always)]
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(Self::DRAW.0 as i32, Self::MAX.0 as i32) as u8)
    }

    #[inline(always)]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Scale an endgame score. `NONE` returns it unchanged.
    #[inline(always)]
    pub fn apply(self, eg: i16) -> i16 {
        if self.is_none() {
            return eg;
        }
        (eg as i32 * self.0 as i32 / Self::NORMAL.0 as i32) as i16
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::NONE
    }
}

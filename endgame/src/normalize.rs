use cozy_chess::{Color, File, Piece, Square};
use utils::board::{flip_file, relative_square};
use utils::Position;

/// Maps squares as if the strong side were White with its only pawn on
/// files a-d. Lets single-pawn evaluators and the KPK bitbase work in one
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    strong_side: Color,
    mirror: bool,
}

impl Normalizer {
    /// The strong side must hold exactly one pawn.
    #[inline(always)]
    pub fn new(pos: &Position, strong_side: Color) -> Self {
        debug_assert_eq!(pos.count(strong_side, Piece::Pawn), 1);
        Self::with_pawn_file(strong_side, pos.square(strong_side, Piece::Pawn).file())
    }

    #[inline(always)]
    pub fn with_pawn_file(strong_side: Color, pawn_file: File) -> Self {
        Self {
            strong_side,
            mirror: pawn_file >= File::E,
        }
    }

    #[inline(always)]
    pub fn apply(&self, sq: Square) -> Square {
        let sq = if self.mirror { flip_file(sq) } else { sq };
        relative_square(self.strong_side, sq)
    }
}

/// Normalize a single square of `pos`.
#[inline(always)]
pub fn normalize(pos: &Position, strong_side: Color, sq: Square) -> Square {
    Normalizer::new(pos, strong_side).apply(sq)
}

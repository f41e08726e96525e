// King and pawn versus king bitbase.
//
// Every KPK position with White holding the pawn on files a-d is classified
// once by retrograde analysis and stored as one bit (win / not a win). Callers
// normalize their position first: strong side as White, pawn on the queenside.

mod kpk;

pub use kpk::{KpkBitbase, MAX_INDEX};

use cozy_chess::{Color, Square};
use std::sync::OnceLock;

static KPK: OnceLock<KpkBitbase> = OnceLock::new();

/// Build the bitbase if it has not been built yet. Cheap afterwards.
pub fn init() {
    kpk();
}

#[inline(always)]
fn kpk() -> &'static KpkBitbase {
    KPK.get_or_init(KpkBitbase::generate)
}

/// Whether White wins with king on `wksq` and pawn on `wpsq` against the
/// black king on `bksq`, with `stm` to move.
#[inline(always)]
pub fn probe(wksq: Square, wpsq: Square, bksq: Square, stm: Color) -> bool {
    kpk().probe(wksq, wpsq, bksq, stm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_king_in_front_wins() {
        // Kd6 in front of the pawn wins whoever moves
        assert!(probe(Square::D6, Square::D5, Square::D8, Color::White));
        assert!(probe(Square::D6, Square::D5, Square::D8, Color::Black));
    }

    #[test]
    fn test_rook_pawn_with_king_in_corner_draws() {
        assert!(!probe(Square::B1, Square::A2, Square::A8, Color::White));
        assert!(!probe(Square::B1, Square::A2, Square::A8, Color::Black));
        assert!(!probe(Square::B6, Square::A6, Square::A8, Color::White));
    }

    #[test]
    fn test_pawn_outside_the_square_wins() {
        assert!(probe(Square::H1, Square::A5, Square::H4, Color::White));
        assert!(!probe(Square::H1, Square::A5, Square::C6, Color::Black));
    }

    #[test]
    fn test_opposition_in_front_of_the_pawn() {
        // Black holds the opposition: draw with White to move
        assert!(!probe(Square::C4, Square::C3, Square::C6, Color::White));
        // White has the opposition: win with Black to move
        assert!(probe(Square::C4, Square::C3, Square::C6, Color::Black));
    }

    #[test]
    fn test_undefended_pawn_is_lost() {
        assert!(!probe(Square::H8, Square::B4, Square::C5, Color::Black));
    }
}

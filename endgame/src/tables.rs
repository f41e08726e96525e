// Geometry tables shared by the evaluators. Indexed by square (a1 = 0) or by
// Chebyshev distance.

use cozy_chess::{BitBoard, Color, Rank};

/// Drives the defending king towards any edge of the board.
#[rustfmt::skip]
pub const PUSH_TO_EDGES: [i16; 64] = [
    400, 360, 320, 280, 280, 320, 360, 400,
    360, 280, 240, 200, 200, 240, 280, 360,
    320, 240, 160, 120, 120, 160, 240, 320,
    280, 200, 120,  80,  80, 120, 200, 280,
    280, 200, 120,  80,  80, 120, 200, 280,
    320, 240, 160, 120, 120, 160, 240, 320,
    360, 280, 240, 200, 200, 240, 280, 360,
    400, 360, 320, 280, 280, 320, 360, 400,
];

/// Drives the defending king towards a1 or h8. Flip the board vertically to
/// aim for a8 or h1 instead.
#[rustfmt::skip]
pub const PUSH_TO_CORNERS: [i16; 64] = [
    800, 700, 600, 500, 400, 300, 200, 100,
    700, 560, 460, 360, 260, 160,  60, 200,
    600, 460, 320, 220, 120,  20, 160, 300,
    500, 360, 220,  50, -50, 120, 260, 400,
    400, 260, 120, -50,  50, 220, 360, 500,
    300, 160,  20, 120, 220, 320, 460, 600,
    200,  60, 160, 260, 360, 460, 560, 700,
    100, 200, 300, 400, 500, 600, 700, 800,
];

/// Rewards two pieces for standing close to each other.
pub const PUSH_CLOSE: [i16; 8] = [0, 0, 400, 320, 240, 160, 80, 40];

/// Rewards two pieces for standing far apart.
pub const PUSH_AWAY: [i16; 8] = [0, 20, 80, 160, 240, 320, 360, 400];

/// Squares where a pawn shelters the rook in the KQ vs KR + pawns fortress,
/// indexed by the defending colour.
pub const FORTRESS_MASK: [BitBoard; Color::NUM] = [
    BitBoard(0x00007E4242C37E00),
    BitBoard(0x007EC342427E0000),
];

/// KRPP vs KRP scale factor by the relative rank of the most advanced pawn.
pub const KRPPKRP_SCALE_FACTORS: [u8; Rank::NUM] = [0, 9, 10, 14, 21, 44, 0, 0];

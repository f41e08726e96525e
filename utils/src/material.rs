use cozy_chess::{BitBoard, Board, Color, Piece};

use crate::board::LIGHT_SQUARES;

/// Upper bound on the number of pieces of one type a side can hold.
pub const MAX_PIECE_COUNT: usize = 16;

/// Random constants indexed by colour, piece and ordinal.
///
/// A side holding `n` pieces of a type contributes the first `n` constants of
/// that slot, so the key only depends on the inventory and never on squares.
static MATERIAL_KEYS: [[[u64; MAX_PIECE_COUNT]; Piece::NUM]; Color::NUM] = {
    const fn splitmix64(mut x: u64) -> u64 {
        x = x.wrapping_add(0x9e3779b97f4a7c15);
        x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
        x ^ (x >> 31)
    }

    let mut keys = [[[0u64; MAX_PIECE_COUNT]; Piece::NUM]; Color::NUM];
    let mut seed = 0x3243F6A8885A308Du64;

    let mut c = 0;
    while c < Color::NUM {
        let mut p = 0;
        while p < Piece::NUM {
            let mut n = 0;
            while n < MAX_PIECE_COUNT {
                seed = splitmix64(seed);
                keys[c][p][n] = seed;
                n += 1;
            }
            p += 1;
        }
        c += 1;
    }
    keys
};

/// Order-independent hash of which pieces each side holds.
///
/// Two positions with the same inventory share a key regardless of where the
/// pieces stand. Not a full board hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialKey(pub u64);

/// Piece counts per colour and type, kings included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialCounts {
    counts: [[u8; Piece::NUM]; Color::NUM],
}

impl MaterialCounts {
    pub fn from_board(board: &Board) -> Self {
        let mut counts = Self::default();
        for color in Color::ALL {
            for piece in Piece::ALL {
                counts.counts[color as usize][piece as usize] =
                    board.colored_pieces(color, piece).len() as u8;
            }
        }
        counts
    }

    #[inline(always)]
    pub fn get(&self, color: Color, piece: Piece) -> u8 {
        self.counts[color as usize][piece as usize]
    }

    /// Add one piece of the given type. Returns false once the slot is full.
    pub fn add(&mut self, color: Color, piece: Piece) -> bool {
        let slot = &mut self.counts[color as usize][piece as usize];
        if *slot as usize >= MAX_PIECE_COUNT {
            return false;
        }
        *slot += 1;
        true
    }

    /// The canonical material hash. Live positions and registry codes both go
    /// through here so their keys can never diverge.
    pub fn key(&self) -> MaterialKey {
        let mut key = 0u64;
        for (c, pieces) in self.counts.iter().enumerate() {
            for (p, &count) in pieces.iter().enumerate() {
                let count = (count as usize).min(MAX_PIECE_COUNT);
                for ordinal in MATERIAL_KEYS[c][p].iter().take(count) {
                    key ^= ordinal;
                }
            }
        }
        MaterialKey(key)
    }
}

/// Material key of a live position.
#[inline(always)]
pub fn material_key(board: &Board) -> MaterialKey {
    MaterialCounts::from_board(board).key()
}

/// Get minor pieces (knights and bishops) for a color.
pub fn minors(board: &Board, color: Color) -> BitBoard {
    board.colored_pieces(color, Piece::Knight) | board.colored_pieces(color, Piece::Bishop)
}

/// Get major pieces (rooks and queens) for a color.
pub fn majors(board: &Board, color: Color) -> BitBoard {
    board.colored_pieces(color, Piece::Rook) | board.colored_pieces(color, Piece::Queen)
}

/// Check if a specific color has insufficient material to force checkmate.
pub fn side_has_insufficient_material(board: &Board, color: Color) -> bool {
    if !(board.colored_pieces(color, Piece::Pawn) | majors(board, color)).is_empty() {
        return false;
    }

    minors(board, color).len() <= 1
}

/// True when every bishop of `color` stands on squares of a single colour.
///
/// Also true when the side has no bishops at all.
pub fn bishops_on_one_color(board: &Board, color: Color) -> bool {
    let bishops = board.colored_pieces(color, Piece::Bishop);
    (bishops & LIGHT_SQUARES).is_empty() || (bishops & !LIGHT_SQUARES).is_empty()
}

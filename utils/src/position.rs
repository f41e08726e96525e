use cozy_chess::{BitBoard, Board, Color, Piece, Square};
use std::cell::OnceCell;

use crate::board::passed_pawn_span;
use crate::material::{MaterialCounts, MaterialKey};

/// Read-only view of a board for endgame evaluation.
pub struct Position<'a> {
    pub board: &'a Board,
    material: OnceCell<MaterialCounts>,
}

impl<'a> Position<'a> {
    #[inline(always)]
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            material: OnceCell::new(),
        }
    }

    // Get or compute the piece counts (computed once, cached for reuse)
    #[inline(always)]
    fn material(&self) -> &MaterialCounts {
        self.material
            .get_or_init(|| MaterialCounts::from_board(self.board))
    }

    #[inline(always)]
    pub fn material_key(&self) -> MaterialKey {
        self.material().key()
    }

    #[inline(always)]
    pub fn count(&self, color: Color, piece: Piece) -> u8 {
        self.material().get(color, piece)
    }

    #[inline(always)]
    pub fn pieces(&self, color: Color, piece: Piece) -> BitBoard {
        self.board.colored_pieces(color, piece)
    }

    /// Square of the only piece of this type. The caller guarantees there is
    /// exactly one.
    #[inline(always)]
    pub fn square(&self, color: Color, piece: Piece) -> Square {
        let pieces = self.pieces(color, piece);
        debug_assert_eq!(pieces.len(), 1, "expected a single {:?} {:?}", color, piece);
        pieces.next_square().expect("no piece of the requested type")
    }

    /// Squares of the first `N` pieces of this type, lowest square first.
    #[inline(always)]
    pub fn squares<const N: usize>(&self, color: Color, piece: Piece) -> [Square; N] {
        let pieces = self.pieces(color, piece);
        debug_assert!(pieces.len() as usize >= N, "expected {} {:?} {:?}", N, color, piece);
        let mut squares = [Square::A1; N];
        for (slot, sq) in squares.iter_mut().zip(pieces) {
            *slot = sq;
        }
        squares
    }

    #[inline(always)]
    pub fn king(&self, color: Color) -> Square {
        self.board.king(color)
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Plies since the last capture or pawn move.
    #[inline(always)]
    pub fn rule50_count(&self) -> u8 {
        self.board.halfmove_clock()
    }

    /// Whether a pawn of `color` on `sq` has no enemy pawn in front of it or
    /// on an adjacent file ahead.
    #[inline(always)]
    pub fn pawn_passed(&self, color: Color, sq: Square) -> bool {
        (self.pieces(!color, Piece::Pawn) & passed_pawn_span(color, sq)).is_empty()
    }
}

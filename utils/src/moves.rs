use cozy_chess::Board;

/// Check if there are any legal moves in the position.
#[inline(always)]
pub fn has_legal_moves(board: &Board) -> bool {
    board.generate_moves(|moves| !moves.is_empty())
}

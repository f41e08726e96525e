use cozy_chess::{BitBoard, Color, File, Rank, Square};

/// Squares of the same colour as a1.
pub const DARK_SQUARES: BitBoard = BitBoard(0xAA55AA55AA55AA55);
pub const LIGHT_SQUARES: BitBoard = BitBoard(0x55AA55AA55AA55AA);

/// Number of files between two squares.
#[inline(always)]
pub fn file_distance(a: Square, b: Square) -> u8 {
    (a.file() as i8 - b.file() as i8).unsigned_abs()
}

/// Number of ranks between two squares.
#[inline(always)]
pub fn rank_distance(a: Square, b: Square) -> u8 {
    (a.rank() as i8 - b.rank() as i8).unsigned_abs()
}

/// Chebyshev distance, i.e. the number of king steps between two squares.
///
/// <https://www.chessprogramming.org/Distance>
#[inline(always)]
pub fn distance(a: Square, b: Square) -> u8 {
    file_distance(a, b).max(rank_distance(a, b))
}

#[inline(always)]
pub fn opposite_colors(a: Square, b: Square) -> bool {
    DARK_SQUARES.has(a) != DARK_SQUARES.has(b)
}

/// Mirror a square across the board's vertical axis (a1 <-> h1).
#[inline(always)]
pub fn flip_file(sq: Square) -> Square {
    Square::index(sq as usize ^ 7)
}

/// Mirror a square across the board's horizontal axis (a1 <-> a8).
#[inline(always)]
pub fn flip_rank(sq: Square) -> Square {
    Square::index(sq as usize ^ 56)
}

/// The square as seen from `color`'s side of the board.
#[inline(always)]
pub fn relative_square(color: Color, sq: Square) -> Square {
    match color {
        Color::White => sq,
        Color::Black => flip_rank(sq),
    }
}

/// The rank of `sq` counted from `color`'s back rank.
#[inline(always)]
pub fn relative_rank(color: Color, sq: Square) -> Rank {
    relative_square(color, sq).rank()
}

/// Rank step of a pawn push for `color`.
#[inline(always)]
pub fn pawn_push(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Move a square by a file and rank offset, or `None` if it leaves the board.
#[inline(always)]
pub fn shift(sq: Square, file_delta: i8, rank_delta: i8) -> Option<Square> {
    let file = sq.file() as i8 + file_delta;
    let rank = sq.rank() as i8 + rank_delta;
    if !(0..8).contains(&file) || !(0..8).contains(&rank) {
        return None;
    }
    Some(Square::new(File::index(file as usize), Rank::index(rank as usize)))
}

/// The square `steps` pawn pushes in front of `sq` from `color`'s point of view.
///
/// Panics if the square would leave the board; callers only ask for squares
/// on the pawn's path.
#[inline(always)]
pub fn forward(color: Color, sq: Square, steps: i8) -> Square {
    shift(sq, 0, steps * pawn_push(color)).expect("square in front leaves the board")
}

/// All squares on ranks strictly in front of `rank` from `color`'s point of view.
#[inline(always)]
pub fn ranks_in_front(color: Color, rank: Rank) -> BitBoard {
    let r = rank as u32;
    match color {
        Color::White if r < 7 => BitBoard(!0u64 << (8 * (r + 1))),
        Color::Black if r > 0 => BitBoard((1u64 << (8 * r)) - 1),
        _ => BitBoard::EMPTY,
    }
}

/// Squares in front of `sq` on its own file.
#[inline(always)]
pub fn forward_file(color: Color, sq: Square) -> BitBoard {
    ranks_in_front(color, sq.rank()) & sq.file().bitboard()
}

/// Squares an enemy pawn must not occupy for a pawn on `sq` to be passed.
#[inline(always)]
pub fn passed_pawn_span(color: Color, sq: Square) -> BitBoard {
    let file = sq.file();
    ranks_in_front(color, sq.rank()) & (file.bitboard() | file.adjacent())
}

/// The square of `squares` closest to `color`'s back rank.
#[inline(always)]
pub fn backmost_square(color: Color, squares: BitBoard) -> Option<Square> {
    if squares.is_empty() {
        return None;
    }
    Some(match color {
        Color::White => lsb(squares),
        Color::Black => msb(squares),
    })
}

#[inline(always)]
fn lsb(squares: BitBoard) -> Square {
    Square::index(squares.0.trailing_zeros() as usize)
}

#[inline(always)]
fn msb(squares: BitBoard) -> Square {
    Square::index(63 - squares.0.leading_zeros() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance(Square::A1, Square::H8), 7);
        assert_eq!(distance(Square::E4, Square::E4), 0);
        assert_eq!(distance(Square::B2, Square::C4), 2);
        assert_eq!(file_distance(Square::A1, Square::H1), 7);
        assert_eq!(rank_distance(Square::A1, Square::H1), 0);
    }

    #[test]
    fn test_square_colors() {
        assert!(DARK_SQUARES.has(Square::A1));
        assert!(DARK_SQUARES.has(Square::H8));
        assert!(LIGHT_SQUARES.has(Square::H1));
        assert!(opposite_colors(Square::A1, Square::A8));
        assert!(!opposite_colors(Square::A1, Square::C3));
        assert_eq!(DARK_SQUARES | LIGHT_SQUARES, BitBoard::FULL);
    }

    #[test]
    fn test_flips() {
        assert_eq!(flip_file(Square::B3), Square::G3);
        assert_eq!(flip_rank(Square::B3), Square::B6);
        assert_eq!(relative_square(Color::Black, Square::E2), Square::E7);
        assert_eq!(relative_rank(Color::Black, Square::E2), Rank::Seventh);
        assert_eq!(relative_rank(Color::White, Square::E2), Rank::Second);
    }

    #[test]
    fn test_shift() {
        assert_eq!(shift(Square::A1, 1, 1), Some(Square::B2));
        assert_eq!(shift(Square::A1, -1, 0), None);
        assert_eq!(shift(Square::H8, 0, 1), None);
        assert_eq!(forward(Color::Black, Square::D5, 2), Square::D3);
    }

    #[test]
    #[should_panic(expected = "square in front leaves the board")]
    fn test_forward_off_the_board_panics() {
        forward(Color::White, Square::E8, 1);
    }

    #[test]
    fn test_forward_masks() {
        let span = forward_file(Color::White, Square::C6);
        assert_eq!(span, Square::C7.bitboard() | Square::C8.bitboard());

        let span = forward_file(Color::Black, Square::C2);
        assert_eq!(span, Square::C1.bitboard());

        assert!(ranks_in_front(Color::White, Rank::Eighth).is_empty());
        assert!(ranks_in_front(Color::Black, Rank::First).is_empty());
        assert_eq!(ranks_in_front(Color::White, Rank::Seventh), Rank::Eighth.bitboard());
    }

    #[test]
    fn test_passed_pawn_span() {
        let span = passed_pawn_span(Color::White, Square::A5);
        assert!(span.has(Square::B6));
        assert!(span.has(Square::A8));
        assert!(!span.has(Square::C6));
        assert!(!span.has(Square::B5));
    }

    #[test]
    fn test_backmost_square() {
        let pawns = Square::G5.bitboard() | Square::G7.bitboard();
        assert_eq!(backmost_square(Color::White, pawns), Some(Square::G5));
        assert_eq!(backmost_square(Color::Black, pawns), Some(Square::G7));
        assert_eq!(backmost_square(Color::White, BitBoard::EMPTY), None);
    }
}

use cozy_chess::{Board, Color, Piece, Square};
use rand::Rng;

fn piece_char(color: Color, piece: Piece) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

/// FEN for a board holding exactly `pieces`.
pub fn fen(pieces: &[(Color, Piece, Square)], side_to_move: Color) -> String {
    let mut grid = [None; 64];
    for &(color, piece, sq) in pieces {
        grid[sq as usize] = Some(piece_char(color, piece));
    }

    let mut placement = String::new();
    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            match grid[rank * 8 + file] {
                Some(c) => {
                    if empty > 0 {
                        placement.push_str(&empty.to_string());
                        empty = 0;
                    }
                    placement.push(c);
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            placement.push_str(&empty.to_string());
        }
        if rank > 0 {
            placement.push('/');
        }
    }

    let stm = match side_to_move {
        Color::White => 'w',
        Color::Black => 'b',
    };
    format!("{} {} - - 0 1", placement, stm)
}

/// A random legal board with both kings plus `pieces`, given as
/// (colour, piece, count). Non-king pieces only land on squares accepted by
/// `allowed`; pawns never land on the first or last rank.
pub fn random_board<R: Rng>(
    rng: &mut R,
    pieces: &[(Color, Piece, u8)],
    allowed: impl Fn(Square) -> bool,
) -> Board {
    loop {
        let mut placed: Vec<(Color, Piece, Square)> = Vec::new();
        let mut taken = 0u64;

        let mut place = |color: Color, piece: Piece, rng: &mut R| loop {
            let sq = Square::index(rng.gen_range(0..64));
            if taken & (1 << sq as usize) != 0 {
                continue;
            }
            if piece != Piece::King && !allowed(sq) {
                continue;
            }
            if piece == Piece::Pawn && !(8..56).contains(&(sq as usize)) {
                continue;
            }
            taken |= 1 << sq as usize;
            return (color, piece, sq);
        };

        placed.push(place(Color::White, Piece::King, &mut *rng));
        placed.push(place(Color::Black, Piece::King, &mut *rng));
        for &(color, piece, count) in pieces {
            for _ in 0..count {
                placed.push(place(color, piece, &mut *rng));
            }
        }

        let stm = if rng.gen_bool(0.5) {
            Color::White
        } else {
            Color::Black
        };
        if let Ok(board) = fen(&placed, stm).parse::<Board>() {
            return board;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::File;

    #[test]
    fn test_fen_round_trip() {
        let pieces = [
            (Color::White, Piece::King, Square::E1),
            (Color::Black, Piece::King, Square::E8),
            (Color::White, Piece::Pawn, Square::A2),
            (Color::Black, Piece::Rook, Square::H7),
        ];
        assert_eq!(fen(&pieces, Color::Black), "4k3/7r/8/8/8/8/P7/4K3 b - - 0 1");
        let board: Board = fen(&pieces, Color::White).parse().unwrap();
        assert_eq!(board.king(Color::Black), Square::E8);
    }

    #[test]
    fn test_random_board_respects_allowed_squares() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let board = random_board(
                &mut rng,
                &[(Color::Black, Piece::Pawn, 2)],
                |sq| sq.file() == File::C,
            );
            let pawns = board.colored_pieces(Color::Black, Piece::Pawn);
            assert_eq!(pawns.len(), 2);
            assert!(pawns.into_iter().all(|sq| sq.file() == File::C));
        }
    }
}

use cozy_chess::{Color, Piece, Square};
use utils::board::{distance, flip_rank, opposite_colors};
use utils::{bishops_on_one_color, has_legal_moves, side_has_insufficient_material, Position};

use super::relative_to_move;
use crate::tables::{PUSH_CLOSE, PUSH_TO_CORNERS, PUSH_TO_EDGES};
use crate::values::{non_pawn_material, verify_material, VALUE_DRAW, VALUE_KNOWN_WIN};

/// King and plenty of material against a lone king.
///
/// The attacker is rewarded for driving the defending king to the edge and
/// for keeping the kings close. With bishop and knight the defending king is
/// also driven to a corner the bishop controls.
pub(crate) fn evaluate(pos: &Position, strong_side: Color) -> i16 {
    let weak_side = !strong_side;
    debug_assert!(verify_material(pos, weak_side, 0, 0));

    if pos.side_to_move() == weak_side && !has_legal_moves(pos.board) {
        return VALUE_DRAW;
    }

    if side_has_insufficient_material(pos.board, strong_side)
        || same_colored_bishops(pos, strong_side)
    {
        return VALUE_DRAW;
    }

    let winner_ksq = pos.king(strong_side);
    let mut loser_ksq = pos.king(weak_side);

    let mut result = VALUE_KNOWN_WIN as i32
        + non_pawn_material(pos, strong_side) / 10
        + PUSH_TO_EDGES[loser_ksq as usize] as i32
        + PUSH_CLOSE[distance(winner_ksq, loser_ksq) as usize] as i32;

    if pos.count(strong_side, Piece::Bishop) == 1 && pos.count(strong_side, Piece::Knight) == 1 {
        let bishop_sq = pos.square(strong_side, Piece::Bishop);

        // The corner table aims for a1/h8, so a light-squared bishop needs it flipped
        if opposite_colors(bishop_sq, Square::A1) {
            loser_ksq = flip_rank(loser_ksq);
        }

        result += PUSH_TO_CORNERS[loser_ksq as usize] as i32;
    }

    relative_to_move(pos, strong_side, result.min(i16::MAX as i32) as i16)
}

/// Bishops that all share one square colour, with nothing else to help.
fn same_colored_bishops(pos: &Position, strong_side: Color) -> bool {
    pos.count(strong_side, Piece::Bishop) > 1
        && bishops_on_one_color(pos.board, strong_side)
        && [Piece::Pawn, Piece::Knight, Piece::Rook, Piece::Queen]
            .into_iter()
            .all(|piece| pos.count(strong_side, piece) == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::random_board;
    use cozy_chess::Board;
    use utils::board::{DARK_SQUARES, LIGHT_SQUARES};

    fn eval(fen: &str, strong_side: Color) -> i16 {
        let board: Board = fen.parse().unwrap();
        evaluate(&Position::new(&board), strong_side)
    }

    #[test]
    fn test_kqk_is_a_known_win() {
        assert!(eval("8/8/8/3k4/8/8/8/Q3K3 w - - 0 1", Color::White) > VALUE_KNOWN_WIN);
        assert!(eval("8/8/8/3k4/8/8/8/Q3K3 b - - 0 1", Color::White) < -VALUE_KNOWN_WIN);
        assert!(eval("q3k3/8/8/8/3K4/8/8/8 b - - 0 1", Color::Black) > VALUE_KNOWN_WIN);
    }

    #[test]
    fn test_defending_king_on_the_edge_scores_higher() {
        let centre = eval("8/8/8/8/3k4/8/3K4/R7 w - - 0 1", Color::White);
        let edge = eval("3k4/8/3K4/8/8/8/8/R7 w - - 0 1", Color::White);
        assert!(edge > centre);
    }

    #[test]
    fn test_stalemate_is_a_draw() {
        assert_eq!(eval("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1", Color::White), VALUE_DRAW);
    }

    #[test]
    fn test_kbnk_prefers_the_bishops_corner() {
        // Dark-squared bishop on c1: mate happens on a1 or h8
        let right = eval("8/8/8/8/8/2K5/8/k1B1N3 w - - 0 1", Color::White);
        let wrong = eval("8/8/8/8/8/5K2/8/2B1N2k w - - 0 1", Color::White);
        assert!(right > VALUE_KNOWN_WIN);
        assert_eq!(
            right - wrong,
            PUSH_TO_CORNERS[Square::A1 as usize] - PUSH_TO_CORNERS[Square::H1 as usize]
        );

        // Light-squared bishop on d1: h1 is now the right corner
        let light_right = eval("8/8/8/8/8/5K2/8/3BN2k w - - 0 1", Color::White);
        let light_wrong = eval("8/8/8/8/8/2K5/8/k2BN3 w - - 0 1", Color::White);
        assert_eq!(
            light_right - light_wrong,
            PUSH_TO_CORNERS[Square::H8 as usize] - PUSH_TO_CORNERS[Square::A8 as usize]
        );
    }

    #[test]
    fn test_same_colored_bishops_always_draw() {
        let mut rng = rand::thread_rng();
        for squares in [DARK_SQUARES, LIGHT_SQUARES] {
            for count in 2..=3 {
                for _ in 0..200 {
                    let board = random_board(
                        &mut rng,
                        &[(Color::White, Piece::Bishop, count)],
                        |sq| squares.has(sq),
                    );
                    let pos = Position::new(&board);
                    assert_eq!(evaluate(&pos, Color::White), VALUE_DRAW, "{}", board);
                }
            }
        }
    }

    #[test]
    fn test_bishop_pair_is_not_a_draw() {
        assert!(eval("8/8/8/3k4/8/8/8/2B1KB2 w - - 0 1", Color::White) > VALUE_KNOWN_WIN);
    }
}

//! Specialized endgame knowledge.
//!
//! Positions with few pieces are recognised by their material key. Some get
//! an exact score that replaces the generic evaluation, others a scale factor
//! that shrinks the generic endgame score towards a draw.
//!
//! ```no_run
//! use cozy_chess::{Board, Color};
//! use endgame::Endgames;
//! use utils::Position;
//!
//! let endgames = Endgames::new();
//! let board: Board = "8/8/8/3k4/8/8/8/RR2K3 w - - 0 1".parse().unwrap();
//! let pos = Position::new(&board);
//!
//! let probe = endgames.probe(&pos);
//! let score = probe.evaluate(&pos);
//! let white_scale = probe.scale_factor(&pos, Color::White);
//! ```

pub mod code;
mod evaluator;
mod kind;
pub mod normalize;
mod registry;
mod scale;
mod tables;
mod value;
mod values;

#[cfg(test)]
mod test_util;

pub use code::CodeError;
pub use evaluator::{Evaluator, Verdict};
pub use kind::{Category, EndgameKind};
pub use registry::{EndgameProbe, Endgames, RegistryError, REGISTERED};
pub use values::{
    non_pawn_material, piece_value_mg, ScaleFactor, BISHOP_VALUE_EG, BISHOP_VALUE_MG,
    KNIGHT_VALUE_EG, KNIGHT_VALUE_MG, PAWN_VALUE_EG, PAWN_VALUE_MG, QUEEN_VALUE_EG,
    QUEEN_VALUE_MG, ROOK_VALUE_EG, ROOK_VALUE_MG, VALUE_DRAW, VALUE_KNOWN_WIN,
};

pub mod board;
mod material;
mod moves;
mod position;

pub use material::{
    bishops_on_one_color, majors, material_key, minors, side_has_insufficient_material,
    MaterialCounts, MaterialKey, MAX_PIECE_COUNT,
};
pub use moves::has_legal_moves;
pub use position::Position;

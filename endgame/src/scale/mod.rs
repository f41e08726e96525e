// Scale evaluators. Each returns a factor for the generic endgame score of
// the strong side: `DRAW` for a known fortress, a reduced factor for drawish
// patterns and `NONE` when no pattern applies.

mod bishop;
mod knight;
mod pawns;
mod queen;
mod rook;

pub(crate) use bishop::{kbpkb, kbpkn, kbppkb, kbpsk};
pub(crate) use knight::{knpk, knpkb};
pub(crate) use pawns::kpsk;
pub(crate) use queen::kqkrps;
pub(crate) use rook::{krpkb, krpkr, krppkrp};

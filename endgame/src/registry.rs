use std::collections::hash_map::Entry;

use ahash::AHashMap;
use cozy_chess::{Color, Piece};
use log::{debug, trace};
use thiserror::Error;
use utils::{MaterialKey, Position};

use crate::code::{self, CodeError};
use crate::evaluator::Evaluator;
use crate::kind::{Category, EndgameKind};
use crate::values::{
    non_pawn_material, ScaleFactor, BISHOP_VALUE_MG, QUEEN_VALUE_MG, ROOK_VALUE_MG,
};

/// Endgames bound to one exact material code, in registration order.
pub const REGISTERED: [EndgameKind; 15] = [
    EndgameKind::Kpk,
    EndgameKind::Knnk,
    EndgameKind::Krkp,
    EndgameKind::Kqkp,
    EndgameKind::Krkb,
    EndgameKind::Krkn,
    EndgameKind::Kqkr,
    EndgameKind::Knpk,
    EndgameKind::Knpkb,
    EndgameKind::Krpkr,
    EndgameKind::Krpkb,
    EndgameKind::Kbpkb,
    EndgameKind::Kbpkn,
    EndgameKind::Kbppkb,
    EndgameKind::Krppkrp,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("{kind} is recognised from material and has no code")]
    Unnamed { kind: EndgameKind },
    #[error("invalid code for {kind}: {source}")]
    Code {
        kind: EndgameKind,
        #[source]
        source: CodeError,
    },
    #[error("{kind} with {strong_side:?} as the strong side has the same material as {existing}")]
    Duplicate {
        kind: EndgameKind,
        strong_side: Color,
        existing: EndgameKind,
    },
}

/// Material key to evaluator lookup, built once and read-only afterwards.
///
/// Each code is registered twice, once per strong colour, in either the
/// value or the scale table depending on the kind.
#[derive(Debug, Clone)]
pub struct Endgames {
    values: AHashMap<MaterialKey, Evaluator>,
    scales: AHashMap<MaterialKey, Evaluator>,
}

impl Endgames {
    /// Build the registry. Panics on a malformed code table, which can only
    /// happen through a programming error.
    pub fn new() -> Self {
        match Self::try_new() {
            Ok(endgames) => endgames,
            Err(err) => panic!("endgame registry: {}", err),
        }
    }

    pub fn try_new() -> Result<Self, RegistryError> {
        Self::with_kinds(&REGISTERED)
    }

    /// Build a registry holding only `kinds`.
    pub fn with_kinds(kinds: &[EndgameKind]) -> Result<Self, RegistryError> {
        bitbase::init();

        let mut endgames = Self {
            values: AHashMap::new(),
            scales: AHashMap::new(),
        };
        for &kind in kinds {
            endgames.add(kind)?;
        }

        debug!(
            "Endgame registry ready: {} value and {} scale evaluators",
            endgames.values.len(),
            endgames.scales.len()
        );
        Ok(endgames)
    }

    fn add(&mut self, kind: EndgameKind) -> Result<(), RegistryError> {
        let code = kind.code().ok_or(RegistryError::Unnamed { kind })?;

        for strong_side in Color::ALL {
            let key = code::material_key(code, strong_side)
                .map_err(|source| RegistryError::Code { kind, source })?;

            let map = match kind.category() {
                Category::Value => &mut self.values,
                Category::Scale => &mut self.scales,
            };

            match map.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(RegistryError::Duplicate {
                        kind,
                        strong_side,
                        existing: entry.get().kind(),
                    });
                }
                Entry::Vacant(entry) => {
                    trace!("Registered {} for {:?} as {:#018x}", kind, strong_side, key.0);
                    entry.insert(Evaluator::new(kind, strong_side));
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn value_evaluator(&self, key: MaterialKey) -> Option<Evaluator> {
        self.values.get(&key).copied()
    }

    #[inline]
    pub fn scale_evaluator(&self, key: MaterialKey) -> Option<Evaluator> {
        self.scales.get(&key).copied()
    }

    /// Score of a registered value endgame, from the side to move's point
    /// of view.
    #[inline]
    pub fn try_evaluate(&self, key: MaterialKey, pos: &Position) -> Option<i16> {
        self.value_evaluator(key).and_then(|e| e.value(pos))
    }

    /// Scale factor of a registered scale endgame, for its strong side.
    #[inline]
    pub fn try_scale(&self, key: MaterialKey, pos: &Position) -> Option<ScaleFactor> {
        self.scale_evaluator(key).and_then(|e| e.scale(pos))
    }

    /// Every evaluator that applies to `pos`.
    ///
    /// A registered value endgame wins outright. Otherwise a lone king
    /// against enough material is scored as KXK. Scale evaluators come from
    /// the registry for their strong side, then from material families for
    /// each colour still without one.
    pub fn probe(&self, pos: &Position) -> EndgameProbe {
        let key = pos.material_key();

        if let Some(evaluator) = self.value_evaluator(key) {
            return EndgameProbe::value(evaluator);
        }

        for color in Color::ALL {
            if is_kxk(pos, color) {
                return EndgameProbe::value(Evaluator::new(EndgameKind::Kxk, color));
            }
        }

        let mut probe = EndgameProbe::default();
        if let Some(evaluator) = self.scale_evaluator(key) {
            probe.scale[evaluator.strong_side() as usize] = Some(evaluator);
            return probe;
        }

        for color in Color::ALL {
            let kind = if is_kbpsk(pos, color) {
                EndgameKind::Kbpsk
            } else if is_kqkrps(pos, color) {
                EndgameKind::Kqkrps
            } else if is_kpsk(pos, color) {
                EndgameKind::Kpsk
            } else {
                continue;
            };
            probe.scale[color as usize] = Some(Evaluator::new(kind, color));
        }
        probe
    }

    pub fn len(&self) -> usize {
        self.values.len() + self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Endgames {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluators selected for one position by [`Endgames::probe`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EndgameProbe {
    pub value: Option<Evaluator>,
    /// Indexed by the strong side.
    pub scale: [Option<Evaluator>; Color::NUM],
}

impl EndgameProbe {
    fn value(evaluator: Evaluator) -> Self {
        Self {
            value: Some(evaluator),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.scale.iter().all(Option::is_none)
    }

    /// Score from the value evaluator, if there is one.
    pub fn evaluate(&self, pos: &Position) -> Option<i16> {
        self.value.and_then(|e| e.value(pos))
    }

    /// Scale factor for `color`'s generic score; `NONE` without an evaluator.
    pub fn scale_factor(&self, pos: &Position, color: Color) -> ScaleFactor {
        self.scale[color as usize]
            .and_then(|e| e.scale(pos))
            .unwrap_or(ScaleFactor::NONE)
    }
}

/// Lone king against at least a rook's worth of pieces.
fn is_kxk(pos: &Position, us: Color) -> bool {
    pos.board.colors(!us).len() == 1 && non_pawn_material(pos, us) >= ROOK_VALUE_MG as i32
}

/// A single bishop and at least one pawn.
fn is_kbpsk(pos: &Position, us: Color) -> bool {
    non_pawn_material(pos, us) == BISHOP_VALUE_MG as i32
        && pos.count(us, Piece::Bishop) == 1
        && pos.count(us, Piece::Pawn) >= 1
}

/// A lone queen against a rook and at least one pawn.
fn is_kqkrps(pos: &Position, us: Color) -> bool {
    non_pawn_material(pos, us) == QUEEN_VALUE_MG as i32
        && pos.count(us, Piece::Queen) == 1
        && pos.count(us, Piece::Pawn) == 0
        && pos.count(!us, Piece::Rook) == 1
        && pos.count(!us, Piece::Pawn) >= 1
        && non_pawn_material(pos, !us) == ROOK_VALUE_MG as i32
}

/// Two or more pawns against a bare king, no pieces on either side.
fn is_kpsk(pos: &Position, us: Color) -> bool {
    non_pawn_material(pos, us) == 0
        && non_pawn_material(pos, !us) == 0
        && pos.count(us, Piece::Pawn) >= 2
        && pos.count(!us, Piece::Pawn) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{fen, random_board};
    use crate::values::{VALUE_DRAW, VALUE_KNOWN_WIN};
    use cozy_chess::{Board, Square};
    use rayon::prelude::*;
    use std::sync::OnceLock;

    fn endgames() -> &'static Endgames {
        static ENDGAMES: OnceLock<Endgames> = OnceLock::new();
        ENDGAMES.get_or_init(Endgames::new)
    }

    fn parse_board(fen: &str) -> Board {
        fen.parse().unwrap()
    }

    /// A legal board with the material of `code`, strong side `strong_side`.
    fn board_for_code(code: &str, strong_side: Color) -> Board {
        let counts = code::material_counts(code, strong_side).unwrap();
        let mut pieces = Vec::new();
        for color in Color::ALL {
            for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::Pawn] {
                if counts.get(color, piece) > 0 {
                    pieces.push((color, piece, counts.get(color, piece)));
                }
            }
        }
        let mut rng = rand::thread_rng();
        random_board(&mut rng, &pieces, |_| true)
    }

    #[test]
    fn test_every_code_round_trips_for_both_colors() {
        let endgames = endgames();
        assert_eq!(endgames.len(), 2 * REGISTERED.len());

        for kind in REGISTERED {
            let code = kind.code().unwrap();
            let white = code::material_key(code, Color::White).unwrap();
            let black = code::material_key(code, Color::Black).unwrap();
            assert_ne!(white, black, "{}", kind);

            for strong_side in Color::ALL {
                let board = board_for_code(code, strong_side);
                let key = utils::material_key(&board);

                let found = match kind.category() {
                    Category::Value => endgames.value_evaluator(key),
                    Category::Scale => endgames.scale_evaluator(key),
                };
                let expected = Evaluator::new(kind, strong_side);
                assert_eq!(found, Some(expected), "{} {}", kind, board);
            }
        }
    }

    #[test]
    fn test_unregistered_material_is_not_found() {
        let board = parse_board("8/8/8/3k4/8/8/8/1NN1K1N1 w - - 0 1");
        let pos = Position::new(&board);
        assert_eq!(endgames().try_evaluate(pos.material_key(), &pos), None);
        assert_eq!(endgames().try_scale(pos.material_key(), &pos), None);
    }

    #[test]
    fn test_try_evaluate_and_try_scale() {
        let board = parse_board("3k4/8/3K4/3P4/8/8/8/8 w - - 0 1");
        let pos = Position::new(&board);
        let value = endgames().try_evaluate(pos.material_key(), &pos);
        assert!(matches!(value, Some(v) if v > VALUE_KNOWN_WIN / 2));
        assert_eq!(endgames().try_scale(pos.material_key(), &pos), None);

        let board = parse_board("r7/8/8/3k4/3P4/8/8/4R2K w - - 0 1");
        let pos = Position::new(&board);
        let sf = endgames().try_scale(pos.material_key(), &pos);
        assert_eq!(sf, Some(ScaleFactor::DRAW));
        assert_eq!(endgames().try_evaluate(pos.material_key(), &pos), None);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let err = Endgames::with_kinds(&[EndgameKind::Kpk, EndgameKind::Kpk]).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Duplicate {
                kind: EndgameKind::Kpk,
                strong_side: Color::White,
                existing: EndgameKind::Kpk,
            }
        );
    }

    #[test]
    fn test_material_families_cannot_be_registered() {
        let err = Endgames::with_kinds(&[EndgameKind::Kxk]).unwrap_err();
        assert_eq!(err, RegistryError::Unnamed { kind: EndgameKind::Kxk });
    }

    #[test]
    fn test_probe_falls_back_to_kxk() {
        let board = parse_board("8/8/8/3k4/8/8/8/RR2K3 w - - 0 1");
        let pos = Position::new(&board);
        let probe = endgames().probe(&pos);
        assert_eq!(probe.value, Some(Evaluator::new(EndgameKind::Kxk, Color::White)));
        assert!(probe.evaluate(&pos).unwrap() > VALUE_KNOWN_WIN);

        // A single minor piece is not enough
        let board = parse_board("8/8/8/3k4/8/8/8/1B2K3 w - - 0 1");
        let pos = Position::new(&board);
        assert!(endgames().probe(&pos).is_empty());
    }

    #[test]
    fn test_probe_prefers_registered_value_endgames() {
        let board = parse_board("8/8/8/3k4/8/8/8/1NN1K3 w - - 0 1");
        let pos = Position::new(&board);
        let probe = endgames().probe(&pos);
        assert_eq!(probe.value, Some(Evaluator::new(EndgameKind::Knnk, Color::White)));
        assert_eq!(probe.evaluate(&pos), Some(VALUE_DRAW));
    }

    #[test]
    fn test_probe_material_scale_families() {
        // Wrong rook pawn, for Black
        let board = parse_board("k7/4b3/8/8/8/7p/8/6K1 b - - 0 1");
        let pos = Position::new(&board);
        let probe = endgames().probe(&pos);
        assert_eq!(probe.value, None);
        let kind = probe.scale[Color::Black as usize].map(|e| e.kind());
        assert_eq!(kind, Some(EndgameKind::Kbpsk));
        assert_eq!(probe.scale_factor(&pos, Color::Black), ScaleFactor::DRAW);
        assert_eq!(probe.scale_factor(&pos, Color::White), ScaleFactor::NONE);

        // Queen against rook fortress
        let board = parse_board("8/5pk1/4r3/8/3K4/8/Q7/8 w - - 0 1");
        let pos = Position::new(&board);
        let probe = endgames().probe(&pos);
        let kind = probe.scale[Color::White as usize].map(|e| e.kind());
        assert_eq!(kind, Some(EndgameKind::Kqkrps));
        assert_eq!(probe.scale_factor(&pos, Color::White), ScaleFactor::DRAW);

        // Doubled rook pawns
        let board = parse_board("k7/8/8/8/8/P7/P7/7K w - - 0 1");
        let pos = Position::new(&board);
        let probe = endgames().probe(&pos);
        let kind = probe.scale[Color::White as usize].map(|e| e.kind());
        assert_eq!(kind, Some(EndgameKind::Kpsk));
        assert_eq!(probe.scale_factor(&pos, Color::White), ScaleFactor::DRAW);
    }

    #[test]
    fn test_probe_registered_scale_endgame() {
        let board = parse_board("4r2k/8/8/3p4/3K4/8/8/R7 b - - 0 1");
        let pos = Position::new(&board);
        let probe = endgames().probe(&pos);
        let krpkr = Evaluator::new(EndgameKind::Krpkr, Color::Black);
        assert_eq!(probe.scale[Color::Black as usize], Some(krpkr));
        assert_eq!(probe.scale[Color::White as usize], None);
        assert_eq!(probe.scale_factor(&pos, Color::Black), ScaleFactor::DRAW);
    }

    #[test]
    fn test_kpk_evaluation_is_idempotent() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let board = random_board(&mut rng, &[(Color::White, Piece::Pawn, 1)], |_| true);
            let pos = Position::new(&board);
            let key = pos.material_key();
            let first = endgames().try_evaluate(key, &pos);
            assert!(first.is_some());
            assert_eq!(endgames().try_evaluate(key, &pos), first, "{}", board);
        }
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Endgames>();
        assert_send_sync::<Evaluator>();
    }

    #[test]
    fn test_concurrent_lookups_agree() {
        let positions: Vec<String> = (0..64)
            .map(|i| {
                let wk = Square::index(i);
                let bk = if i < 32 { Square::H8 } else { Square::A8 };
                fen(
                    &[
                        (Color::White, Piece::King, wk),
                        (Color::Black, Piece::King, bk),
                        (Color::White, Piece::Rook, Square::D4),
                        (Color::Black, Piece::Pawn, Square::E5),
                    ],
                    Color::Black,
                )
            })
            .collect();

        let serial: Vec<Option<i16>> = positions
            .iter()
            .map(|f| {
                let board = f.parse::<Board>().ok()?;
                let pos = Position::new(&board);
                endgames().try_evaluate(pos.material_key(), &pos)
            })
            .collect();

        let parallel: Vec<Option<i16>> = positions
            .par_iter()
            .map(|f| {
                let board = f.parse::<Board>().ok()?;
                let pos = Position::new(&board);
                endgames().try_evaluate(pos.material_key(), &pos)
            })
            .collect();

        assert_eq!(serial, parallel);
        assert!(serial.iter().flatten().count() > 0);
    }
}

use cozy_chess::Color;
use utils::Position;

use crate::kind::{Category, EndgameKind, Strategy};
use crate::values::ScaleFactor;

/// Result of running an evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Score from the side to move's point of view.
    Value(i16),
    /// Factor for the strong side's generic endgame score.
    Scale(ScaleFactor),
}

/// An endgame algorithm bound to the colour holding the extra material.
///
/// Plain data: copies are free and can be shared across any number of
/// threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Evaluator {
    kind: EndgameKind,
    strong_side: Color,
}

impl Evaluator {
    pub const fn new(kind: EndgameKind, strong_side: Color) -> Self {
        Self { kind, strong_side }
    }

    #[inline(always)]
    pub fn kind(&self) -> EndgameKind {
        self.kind
    }

    #[inline(always)]
    pub fn strong_side(&self) -> Color {
        self.strong_side
    }

    #[inline(always)]
    pub fn weak_side(&self) -> Color {
        !self.strong_side
    }

    #[inline(always)]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Run the evaluator. The position must hold the material the evaluator
    /// was bound to; debug builds check it.
    #[inline]
    pub fn evaluate(&self, pos: &Position) -> Verdict {
        match self.kind.strategy() {
            Strategy::Value(f) => Verdict::Value(f(pos, self.strong_side)),
            Strategy::Scale(f) => Verdict::Scale(f(pos, self.strong_side)),
        }
    }

    /// Score for value evaluators, `None` for scale evaluators.
    #[inline]
    pub fn value(&self, pos: &Position) -> Option<i16> {
        match self.kind.strategy() {
            Strategy::Value(f) => Some(f(pos, self.strong_side)),
            Strategy::Scale(_) => None,
        }
    }

    /// Factor for scale evaluators, `None` for value evaluators.
    #[inline]
    pub fn scale(&self, pos: &Position) -> Option<ScaleFactor> {
        match self.kind.strategy() {
            Strategy::Value(_) => None,
            Strategy::Scale(f) => Some(f(pos, self.strong_side)),
        }
    }
}

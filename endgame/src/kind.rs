use std::fmt;

use cozy_chess::Color;
use utils::Position;

use crate::values::ScaleFactor;
use crate::{scale, value};

/// What an endgame evaluator produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A definitive score replacing the generic evaluation.
    Value,
    /// A factor applied to the generic endgame score.
    Scale,
}

/// Every endgame with specialized knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndgameKind {
    Kxk,
    Kpk,
    Knnk,
    Krkp,
    Krkb,
    Krkn,
    Kqkp,
    Kqkr,

    Kbpsk,
    Kqkrps,
    Krpkr,
    Krpkb,
    Krppkrp,
    Kpsk,
    Kbpkb,
    Kbppkb,
    Kbpkn,
    Knpk,
    Knpkb,
}

pub(crate) type ValueFn = fn(&Position, Color) -> i16;
pub(crate) type ScaleFn = fn(&Position, Color) -> ScaleFactor;

#[derive(Clone, Copy)]
pub(crate) enum Strategy {
    Value(ValueFn),
    Scale(ScaleFn),
}

impl EndgameKind {
    pub const ALL: [EndgameKind; 19] = [
        EndgameKind::Kxk,
        EndgameKind::Kpk,
        EndgameKind::Knnk,
        EndgameKind::Krkp,
        EndgameKind::Krkb,
        EndgameKind::Krkn,
        EndgameKind::Kqkp,
        EndgameKind::Kqkr,
        EndgameKind::Kbpsk,
        EndgameKind::Kqkrps,
        EndgameKind::Krpkr,
        EndgameKind::Krpkb,
        EndgameKind::Krppkrp,
        EndgameKind::Kpsk,
        EndgameKind::Kbpkb,
        EndgameKind::Kbppkb,
        EndgameKind::Kbpkn,
        EndgameKind::Knpk,
        EndgameKind::Knpkb,
    ];

    /// Conventional name; lower case marks "one or more".
    pub fn name(self) -> &'static str {
        match self {
            EndgameKind::Kxk => "KXK",
            EndgameKind::Kpk => "KPK",
            EndgameKind::Knnk => "KNNK",
            EndgameKind::Krkp => "KRKP",
            EndgameKind::Krkb => "KRKB",
            EndgameKind::Krkn => "KRKN",
            EndgameKind::Kqkp => "KQKP",
            EndgameKind::Kqkr => "KQKR",
            EndgameKind::Kbpsk => "KBPsK",
            EndgameKind::Kqkrps => "KQKRPs",
            EndgameKind::Krpkr => "KRPKR",
            EndgameKind::Krpkb => "KRPKB",
            EndgameKind::Krppkrp => "KRPPKRP",
            EndgameKind::Kpsk => "KPsK",
            EndgameKind::Kbpkb => "KBPKB",
            EndgameKind::Kbppkb => "KBPPKB",
            EndgameKind::Kbpkn => "KBPKN",
            EndgameKind::Knpk => "KNPK",
            EndgameKind::Knpkb => "KNPKB",
        }
    }

    /// Material code the registry binds this kind to. `None` for families
    /// that are recognised from material counts instead of one exact
    /// inventory.
    pub fn code(self) -> Option<&'static str> {
        match self {
            EndgameKind::Kxk | EndgameKind::Kbpsk | EndgameKind::Kqkrps | EndgameKind::Kpsk => None,
            kind => Some(kind.name()),
        }
    }

    pub fn category(self) -> Category {
        match self.strategy() {
            Strategy::Value(_) => Category::Value,
            Strategy::Scale(_) => Category::Scale,
        }
    }

    pub(crate) fn strategy(self) -> Strategy {
        match self {
            EndgameKind::Kxk => Strategy::Value(value::kxk),
            EndgameKind::Kpk => Strategy::Value(value::kpk),
            EndgameKind::Knnk => Strategy::Value(value::knnk),
            EndgameKind::Krkp => Strategy::Value(value::krkp),
            EndgameKind::Krkb => Strategy::Value(value::krkb),
            EndgameKind::Krkn => Strategy::Value(value::krkn),
            EndgameKind::Kqkp => Strategy::Value(value::kqkp),
            EndgameKind::Kqkr => Strategy::Value(value::kqkr),
            EndgameKind::Kbpsk => Strategy::Scale(scale::kbpsk),
            EndgameKind::Kqkrps => Strategy::Scale(scale::kqkrps),
            EndgameKind::Krpkr => Strategy::Scale(scale::krpkr),
            EndgameKind::Krpkb => Strategy::Scale(scale::krpkb),
            EndgameKind::Krppkrp => Strategy::Scale(scale::krppkrp),
            EndgameKind::Kpsk => Strategy::Scale(scale::kpsk),
            EndgameKind::Kbpkb => Strategy::Scale(scale::kbpkb),
            EndgameKind::Kbppkb => Strategy::Scale(scale::kbppkb),
            EndgameKind::Kbpkn => Strategy::Scale(scale::kbpkn),
            EndgameKind::Knpk => Strategy::Scale(scale::knpk),
            EndgameKind::Knpkb => Strategy::Scale(scale::knpkb),
        }
    }
}

impl fmt::Display for EndgameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use cozy_chess::{get_king_moves, get_pawn_attacks, Color, File, Rank, Square};
use log::debug;
use utils::board::distance;

/// White to move / black to move, 64 white king squares, 64 black king
/// squares and 24 pawn squares (files a-d, ranks 2-7).
pub const MAX_INDEX: usize = 2 * 24 * 64 * 64;

/// Outcome of a position from White's point of view. The discriminants are
/// bit flags so successor outcomes can be or-ed together.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
enum Outcome {
    Invalid = 0,
    Unknown = 1,
    Draw = 2,
    Win = 4,
}

/// Index of a position. The pawn must be on files a-d and ranks 2-7.
#[inline(always)]
pub fn index(stm: Color, bksq: Square, wksq: Square, psq: Square) -> usize {
    debug_assert!(psq.file() <= File::D);
    debug_assert!(psq.rank() >= Rank::Second && psq.rank() <= Rank::Seventh);

    wksq as usize
        | (bksq as usize) << 6
        | (stm as usize) << 12
        | (psq.file() as usize) << 13
        | (Rank::Seventh as usize - psq.rank() as usize) << 15
}

struct KpkPosition {
    stm: Color,
    wksq: Square,
    bksq: Square,
    psq: Square,
    outcome: Outcome,
}

impl KpkPosition {
    fn new(idx: usize) -> Self {
        let wksq = Square::index(idx & 0x3F);
        let bksq = Square::index((idx >> 6) & 0x3F);
        let stm = if (idx >> 12) & 0x01 == 0 {
            Color::White
        } else {
            Color::Black
        };
        let psq = Square::new(
            File::index((idx >> 13) & 0x03),
            Rank::index(Rank::Seventh as usize - (idx >> 15)),
        );

        let mut pos = Self {
            stm,
            wksq,
            bksq,
            psq,
            outcome: Outcome::Unknown,
        };
        pos.outcome = pos.initial_outcome();
        pos
    }

    /// The square the pawn advances to.
    #[inline(always)]
    fn push(&self) -> Square {
        Square::index(self.psq as usize + 8)
    }

    fn initial_outcome(&self) -> Outcome {
        let (wksq, bksq, psq) = (self.wksq, self.bksq, self.psq);

        // Overlapping pieces, touching kings, or the side not to move in check
        if distance(wksq, bksq) <= 1
            || wksq == psq
            || bksq == psq
            || (self.stm == Color::White && get_pawn_attacks(psq, Color::White).has(bksq))
        {
            return Outcome::Invalid;
        }

        // Pawn on the 7th promotes without being captured
        if self.stm == Color::White && psq.rank() == Rank::Seventh {
            let push = self.push();
            if wksq != push
                && (distance(bksq, push) > 1 || get_king_moves(wksq).has(push))
            {
                return Outcome::Win;
            }
        }

        if self.stm == Color::Black {
            let black_moves = get_king_moves(bksq);
            let covered = get_king_moves(wksq) | get_pawn_attacks(psq, Color::White);

            // Stalemate
            if (black_moves & !covered).is_empty() {
                return Outcome::Draw;
            }

            // Undefended pawn can be taken
            if black_moves.has(psq) && !get_king_moves(wksq).has(psq) {
                return Outcome::Draw;
            }
        }

        Outcome::Unknown
    }

    /// Combine the outcomes of all successors. White needs one winning move,
    /// Black needs one move that does not lose.
    fn classify(&self, db: &[KpkPosition]) -> Outcome {
        let (good, bad) = match self.stm {
            Color::White => (Outcome::Win, Outcome::Draw),
            Color::Black => (Outcome::Draw, Outcome::Win),
        };

        let mut r = Outcome::Invalid as u8;

        match self.stm {
            Color::White => {
                for to in get_king_moves(self.wksq) {
                    r |= db[index(Color::Black, self.bksq, to, self.psq)].outcome as u8;
                }

                let push = self.push();
                if self.psq.rank() < Rank::Seventh {
                    r |= db[index(Color::Black, self.bksq, self.wksq, push)].outcome as u8;
                }

                if self.psq.rank() == Rank::Second && push != self.wksq && push != self.bksq {
                    let double = Square::index(push as usize + 8);
                    r |= db[index(Color::Black, self.bksq, self.wksq, double)].outcome as u8;
                }
            }
            Color::Black => {
                for to in get_king_moves(self.bksq) {
                    r |= db[index(Color::White, to, self.wksq, self.psq)].outcome as u8;
                }
            }
        }

        if r & good as u8 != 0 {
            good
        } else if r & Outcome::Unknown as u8 != 0 {
            Outcome::Unknown
        } else {
            bad
        }
    }
}

/// One bit per position: set when White wins.
pub struct KpkBitbase {
    bits: Box<[u32]>,
}

impl KpkBitbase {
    /// Retrograde analysis over every position until nothing changes.
    /// Whatever is still unknown afterwards is a draw.
    pub fn generate() -> Self {
        let mut db: Vec<KpkPosition> = (0..MAX_INDEX).map(KpkPosition::new).collect();

        let mut passes = 0;
        let mut repeat = true;
        while repeat {
            repeat = false;
            for idx in 0..MAX_INDEX {
                if db[idx].outcome != Outcome::Unknown {
                    continue;
                }
                let outcome = db[idx].classify(&db);
                if outcome != Outcome::Unknown {
                    db[idx].outcome = outcome;
                    repeat = true;
                }
            }
            passes += 1;
        }

        let mut bits = vec![0u32; MAX_INDEX / 32].into_boxed_slice();
        let mut wins = 0;
        for (idx, pos) in db.iter().enumerate() {
            if pos.outcome == Outcome::Win {
                bits[idx / 32] |= 1 << (idx & 0x1F);
                wins += 1;
            }
        }

        debug!("KPK bitbase: {} wins after {} passes", wins, passes);

        Self { bits }
    }

    /// Whether White wins. White holds the pawn, which must be on files a-d.
    #[inline(always)]
    pub fn probe(&self, wksq: Square, wpsq: Square, bksq: Square, stm: Color) -> bool {
        let idx = index(stm, bksq, wksq, wpsq);
        self.bits[idx / 32] & (1 << (idx & 0x1F)) != 0
    }
}

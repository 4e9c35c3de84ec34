use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::participant::PlayerId;

/// One of the three bases a runner can occupy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum Base {
    #[display("1st")]
    First,
    #[display("2nd")]
    Second,
    #[display("3rd")]
    Third,
}

impl Base {
    pub const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];

    /// Zero-based slot index (1st base is 0).
    #[must_use]
    pub const fn slot(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }
}

/// Players who crossed home plate during one play.
///
/// At most four: three runners plus the batter.
pub type Scorers = ArrayVec<PlayerId, 4>;

/// Base occupancy: three optional slots holding runner ids.
///
/// A player occupies at most one slot. All movement operations treat the current
/// occupants as a snapshot and rebuild the slots from it, so a runner can never be
/// placed twice.
///
/// # Example
///
/// ```
/// use dugout_engine::{Base, Bases, PlayerId, Side};
///
/// let a = PlayerId::new(Side::Away, 1);
/// let b = PlayerId::new(Side::Away, 2);
///
/// let mut bases = Bases::EMPTY;
/// bases.advance(a, 2); // double
/// let scored = bases.advance(b, 1); // single
///
/// assert!(scored.is_empty());
/// assert_eq!(bases.get(Base::First), Some(b));
/// assert_eq!(bases.get(Base::Third), Some(a));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bases([Option<PlayerId>; 3]);

impl Bases {
    pub const EMPTY: Self = Self([None; 3]);

    #[must_use]
    pub const fn from_slots(slots: [Option<PlayerId>; 3]) -> Self {
        Self(slots)
    }

    #[must_use]
    pub const fn slots(&self) -> &[Option<PlayerId>; 3] {
        &self.0
    }

    #[must_use]
    pub const fn get(&self, base: Base) -> Option<PlayerId> {
        self.0[base.slot()]
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn runner_count(&self) -> usize {
        self.0.iter().flatten().count()
    }

    /// Returns `true` when a runner stands on 2nd or 3rd.
    #[must_use]
    pub fn scoring_position_occupied(&self) -> bool {
        self.0[1].is_some() || self.0[2].is_some()
    }

    pub fn runners(&self) -> impl Iterator<Item = (Base, PlayerId)> + '_ {
        Base::ALL
            .into_iter()
            .filter_map(|base| self.get(base).map(|id| (base, id)))
    }

    /// Returns the base `player` stands on.
    #[must_use]
    pub fn position_of(&self, player: PlayerId) -> Option<Base> {
        self.runners()
            .find_map(|(base, id)| (id == player).then_some(base))
    }

    /// Returns the first player found on more than one base.
    #[must_use]
    pub fn duplicate_runner(&self) -> Option<PlayerId> {
        let [a, b, c] = self.0;
        [(a, b), (a, c), (b, c)]
            .into_iter()
            .find_map(|(x, y)| x.filter(|x| Some(*x) == y))
    }

    pub fn clear(&mut self) {
        self.0 = [None; 3];
    }

    /// Moves every runner and the batter forward `bases` bases at once.
    ///
    /// Runners are processed 3rd to 1st, then the batter. Anyone whose target is home
    /// (index 4 or more) scores instead of occupying a slot.
    pub fn advance(&mut self, batter: PlayerId, bases: usize) -> Scorers {
        debug_assert!((1..=4).contains(&bases), "hit must advance 1 to 4 bases");
        let snapshot = self.0;
        self.clear();

        let mut scored = Scorers::new();
        let starts = [(3, snapshot[2]), (2, snapshot[1]), (1, snapshot[0]), (0, Some(batter))];
        for (start, runner) in starts {
            let Some(runner) = runner else {
                continue;
            };
            let target = start + bases;
            if target >= 4 {
                scored.push(runner);
            } else {
                self.0[target - 1] = Some(runner);
            }
        }
        scored
    }

    /// Puts the batter on 1st, pushing only forced runners.
    ///
    /// A runner moves only when the base behind them is taken; with the bases loaded
    /// the runner on 3rd is forced home and returned.
    pub fn force_advance(&mut self, batter: PlayerId) -> Option<PlayerId> {
        let mut incoming = batter;
        for slot in &mut self.0 {
            match slot.replace(incoming) {
                Some(displaced) => incoming = displaced,
                None => return None,
            }
        }
        Some(incoming)
    }
}

/// Renders as `[away#3, -, away#5]`, first base first.
impl fmt::Display for Bases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match slot {
                Some(id) => write!(f, "{id}")?,
                None => f.write_str("-")?,
            }
        }
        f.write_str("]")
    }
}

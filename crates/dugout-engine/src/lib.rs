pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A structural invariant of [`MatchState`] was found broken between turns.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StateInvariantError {
    #[display("outs out of range: {outs}")]
    OutsOutOfRange { outs: u32 },
    #[display("inning out of range: {inning}")]
    InningOutOfRange { inning: u32 },
    #[display("runner {player} occupies more than one base")]
    DuplicateRunner { player: PlayerId },
    #[display("runner {player} on {base} is not on the batting side")]
    ForeignRunner { base: Base, player: PlayerId },
}

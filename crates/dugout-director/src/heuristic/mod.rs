//! Built-in collaborators that decide without any external service.
//!
//! Every collaborator here is deterministic given its random generator, and
//! [`collaborators`] derives all of them from one [`MatchSeed`], so a seed fully
//! determines a match.
//!
//! | Role | Collaborator | Behavior |
//! |---|---|---|
//! | environment | [`SteadyEnvironment`] | conditions change only between half-innings |
//! | managers | [`BullpenManager`] | situational strategy, pulls tired pitchers |
//! | pitcher | [`RepertoirePitcher`] | pitches weighted by grade, effort by situation |
//! | batter | [`GuessingBatter`] | guesses the best pitch as often as the eye allows |
//! | judge | [`WeightedJudge`] | outcome table shaped by the turn |
//! | validator | [`RuleValidator`] | checks claims against the rule engine |

pub use self::{
    batter::GuessingBatter, environment::SteadyEnvironment, judge::WeightedJudge,
    manager::BullpenManager, pitcher::RepertoirePitcher, seed::*, validator::RuleValidator,
};
use crate::provider::Collaborators;

mod batter;
mod environment;
mod judge;
mod manager;
mod pitcher;
mod seed;
mod validator;

/// The full heuristic set, each collaborator on its own stream of `seed`.
#[must_use]
pub fn collaborators(seed: MatchSeed) -> Collaborators {
    Collaborators {
        environment: Box::new(SteadyEnvironment::new(seed.rng(0))),
        home_manager: Box::new(BullpenManager::new(seed.rng(1))),
        away_manager: Box::new(BullpenManager::new(seed.rng(2))),
        pitcher: Box::new(RepertoirePitcher::new(seed.rng(3))),
        batter: Box::new(GuessingBatter::new(seed.rng(4))),
        judge: Box::new(WeightedJudge::new(seed.rng(5))),
        validator: Box::new(RuleValidator),
    }
}

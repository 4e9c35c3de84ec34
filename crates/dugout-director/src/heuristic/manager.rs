use dugout_engine::{Base, Side};
use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::{
    context::TurnContext,
    decision::{ManagerDecision, TeamStrategy},
    provider::{ManagerProvider, ProviderError},
};

/// A by-the-book manager.
///
/// Pulls a tired pitcher while the bullpen lasts and picks strategies from the
/// inning, score, outs and runners.
#[derive(Debug)]
pub struct BullpenManager {
    rng: Pcg32,
    pull_below: f32,
}

impl BullpenManager {
    #[must_use]
    pub fn new(rng: Pcg32) -> Self {
        Self {
            rng,
            pull_below: 0.3,
        }
    }

    /// Stamina ratio under which the pitcher is replaced.
    #[must_use]
    pub fn with_pull_threshold(self, pull_below: f32) -> Self {
        Self { pull_below, ..self }
    }

    fn offense_strategy(&mut self, ctx: &TurnContext, side: Side) -> TeamStrategy {
        let diff = ctx.score_diff(side);
        let late = ctx.inning >= 7;
        let on_first = ctx.bases.get(Base::First).is_some();
        let open_second = ctx.bases.get(Base::Second).is_none();

        if late && on_first && open_second && ctx.outs == 0 && (-1..=0).contains(&diff) {
            return TeamStrategy::Bunt;
        }
        if late && diff <= -3 {
            return TeamStrategy::LongBall;
        }
        if on_first && ctx.outs < 2 && self.rng.random_bool(0.2) {
            return TeamStrategy::HitAndRun;
        }
        if ctx.bases.is_empty() && ctx.batter.power >= 75 && self.rng.random_bool(0.3) {
            return TeamStrategy::LongBall;
        }
        TeamStrategy::Normal
    }

    fn defense_strategy(ctx: &TurnContext, side: Side) -> TeamStrategy {
        let close = ctx.score_diff(side).abs() <= 1;
        if ctx.inning >= 7 && close && ctx.outs < 2 && ctx.bases.get(Base::Third).is_some() {
            TeamStrategy::InfieldIn
        } else {
            TeamStrategy::Normal
        }
    }
}

impl ManagerProvider for BullpenManager {
    fn decide_strategy(
        &mut self,
        context: &TurnContext,
        side: Side,
    ) -> Result<ManagerDecision, ProviderError> {
        if side == context.offense() {
            let offense_strategy = self.offense_strategy(context, side);
            return Ok(ManagerDecision {
                offense_strategy,
                defense_strategy: TeamStrategy::Normal,
                change_pitcher: false,
                description: format!(
                    "{} go {offense_strategy} with {} up",
                    context.team_name(side),
                    context.batter.name
                ),
            });
        }

        let defense_strategy = Self::defense_strategy(context, side);
        let tired = context.pitcher.stamina_ratio() < self.pull_below;
        let change_pitcher = tired && context.remaining_relievers > 0;
        let description = if change_pitcher {
            format!(
                "{} is spent after {} pitches, going to the bullpen",
                context.pitcher.name, context.pitcher.pitch_count
            )
        } else {
            format!("{} play {defense_strategy} defense", context.team_name(side))
        };
        Ok(ManagerDecision {
            offense_strategy: TeamStrategy::Normal,
            defense_strategy,
            change_pitcher,
            description,
        })
    }
}

use rand::{Rng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;

use crate::{
    context::TurnContext,
    decision::{BatterDecision, BattingStyle, PitchLocation, PitchType, TeamStrategy},
    provider::{BatterProvider, ProviderError},
};

/// Sits on the pitcher's best pitch.
///
/// The better the batter's eye, the more often the guess is the pitcher's top-graded
/// pitch rather than a random one. Style follows the manager's strategy.
#[derive(Debug)]
pub struct GuessingBatter {
    rng: Pcg32,
}

impl GuessingBatter {
    #[must_use]
    pub fn new(rng: Pcg32) -> Self {
        Self { rng }
    }
}

fn best_pitch(ctx: &TurnContext) -> PitchType {
    PitchType::ALL
        .into_iter()
        .rev()
        .max_by_key(|p| p.grade(&ctx.pitcher.repertoire))
        .unwrap_or(PitchType::Fastball)
}

fn style(ctx: &TurnContext, strategy: TeamStrategy) -> BattingStyle {
    match strategy {
        TeamStrategy::LongBall => BattingStyle::Pull,
        TeamStrategy::HitAndRun => BattingStyle::Push,
        TeamStrategy::Bunt => BattingStyle::Cautious,
        TeamStrategy::Normal | TeamStrategy::InfieldIn => {
            if ctx.outs == 2 || ctx.batter.power > ctx.batter.contact {
                BattingStyle::Aggressive
            } else {
                BattingStyle::Cautious
            }
        }
    }
}

impl BatterProvider for GuessingBatter {
    fn decide_swing(
        &mut self,
        context: &TurnContext,
        strategy: TeamStrategy,
    ) -> Result<BatterDecision, ProviderError> {
        let eye = f64::from(context.batter.eye) / 100.0;
        let aim_pitch_type = if self.rng.random_bool(eye.clamp(0.0, 1.0)) {
            Some(best_pitch(context))
        } else {
            PitchType::ALL.choose(&mut self.rng).copied()
        };
        let style = style(context, strategy);
        let aim_location = match style {
            BattingStyle::Cautious => None,
            _ => PitchLocation::ALL.choose(&mut self.rng).copied(),
        };

        let description = match aim_pitch_type {
            Some(pitch) => format!("{} sits {pitch}, {style}", context.batter.name),
            None => format!("{} looks for anything, {style}", context.batter.name),
        };
        Ok(BatterDecision {
            aim_pitch_type,
            aim_location,
            style,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use dugout_engine::Repertoire;

    use super::*;
    use crate::{context::tests::new_match, heuristic::MatchSeed};

    #[test]
    fn test_best_pitch_prefers_highest_grade() {
        let mut ctx = TurnContext::capture(&new_match());
        assert_eq!(best_pitch(&ctx), PitchType::Fastball);

        ctx.pitcher.repertoire = Repertoire {
            curve: 90,
            ..Repertoire::default()
        };
        assert_eq!(best_pitch(&ctx), PitchType::Curve);
    }

    #[test]
    fn test_perfect_eye_always_guesses_best_pitch() {
        let mut ctx = TurnContext::capture(&new_match());
        ctx.batter.eye = 100;
        ctx.pitcher.repertoire.splitter = 95;
        let mut batter = GuessingBatter::new(MatchSeed::from_bytes([4; 16]).rng(0));
        for _ in 0..20 {
            let swing = batter.decide_swing(&ctx, TeamStrategy::Normal).unwrap();
            assert_eq!(swing.aim_pitch_type, Some(PitchType::Splitter));
        }
    }

    #[test]
    fn test_style_follows_strategy() {
        let mut ctx = TurnContext::capture(&new_match());
        assert_eq!(style(&ctx, TeamStrategy::LongBall), BattingStyle::Pull);
        assert_eq!(style(&ctx, TeamStrategy::HitAndRun), BattingStyle::Push);
        assert_eq!(style(&ctx, TeamStrategy::Normal), BattingStyle::Cautious);
        ctx.outs = 2;
        assert_eq!(style(&ctx, TeamStrategy::Normal), BattingStyle::Aggressive);
    }
}

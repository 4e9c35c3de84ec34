use dugout_engine::Half;
use rand::{Rng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;

use crate::{
    context::TurnContext,
    decision::{Environment, UmpireZone, Weather},
    provider::{EnvironmentProvider, ProviderError},
};

const WINDS: [&str; 5] = [
    "calm",
    "blowing out to center",
    "blowing in from left",
    "crosswind from right",
    "gusting",
];

/// Keeps conditions stable within a half-inning.
///
/// At the start of each half-inning the weather and the umpire's zone each have a
/// small chance of changing.
#[derive(Debug)]
pub struct SteadyEnvironment {
    rng: Pcg32,
    change_chance: f64,
    last_half: Option<(u32, Half)>,
}

impl SteadyEnvironment {
    #[must_use]
    pub fn new(rng: Pcg32) -> Self {
        Self {
            rng,
            change_chance: 0.15,
            last_half: None,
        }
    }
}

impl EnvironmentProvider for SteadyEnvironment {
    fn update_environment(
        &mut self,
        context: &TurnContext,
        current: &Environment,
    ) -> Result<Environment, ProviderError> {
        let half = (context.inning, context.half);
        if self.last_half == Some(half) {
            return Ok(current.clone());
        }
        self.last_half = Some(half);

        let mut next = current.clone();
        if self.rng.random_bool(self.change_chance) {
            next.weather = *Weather::ALL.choose(&mut self.rng).unwrap_or(&current.weather);
            next.wind = (*WINDS.choose(&mut self.rng).unwrap_or(&"calm")).to_owned();
        }
        if self.rng.random_bool(self.change_chance) {
            next.umpire_zone = *UmpireZone::ALL
                .choose(&mut self.rng)
                .unwrap_or(&current.umpire_zone);
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::tests::new_match, heuristic::MatchSeed};

    #[test]
    fn test_conditions_hold_within_half_inning() {
        let mut env = SteadyEnvironment::new(MatchSeed::from_bytes([3; 16]).rng(0));
        env.change_chance = 1.0;
        let mut ctx = TurnContext::capture(&new_match());

        let first = env.update_environment(&ctx, &Environment::default()).unwrap();
        // Same half-inning: returned unchanged even with a certain change chance.
        let custom = Environment {
            weather: Weather::Rainy,
            wind: "gusting".to_owned(),
            umpire_zone: UmpireZone::Wide,
        };
        ctx.outs = 2;
        assert_eq!(env.update_environment(&ctx, &custom).unwrap(), custom);

        ctx.half = Half::Bottom;
        let _ = env.update_environment(&ctx, &first).unwrap();
        assert_eq!(env.last_half, Some((1, Half::Bottom)));
    }

    #[test]
    fn test_no_change_when_chance_is_zero() {
        let mut env = SteadyEnvironment::new(MatchSeed::from_bytes([3; 16]).rng(0));
        env.change_chance = 0.0;
        let ctx = TurnContext::capture(&new_match());
        let current = Environment::default();
        assert_eq!(env.update_environment(&ctx, &current).unwrap(), current);
    }
}

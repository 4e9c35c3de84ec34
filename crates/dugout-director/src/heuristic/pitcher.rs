use dugout_engine::Effort;
use rand::distr::{
    Distribution as _,
    weighted::{self, WeightedIndex},
};
use rand_pcg::Pcg32;

use crate::{
    context::TurnContext,
    decision::{PitchLocation, PitchType, PitcherDecision, TeamStrategy},
    provider::{CollaboratorRole, PitcherProvider, ProviderError},
};

/// Throws pitches in proportion to their repertoire grades.
///
/// Goes full effort with a runner in scoring position while the arm is fresh, and
/// turns to finesse once it is tired.
#[derive(Debug)]
pub struct RepertoirePitcher {
    rng: Pcg32,
}

impl RepertoirePitcher {
    #[must_use]
    pub fn new(rng: Pcg32) -> Self {
        Self { rng }
    }
}

fn effort(ctx: &TurnContext) -> Effort {
    let fresh = ctx.pitcher.stamina_ratio();
    if fresh < 0.25 {
        Effort::Finesse
    } else if ctx.bases.scoring_position_occupied() && fresh > 0.4 {
        Effort::FullPower
    } else {
        Effort::Normal
    }
}

fn location_weights(ctx: &TurnContext, strategy: TeamStrategy) -> [u32; 5] {
    // High, Low, Inside, Outside, Middle
    let mistakes = u32::from(100_u8.saturating_sub(ctx.pitcher.control) / 20).max(1);
    let low = if strategy == TeamStrategy::InfieldIn { 8 } else { 3 };
    [2, low, 2, 3, mistakes]
}

impl PitcherProvider for RepertoirePitcher {
    fn decide_pitch(
        &mut self,
        context: &TurnContext,
        strategy: TeamStrategy,
    ) -> Result<PitcherDecision, ProviderError> {
        let malformed = |e: weighted::Error| ProviderError::malformed(CollaboratorRole::Pitcher, e);

        let grades = PitchType::ALL.map(|p| u32::from(p.grade(&context.pitcher.repertoire)) + 1);
        let pitch_type =
            PitchType::ALL[WeightedIndex::new(grades).map_err(malformed)?.sample(&mut self.rng)];
        let location = PitchLocation::ALL[WeightedIndex::new(location_weights(context, strategy))
            .map_err(malformed)?
            .sample(&mut self.rng)];
        let effort = effort(context);

        Ok(PitcherDecision {
            pitch_type,
            location,
            effort,
            description: format!(
                "{} comes with a {pitch_type}, {location} ({effort:?})",
                context.pitcher.name
            ),
        })
    }
}

//! Outcome judgment from a weighted table.
//!
//! The base table is the league-average mix:
//!
//! | 1B | 2B | 3B | HR | BB | SO | outs in play |
//! |---|---|---|---|---|---|---|
//! | 15 | 5 | 1 | 3 | 11 | 25 | 40 |
//!
//! Each weight is then scaled by the matchup (contact against control, power against
//! stuff), pitcher fatigue, whether the batter read the pitch, the umpire's zone, the
//! weather, and the managers' strategies. Errors and hit batsmen get small weights of
//! their own.

use dugout_engine::{OutcomeCode, OutcomeJudgment, rule_engine};
use rand::distr::{
    Distribution as _,
    weighted::{self, WeightedIndex},
};
use rand_pcg::Pcg32;

use crate::{
    decision::{BattingStyle, PitchLocation, TeamStrategy, UmpireZone, Weather},
    provider::{CollaboratorRole, JudgeProvider, JudgmentRequest, ProviderError},
};

const TABLE: [(OutcomeCode, f64); 13] = [
    (OutcomeCode::Single, 15.0),
    (OutcomeCode::Double, 5.0),
    (OutcomeCode::Triple, 1.0),
    (OutcomeCode::HomeRun, 3.0),
    (OutcomeCode::Walk, 11.0),
    (OutcomeCode::HitByPitch, 0.5),
    (OutcomeCode::Error, 0.0),
    (OutcomeCode::Strikeout, 25.0),
    (OutcomeCode::GroundOut, 18.0),
    (OutcomeCode::FlyOut, 12.0),
    (OutcomeCode::LineOut, 6.0),
    (OutcomeCode::PopOut, 4.0),
    (OutcomeCode::Out, 0.0),
];

/// Rolls outcomes from a weighted table shaped by the whole turn.
///
/// The claimed bases and runs are filled in from the rule engine's projection, so a
/// [`RuleValidator`](super::RuleValidator) accepts every judgment it produces.
#[derive(Debug)]
pub struct WeightedJudge {
    rng: Pcg32,
}

impl WeightedJudge {
    #[must_use]
    pub fn new(rng: Pcg32) -> Self {
        Self { rng }
    }
}

fn ratio(a: u8, b: u8) -> f64 {
    1.0 + (f64::from(a) - f64::from(b)) / 100.0
}

/// Outcome weights for `request`, in [`TABLE`] order.
pub(crate) fn weights(request: &JudgmentRequest<'_>) -> [f64; 13] {
    let ctx = request.context;
    let (batter, pitcher) = (&ctx.batter, &ctx.pitcher);

    let mut hit = ratio(batter.contact, pitcher.control);
    let mut extra = ratio(batter.power, pitcher.stuff);
    let mut walk = ratio(batter.eye, pitcher.control);
    let mut strikeout = ratio(pitcher.stuff, batter.contact);
    let mut error = f64::from(ctx.defense.error) / 50.0;
    let fielding = 0.5 + f64::from(ctx.defense.range) / 100.0;

    if pitcher.stamina_ratio() < 0.3 {
        hit *= 1.3;
        walk *= 1.3;
        strikeout *= 0.8;
    }
    if request.swing.read_pitch(request.pitch) {
        hit *= 1.5;
        extra *= 1.3;
    } else {
        strikeout *= 1.2;
    }
    if request.swing.read_location(request.pitch) {
        hit *= 1.2;
    }
    if request.pitch.location == PitchLocation::Middle {
        hit *= 1.3;
        extra *= 1.3;
    }
    match request.pitch.effort {
        dugout_engine::Effort::FullPower => strikeout *= 1.2,
        dugout_engine::Effort::Finesse => walk *= 1.2,
        dugout_engine::Effort::Normal => {}
    }
    match request.swing.style {
        BattingStyle::Aggressive => {
            extra *= 1.1;
            strikeout *= 1.1;
            walk *= 0.8;
        }
        BattingStyle::Cautious => walk *= 1.2,
        BattingStyle::Pull => extra *= 1.15,
        BattingStyle::Push => hit *= 1.05,
    }
    match request.environment.umpire_zone {
        UmpireZone::Normal => {}
        UmpireZone::Wide => {
            strikeout *= 1.2;
            walk *= 0.7;
        }
        UmpireZone::Narrow => {
            strikeout *= 0.85;
            walk *= 1.3;
        }
        UmpireZone::Erratic => {
            strikeout *= 1.1;
            walk *= 1.1;
        }
    }
    let mut home_run = 1.0;
    match request.environment.weather {
        Weather::Rainy => error *= 3.0,
        Weather::Windy => home_run *= 1.2,
        Weather::Sunny | Weather::Cloudy => {}
    }
    let mut ground = 1.0;
    match request.offense.offense_strategy {
        TeamStrategy::LongBall => {
            home_run *= 1.3;
            strikeout *= 1.2;
        }
        TeamStrategy::Bunt => ground *= 1.5,
        TeamStrategy::HitAndRun => strikeout *= 0.9,
        TeamStrategy::Normal | TeamStrategy::InfieldIn => {}
    }
    if request.defense.defense_strategy == TeamStrategy::InfieldIn {
        hit *= 1.1;
        ground *= 1.2;
    }

    TABLE.map(|(code, base)| {
        let factor = match code {
            OutcomeCode::Single => hit,
            OutcomeCode::Double | OutcomeCode::Triple => hit * extra,
            OutcomeCode::HomeRun => extra * home_run,
            OutcomeCode::Walk => walk,
            OutcomeCode::HitByPitch => 1.0,
            OutcomeCode::Error => return error,
            OutcomeCode::Strikeout => strikeout,
            OutcomeCode::GroundOut => ground * fielding,
            OutcomeCode::FlyOut | OutcomeCode::LineOut | OutcomeCode::PopOut | OutcomeCode::Out => {
                fielding
            }
        };
        (base * factor).max(0.0)
    })
}

/// Play-by-play line for an outcome.
fn narrate(code: OutcomeCode, request: &JudgmentRequest<'_>) -> String {
    let batter = &request.context.batter.name;
    let pitcher = &request.context.pitcher.name;
    let pitch = request.pitch.pitch_type;
    match code {
        OutcomeCode::Single => format!("{batter} lines a single off the {pitch}"),
        OutcomeCode::Double => format!("{batter} drives a double into the gap"),
        OutcomeCode::Triple => format!("{batter} legs out a triple"),
        OutcomeCode::HomeRun => format!("{batter} hits a home run off {pitcher}"),
        OutcomeCode::Walk => format!("{pitcher} walks {batter}"),
        OutcomeCode::HitByPitch => format!("{batter} is hit by the {pitch}"),
        OutcomeCode::Error => format!("{batter} reaches on a fielding error"),
        OutcomeCode::Strikeout => format!("{pitcher} strikes out {batter} with the {pitch}"),
        OutcomeCode::GroundOut => format!("{batter} grounds out"),
        OutcomeCode::FlyOut => format!("{batter} flies out"),
        OutcomeCode::LineOut => format!("{batter} lines out"),
        OutcomeCode::PopOut => format!("{batter} pops out"),
        OutcomeCode::Out => format!("{batter} is out"),
    }
}

impl JudgeProvider for WeightedJudge {
    fn judge(&mut self, request: &JudgmentRequest<'_>) -> Result<OutcomeJudgment, ProviderError> {
        let index = WeightedIndex::new(weights(request))
            .map_err(|e: weighted::Error| ProviderError::malformed(CollaboratorRole::Judge, e))?;
        let code = TABLE[index.sample(&mut self.rng)].0;

        let ctx = request.context;
        let (bases, result) = rule_engine::project(&ctx.bases, ctx.batter.id, code);
        let mut reasoning = format!(
            "{} {} vs {} ({})",
            request.pitch.location, request.pitch.pitch_type, ctx.batter.name, request.swing.style
        );
        if let Some(rejected) = request.feedback {
            reasoning.push_str(&format!(", revised after: {}", rejected.reasoning));
        }
        Ok(OutcomeJudgment {
            code,
            description: narrate(code, request),
            reasoning,
            final_bases: *bases.slots(),
            runs_scored: result.runs(),
        })
    }
}

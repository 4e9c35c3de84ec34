use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, Side};

use super::{match_state::Half, outcome::OutcomeCode};

/// An entry of the append-only match log.
///
/// `Display` renders the play-by-play line, prefixed with the half-inning
/// (`[T3]` is the top of the 3rd).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchEvent {
    PlateAppearance {
        inning: u32,
        half: Half,
        batter: PlayerId,
        pitcher: PlayerId,
        code: OutcomeCode,
        description: String,
        runs: u32,
    },
    PitchingChange {
        inning: u32,
        half: Half,
        side: Side,
        from: PlayerId,
        to: PlayerId,
    },
    HalfInningEnd {
        inning: u32,
        half: Half,
        home_score: u32,
        away_score: u32,
    },
    GameEnd {
        innings: u32,
        home_score: u32,
        away_score: u32,
    },
}

struct Frame(u32, Half);

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = match self.1 {
            Half::Top => 'T',
            Half::Bottom => 'B',
        };
        write!(f, "[{half}{}]", self.0)
    }
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlateAppearance {
                inning,
                half,
                code,
                description,
                runs,
                ..
            } => {
                write!(f, "{} {code}: {description}", Frame(*inning, *half))?;
                if *runs > 0 {
                    write!(f, " ({runs} run{})", if *runs == 1 { "" } else { "s" })?;
                }
                Ok(())
            }
            Self::PitchingChange {
                inning,
                half,
                side,
                from,
                to,
            } => write!(
                f,
                "{} pitching change ({side}): {from} -> {to}",
                Frame(*inning, *half)
            ),
            Self::HalfInningEnd {
                inning,
                half,
                home_score,
                away_score,
            } => write!(
                f,
                "{} end of half-inning, away {away_score} - home {home_score}",
                Frame(*inning, *half)
            ),
            Self::GameEnd {
                innings,
                home_score,
                away_score,
            } => write!(
                f,
                "final after {innings} innings, away {away_score} - home {home_score}"
            ),
        }
    }
}

use chrono::{DateTime, Utc};
use dugout_director::{heuristic::MatchSeed, orchestrator::RetryPolicy};
use dugout_engine::{
    Base, BattingView, Half, MatchEvent, MatchRules, MatchState, MatchStatus, OutcomeJudgment,
    PitchingView, PlayerId, Side, TeamSheet,
};
use serde::{Deserialize, Serialize};

/// A played match with everything needed to replay it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Timestamp when recording was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Seed of the built-in collaborators
    pub seed: MatchSeed,
    pub rules: MatchRules,
    pub retry: RetryPolicy,
    pub home: TeamSheet,
    pub away: TeamSheet,
    pub home_score: u32,
    pub away_score: u32,
    /// `None` while unfinished
    pub winner: Option<Side>,
    pub status: MatchStatus,
    /// Set when the match was abandoned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    pub plays: Vec<StepRecord>,
    pub events: Vec<MatchEvent>,
}

/// The match as it stood right after one plate appearance was committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub inning: u32,
    pub half: Half,
    /// Outs including this play; 3 on the play that ends the half
    pub outs: u32,
    pub home_score: u32,
    pub away_score: u32,
    pub batter: BatterLine,
    pub pitcher: PitcherLine,
    pub runners: Vec<RunnerLine>,
    pub judgment: OutcomeJudgment,
    /// Who bats next for this side
    pub next_batter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatterLine {
    pub id: PlayerId,
    pub name: String,
    pub position: String,
    pub stats: Option<BattingView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitcherLine {
    pub id: PlayerId,
    pub name: String,
    pub stats: Option<PitchingView>,
    pub current_stamina: u32,
    pub pitch_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerLine {
    pub base: Base,
    pub id: PlayerId,
    pub name: String,
}

impl StepRecord {
    /// Captures the play just committed to `state`.
    ///
    /// Returns `None` when no plate appearance has been played yet.
    pub fn capture(state: &MatchState) -> Option<Self> {
        let (batter, pitcher) = state.events().iter().rev().find_map(|event| match event {
            MatchEvent::PlateAppearance {
                batter, pitcher, ..
            } => Some((state.player(*batter)?, state.player(*pitcher)?)),
            _ => None,
        })?;

        let runners = state
            .bases()
            .runners()
            .map(|(base, id)| RunnerLine {
                base,
                id,
                name: state.player(id).map_or_else(|| id.to_string(), |p| p.name().to_owned()),
            })
            .collect();

        Some(Self {
            inning: state.inning(),
            half: state.half(),
            outs: state.outs(),
            home_score: state.home_score(),
            away_score: state.away_score(),
            batter: BatterLine {
                id: batter.id(),
                name: batter.name().to_owned(),
                position: batter.participant().position.clone(),
                stats: batter.participant().batting(),
            },
            pitcher: PitcherLine {
                id: pitcher.id(),
                name: pitcher.name().to_owned(),
                stats: pitcher.participant().pitching(),
                current_stamina: pitcher.current_stamina(),
                pitch_count: pitcher.pitch_count(),
            },
            runners,
            judgment: state.last_judgment()?.clone(),
            next_batter: state.current_batter().name().to_owned(),
        })
    }
}

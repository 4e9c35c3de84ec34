//! Deterministic translation of an outcome into bases, runs, and outs.
//!
//! | Family | Effect |
//! |---|---|
//! | N-base hit | runners and batter advance N bases at once; reaching home scores |
//! | Walk, hit-by-pitch, error | batter to 1st, forced runners pushed, loaded bases force in one run |
//! | Out | outs + 1, runners hold |
//!
//! Runs are always computed here. Whatever run count or base list a collaborator
//! claimed in its judgment is ignored for scoring.

use serde::{Deserialize, Serialize};

use crate::core::{Bases, PlayerId, Scorers, Side};

use super::{
    event::MatchEvent,
    match_state::MatchState,
    outcome::{OutcomeCode, OutcomeFamily, OutcomeJudgment},
};

/// What a play did to the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayResult {
    scored: Scorers,
    outs_recorded: u32,
}

impl PlayResult {
    /// Runs scored on the play.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn runs(&self) -> u32 {
        self.scored.len() as u32
    }

    #[must_use]
    pub fn scored(&self) -> &[PlayerId] {
        &self.scored
    }

    #[must_use]
    pub fn outs_recorded(&self) -> u32 {
        self.outs_recorded
    }
}

/// Computes the bases and result of `code` without touching a match.
///
/// # Example
///
/// ```
/// use dugout_engine::{Bases, OutcomeCode, PlayerId, Side, rule_engine};
///
/// let [a, b, c, d] = [1, 2, 3, 4].map(|i| PlayerId::new(Side::Away, i));
/// let loaded = Bases::from_slots([Some(a), Some(b), Some(c)]);
///
/// let (after, result) = rule_engine::project(&loaded, d, OutcomeCode::Walk);
/// assert_eq!(after.slots(), &[Some(d), Some(a), Some(b)]);
/// assert_eq!(result.scored(), &[c]);
/// ```
#[must_use]
pub fn project(bases: &Bases, batter: PlayerId, code: OutcomeCode) -> (Bases, PlayResult) {
    let mut after = *bases;
    let mut result = PlayResult::default();
    match code.family() {
        OutcomeFamily::Hit(n) => result.scored = after.advance(batter, n),
        OutcomeFamily::ForcedAdvance => result.scored.extend(after.force_advance(batter)),
        OutcomeFamily::Out => result.outs_recorded = 1,
    }
    (after, result)
}

/// Applies a judgment to the match: moves runners, credits runs to the batting side,
/// and records outs.
///
/// Only `judgment.code` is read. Outs may reach 3 here; rolling over the half-inning is
/// the job of [`lifecycle::advance`](super::lifecycle::advance).
pub fn apply_result(state: &mut MatchState, judgment: &OutcomeJudgment) -> PlayResult {
    let batter = state.current_batter().id();
    let (bases, result) = project(&state.bases, batter, judgment.code);

    state.bases = bases;
    state.outs += result.outs_recorded;
    match state.offense_side() {
        Side::Home => state.home_score += result.runs(),
        Side::Away => state.away_score += result.runs(),
    }
    result
}

/// Commits a judged plate appearance.
///
/// Applies the result, appends a plate-appearance event, stores the judgment with the
/// engine's own bases and run count in place of the claimed ones, and moves the
/// batting order along.
pub fn commit_plate_appearance(state: &mut MatchState, mut judgment: OutcomeJudgment) -> PlayResult {
    let batter = state.current_batter().id();
    let pitcher = state.current_pitcher().id();
    let result = apply_result(state, &judgment);

    judgment.final_bases = *state.bases.slots();
    judgment.runs_scored = result.runs();
    state.push_event(MatchEvent::PlateAppearance {
        inning: state.inning,
        half: state.half,
        batter,
        pitcher,
        code: judgment.code,
        description: judgment.description.clone(),
        runs: result.runs(),
    });
    state.last_judgment = Some(judgment);
    state.plate_appearances += 1;
    state.advance_batting_order();
    result
}

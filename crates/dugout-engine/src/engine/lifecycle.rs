//! Half-inning and game-end transitions.
//!
//! ```text
//! TOP_N(outs 0..2) --3rd out--> BOTTOM_N(0)
//! BOTTOM_N(outs 0..2) --3rd out--> TOP_N+1(0)      if N < regulation or tied
//!                                 \-> FINISHED      if N >= regulation and not tied
//! ```
//!
//! The game-end check runs only when a bottom half closes, unless
//! [`MatchRules::walk_off`] is enabled.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{StateInvariantError, core::Side};

use super::{
    event::MatchEvent,
    match_state::{Half, MatchState, MatchStatus},
    rules::MatchRules,
};

/// Result of [`advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum Transition {
    /// The half-inning is still live.
    Continue,
    /// The given half-inning closed and the next one begins.
    HalfInningEnded { inning: u32, half: Half },
    /// The match is over.
    GameOver { winner: Side },
}

/// Rolls the match forward after a committed play.
///
/// On the third out the bases are cleared, outs reset, and the half flips. When a
/// bottom half closes in the regulation inning or later with the scores apart, the
/// match finishes instead. Does nothing unless the match is being played.
pub fn advance(state: &mut MatchState, rules: &MatchRules) -> Transition {
    if !state.status.is_playing() {
        return Transition::Continue;
    }

    let late = state.inning >= rules.regulation_innings;

    if rules.walk_off && late && state.half.is_bottom() && state.home_score > state.away_score {
        debug!(inning = state.inning, "walk-off");
        return finish(state, Side::Home);
    }

    if state.outs < 3 {
        return Transition::Continue;
    }

    let (inning, half) = (state.inning, state.half);
    state.outs = 0;
    state.bases.clear();
    state.push_event(MatchEvent::HalfInningEnd {
        inning,
        half,
        home_score: state.home_score,
        away_score: state.away_score,
    });
    debug!(
        inning,
        %half,
        home = state.home_score,
        away = state.away_score,
        "half-inning over"
    );

    match half {
        Half::Top => state.half = Half::Bottom,
        Half::Bottom => {
            if late && state.home_score != state.away_score {
                let winner = if state.home_score > state.away_score {
                    Side::Home
                } else {
                    Side::Away
                };
                return finish(state, winner);
            }
            state.half = Half::Top;
            state.inning += 1;
        }
    }
    Transition::HalfInningEnded { inning, half }
}

fn finish(state: &mut MatchState, winner: Side) -> Transition {
    state.status = MatchStatus::Finished;
    state.push_event(MatchEvent::GameEnd {
        innings: state.inning,
        home_score: state.home_score,
        away_score: state.away_score,
    });
    info!(
        innings = state.inning,
        home = state.home_score,
        away = state.away_score,
        %winner,
        "match finished"
    );
    Transition::GameOver { winner }
}

/// Verifies the structural invariants of a live match.
///
/// Meant to run between turns, after [`advance`]: outs must be back in `0..=2`.
pub fn check_invariants(state: &MatchState) -> Result<(), StateInvariantError> {
    if state.inning == 0 {
        return Err(StateInvariantError::InningOutOfRange {
            inning: state.inning,
        });
    }
    if state.status.is_playing() && state.outs > 2 {
        return Err(StateInvariantError::OutsOutOfRange { outs: state.outs });
    }
    if let Some(player) = state.bases.duplicate_runner() {
        return Err(StateInvariantError::DuplicateRunner { player });
    }
    let offense = state.offense_side();
    for (base, player) in state.bases.runners() {
        if player.side() != offense || state.player(player).is_none() {
            return Err(StateInvariantError::ForeignRunner { base, player });
        }
    }
    Ok(())
}

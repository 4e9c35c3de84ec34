//! Pitcher stamina and substitution bookkeeping.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{PlayerId, Side};

use super::{event::MatchEvent, match_state::MatchState, rules::MatchRules};

/// How hard the pitcher throws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effort {
    #[default]
    Normal,
    FullPower,
    Finesse,
}

impl Effort {
    /// Stamina cost of one pitch at this effort.
    #[must_use]
    pub fn pitch_cost(self, rules: &MatchRules) -> u32 {
        match self {
            Self::FullPower => rules.full_effort_pitch_cost,
            Self::Normal | Self::Finesse => rules.pitch_cost,
        }
    }
}

/// A completed pitching change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchingChange {
    pub side: Side,
    pub from: PlayerId,
    pub to: PlayerId,
}

/// Charges the defending pitcher for one pitch.
///
/// Stamina drops by the effort's cost, floored at zero. The pitch count always
/// increments, whatever the outcome.
pub fn record_pitch(state: &mut MatchState, effort: Effort, rules: &MatchRules) {
    let cost = effort.pitch_cost(rules);
    let side = state.defense_side();
    state.roster_mut(side).active_pitcher_mut().record_pitch(cost);
}

/// Replaces `side`'s pitcher with the next one in its pitching staff.
///
/// Returns `None`, leaving the pitcher in place, when nobody is left in the bullpen.
pub fn substitute_pitcher(state: &mut MatchState, side: Side) -> Option<PitchingChange> {
    let (from, to) = state.roster_mut(side).change_pitcher()?;
    state.push_event(MatchEvent::PitchingChange {
        inning: state.inning,
        half: state.half,
        side,
        from,
        to,
    });
    info!(
        %side,
        from = state.player(from).map(|p| p.name()),
        to = state.player(to).map(|p| p.name()),
        "pitching change"
    );
    Some(PitchingChange { side, from, to })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_state::{Half, tests::new_match};

    #[test]
    fn test_forty_normal_pitches() {
        let rules = MatchRules::default();
        let mut state = new_match();
        for _ in 0..40 {
            record_pitch(&mut state, Effort::Normal, &rules);
        }
        let pitcher = state.current_pitcher();
        assert_eq!(pitcher.current_stamina(), 60);
        assert_eq!(pitcher.pitch_count(), 40);
    }

    #[test]
    fn test_full_effort_costs_more_and_floors_at_zero() {
        let rules = MatchRules::default();
        let mut state = new_match();
        record_pitch(&mut state, Effort::FullPower, &rules);
        record_pitch(&mut state, Effort::Finesse, &rules);
        assert_eq!(state.current_pitcher().current_stamina(), 96);

        for _ in 0..50 {
            record_pitch(&mut state, Effort::FullPower, &rules);
        }
        assert_eq!(state.current_pitcher().current_stamina(), 0);
        assert_eq!(state.current_pitcher().pitch_count(), 52);
    }

    #[test]
    fn test_pitch_is_charged_to_defense() {
        let rules = MatchRules::default();
        let mut state = new_match();
        state.half = Half::Bottom;
        record_pitch(&mut state, Effort::Normal, &rules);
        assert_eq!(state.away().active_pitcher().pitch_count(), 1);
        assert_eq!(state.home().active_pitcher().pitch_count(), 0);
    }

    #[test]
    fn test_substitution_until_bullpen_empty() {
        let mut state = new_match();
        let starter = state.current_pitcher().id();

        let change = substitute_pitcher(&mut state, Side::Home).unwrap();
        assert_eq!(change.from, starter);
        assert_eq!(state.current_pitcher().id(), change.to);

        substitute_pitcher(&mut state, Side::Home).unwrap();
        let closer = state.current_pitcher().id();
        assert!(substitute_pitcher(&mut state, Side::Home).is_none());
        assert_eq!(state.current_pitcher().id(), closer);

        let changes = state
            .events()
            .iter()
            .filter(|e| matches!(e, MatchEvent::PitchingChange { .. }))
            .count();
        assert_eq!(changes, 2);
    }
}

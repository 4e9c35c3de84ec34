//! Match state and the deterministic rules that move it.
//!
//! - [`MatchState`] - Aggregate root: rosters, inning/half/outs, score, bases, event log
//! - [`rule_engine`] - Outcome code to bases, runs and outs
//! - [`lifecycle`] - Half-inning roll-over and game end
//! - [`fatigue`] - Pitch costs and pitching changes
//! - [`OutcomeJudgment`] - A judged plate appearance, as produced by a collaborator
//!
//! # Turn Flow
//!
//! Decisions come from outside this crate. Once a plate appearance has been judged:
//!
//! 1. Commit the judgment with [`rule_engine::commit_plate_appearance`]
//! 2. Charge the pitch with [`fatigue::record_pitch`]
//! 3. Roll the match forward with [`lifecycle::advance`]
//! 4. Repeat until [`MatchStatus::Finished`]
//!
//! # Example
//!
//! ```
//! use dugout_engine::{
//!     Effort, MatchRules, MatchState, OutcomeCode, OutcomeJudgment, Participant, Role,
//!     TeamSheet, fatigue, lifecycle, rule_engine,
//! };
//!
//! let team = |name: &str| TeamSheet {
//!     name: name.to_owned(),
//!     players: vec![
//!         Participant::new("P", Role::Pitcher, 50, 50, 50).into(),
//!         Participant::new("B", Role::Batter, 50, 50, 50).into(),
//!     ],
//! };
//! let rules = MatchRules::default();
//! let mut state = MatchState::new(team("Home"), team("Away")).unwrap();
//! state.start();
//!
//! rule_engine::commit_plate_appearance(
//!     &mut state,
//!     OutcomeJudgment::new(OutcomeCode::HomeRun, "over the fence"),
//! );
//! fatigue::record_pitch(&mut state, Effort::Normal, &rules);
//! assert!(lifecycle::advance(&mut state, &rules).is_continue());
//!
//! for _ in 0..3 {
//!     rule_engine::commit_plate_appearance(
//!         &mut state,
//!         OutcomeJudgment::new(OutcomeCode::Strikeout, "caught looking"),
//!     );
//!     fatigue::record_pitch(&mut state, Effort::FullPower, &rules);
//! }
//! assert!(lifecycle::advance(&mut state, &rules).is_half_inning_ended());
//! assert_eq!(state.away_score(), 1);
//! assert_eq!(state.home().active_pitcher().current_stamina(), 90);
//! ```

pub use self::{
    event::*, fatigue::{Effort, PitchingChange}, lifecycle::Transition, match_state::*,
    outcome::*, rule_engine::PlayResult, rules::*,
};

mod event;
pub mod fatigue;
pub mod lifecycle;
mod match_state;
mod outcome;
pub mod rule_engine;
mod rules;

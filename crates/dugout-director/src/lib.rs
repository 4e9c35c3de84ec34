//! Drives a match one plate appearance at a time through a pipeline of collaborators.
//!
//! The rule engine in `dugout_engine` knows how an outcome changes the state, but not
//! which outcome happens. That decision is made here, by a chain of collaborators each
//! answering one question:
//!
//! ```text
//! environment -> managers -> pitcher -> batter -> judge <-> validator -> rule engine
//! ```
//!
//! # Modules
//!
//! - [`context`] - the read-only [`TurnContext`](context::TurnContext) snapshot handed to
//!   every collaborator
//! - [`decision`] - the typed answers collaborators give
//! - [`provider`] - one trait per collaborator role, and the
//!   [`ProviderError`](provider::ProviderError) they fail with
//! - [`orchestrator`] - runs the pipeline, including the bounded validation retry loop
//! - [`heuristic`] - seeded collaborators that need no external service
//!
//! # Design Principles
//!
//! ## The Judge Only Picks a Code
//!
//! Collaborators never touch the state. The judge's
//! [`OutcomeJudgment`](dugout_engine::OutcomeJudgment) is advisory: its claimed bases and
//! runs are checked by the validator and then replaced by what the rule engine computes.
//!
//! ## Turns Are Atomic
//!
//! A failing collaborator leaves the state exactly as it was before the turn.
//!
//! # Example
//!
//! ```rust,no_run
//! use dugout_director::{heuristic, orchestrator::MatchOrchestrator};
//! use dugout_engine::{MatchRules, MatchState};
//! # let (home, away) = todo!();
//!
//! let state = MatchState::new(home, away)?;
//! let seed: heuristic::MatchSeed = rand::random();
//! let mut orchestrator =
//!     MatchOrchestrator::new(heuristic::collaborators(seed), MatchRules::default());
//! let state = orchestrator.run_match(state, |state| {
//!     if let Some(event) = state.events().last() {
//!         println!("{event}");
//!     }
//! })?;
//! println!("final: {} - {}", state.away_score(), state.home_score());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod context;
pub mod decision;
pub mod heuristic;
pub mod orchestrator;
pub mod provider;

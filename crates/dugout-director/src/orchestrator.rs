//! Decision pipeline: one plate appearance per turn, until the match ends.
//!
//! # Turn Sequence
//!
//! 1. **Environment** - keep or revise weather, wind and umpire zone
//! 2. **Strategy** - both managers answer; the fielding manager may pull the pitcher
//! 3. **Pitcher intent** - pitch type, location and effort
//! 4. **Batter intent** - guessed pitch, location and batting style
//! 5. **Judgment** - the judge turns all of the above into an [`OutcomeJudgment`]
//! 6. **Validation** - the validator accepts or rejects the judgment
//! 7. **Commit** - rule engine, pitcher fatigue, batting order
//! 8. **Step callback** - the caller sees the committed state
//! 9. **Lifecycle** - roll over the half-inning or end the match
//!
//! # Bounded Retry
//!
//! A rejected judgment sends the turn back to step 5 with the [`Rejection`] as feedback,
//! at most [`RetryPolicy::max_retries`] times. When the last retry is rejected too, the
//! final judgment is accepted anyway and a single `validation exhausted` warning is logged.
//! The match never stalls on an unsatisfiable validator.
//!
//! # Failures
//!
//! A [`ProviderError`] or a broken state invariant ends the turn with nothing applied:
//! every step works on a scratch copy of the state that replaces the caller's only once
//! the turn completes.

use dugout_engine::{
    Bases, MatchRules, MatchState, MatchStatus, OutcomeJudgment, PitchingChange,
    StateInvariantError, Transition, fatigue, lifecycle, rule_engine,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    context::TurnContext,
    decision::{Environment, Rejection},
    provider::{Collaborators, JudgmentRequest, ProviderError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Judgment retries allowed per turn after the first attempt.
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}

/// What happened during one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Judge calls made, including the accepted one.
    pub judgment_attempts: u32,
    /// The accepted judgment was never validated.
    pub validation_exhausted: bool,
    pub runs: u32,
    pub pitching_change: Option<PitchingChange>,
    pub transition: Transition,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum MatchError {
    #[display("{_0}")]
    Provider(ProviderError),
    #[display("internal error: {_0}")]
    Invariant(StateInvariantError),
    #[display("match is not in play (status: {status})")]
    #[from(ignore)]
    NotPlaying { status: MatchStatus },
}

/// A match stopped before it finished.
///
/// Carries the last consistent state, marked [`MatchStatus::Abandoned`], with the event
/// log and score so far.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("match abandoned: {source}")]
pub struct MatchAborted {
    pub state: Box<MatchState>,
    pub source: MatchError,
}

/// Drives a match through its collaborators.
///
/// One orchestrator per match; it carries the environment from turn to turn.
#[derive(Debug)]
pub struct MatchOrchestrator {
    collaborators: Collaborators,
    rules: MatchRules,
    retry: RetryPolicy,
    environment: Environment,
}

impl MatchOrchestrator {
    #[must_use]
    pub fn new(collaborators: Collaborators, rules: MatchRules) -> Self {
        Self {
            collaborators,
            rules,
            retry: RetryPolicy::default(),
            environment: Environment::default(),
        }
    }

    #[must_use]
    pub fn with_retry_policy(self, retry: RetryPolicy) -> Self {
        Self { retry, ..self }
    }

    #[must_use]
    pub fn rules(&self) -> &MatchRules {
        &self.rules
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Conditions as of the last completed turn.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Plays `state` to the end, calling `on_step` once per completed turn.
    ///
    /// `on_step` sees the play as committed but before the lifecycle transition, so the
    /// third out of a half-inning is visible to it as `outs == 3`. It only runs for a turn
    /// whose resulting state passed the invariant checks.
    ///
    /// A ready match is started first. On failure the match is marked abandoned and
    /// returned inside the error.
    pub fn run_match<F>(
        &mut self,
        mut state: MatchState,
        mut on_step: F,
    ) -> Result<MatchState, MatchAborted>
    where
        F: FnMut(&MatchState),
    {
        state.start();
        while !state.status().is_finished() {
            if let Err(source) = self.turn(&mut state, &mut on_step) {
                state.abandon();
                return Err(MatchAborted {
                    state: Box::new(state),
                    source,
                });
            }
        }
        Ok(state)
    }

    /// Plays a single turn. `state` is left untouched on error.
    pub fn play_turn(&mut self, state: &mut MatchState) -> Result<TurnReport, MatchError> {
        self.turn(state, &mut |_: &MatchState| {})
    }

    fn turn(
        &mut self,
        state: &mut MatchState,
        on_step: &mut dyn FnMut(&MatchState),
    ) -> Result<TurnReport, MatchError> {
        if !state.status().is_playing() {
            return Err(MatchError::NotPlaying {
                status: state.status(),
            });
        }
        lifecycle::check_invariants(state)?;
        let mut next = state.clone();
        let mut context = TurnContext::capture(&next);
        debug!(
            inning = context.inning,
            half = %context.half,
            outs = context.outs,
            batter = %context.batter.name,
            pitcher = %context.pitcher.name,
            "turn start"
        );

        let collab = &mut self.collaborators;
        let environment = collab
            .environment
            .update_environment(&context, &self.environment)?;
        trace!(?environment, "environment");

        let offense_side = context.offense();
        let defense_side = context.defense_side();
        let offense = collab.manager(offense_side).decide_strategy(&context, offense_side)?;
        let defense = collab.manager(defense_side).decide_strategy(&context, defense_side)?;
        trace!(?offense, ?defense, "strategy");

        let pitching_change = if defense.change_pitcher {
            let change = fatigue::substitute_pitcher(&mut next, defense_side);
            if change.is_some() {
                context = TurnContext::capture(&next);
            } else {
                debug!(side = %defense_side, "pitching change requested with empty bullpen");
            }
            change
        } else {
            None
        };

        let pitch = collab
            .pitcher
            .decide_pitch(&context, defense.defense_strategy)?;
        trace!(?pitch, "pitch");
        let swing = collab
            .batter
            .decide_swing(&context, offense.offense_strategy)?;
        trace!(?swing, "swing");

        let mut attempts = 0;
        let mut feedback: Option<Rejection> = None;
        let (judgment, validation_exhausted) = loop {
            attempts += 1;
            let request = JudgmentRequest {
                context: &context,
                environment: &environment,
                offense: &offense,
                defense: &defense,
                pitch: &pitch,
                swing: &swing,
                feedback: feedback.as_ref(),
            };
            let mut judgment = collab.judge.judge(&request)?;
            resolve_runners(&context, &mut judgment);
            trace!(?judgment, attempt = attempts, "judgment");

            let verdict = collab.validator.validate(&context, &judgment)?;
            if verdict.is_valid {
                break (judgment, false);
            }
            if attempts > self.retry.max_retries {
                warn!(
                    attempts,
                    code = %judgment.code,
                    reason = %verdict.reasoning,
                    "validation exhausted, accepting last judgment"
                );
                break (judgment, true);
            }
            debug!(
                attempt = attempts,
                category = ?verdict.error_category,
                reason = %verdict.reasoning,
                "judgment rejected"
            );
            feedback = Some(Rejection::new(attempts, judgment, verdict));
        };

        let claimed = (judgment.final_bases, judgment.runs_scored);
        let result = rule_engine::commit_plate_appearance(&mut next, judgment);
        fatigue::record_pitch(&mut next, pitch.effort, &self.rules);
        if claimed != (*next.bases().slots(), result.runs()) {
            debug!(
                claimed_bases = %Bases::from_slots(claimed.0),
                claimed_runs = claimed.1,
                bases = %next.bases(),
                runs = result.runs(),
                "judgment claims overridden by rule engine"
            );
        }

        let mut advanced = next.clone();
        let transition = lifecycle::advance(&mut advanced, &self.rules);
        lifecycle::check_invariants(&advanced)?;
        on_step(&next);

        self.environment = environment;
        *state = advanced;
        Ok(TurnReport {
            judgment_attempts: attempts,
            validation_exhausted,
            runs: result.runs(),
            pitching_change,
            transition,
        })
    }
}

/// Drops claimed runners that are not in the play.
///
/// Only the current runners and the batter can occupy a base afterwards; any other id
/// is replaced with an empty slot.
fn resolve_runners(context: &TurnContext, judgment: &mut OutcomeJudgment) {
    for (slot, claimed) in judgment.final_bases.iter_mut().enumerate() {
        let Some(id) = *claimed else {
            continue;
        };
        if !context.potential_runners().any(|p| p == id) {
            warn!(player = %id, slot, "judgment names a player not in the play, leaving base empty");
            *claimed = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    use dugout_engine::{Half, OutcomeCode, PlayerId, Side};

    use super::*;
    use crate::{
        context::tests::new_match,
        decision::{
            BatterDecision, BattingStyle, ErrorCategory, ManagerDecision, PitchLocation, PitchType,
            PitcherDecision, TeamStrategy, ValidationVerdict,
        },
        provider::{
            BatterProvider, CollaboratorRole, EnvironmentProvider, JudgeProvider, ManagerProvider,
            PitcherProvider, ValidatorProvider,
        },
    };

    #[derive(Debug)]
    struct StillEnvironment;

    impl EnvironmentProvider for StillEnvironment {
        fn update_environment(
            &mut self,
            _context: &TurnContext,
            current: &Environment,
        ) -> Result<Environment, ProviderError> {
            Ok(current.clone())
        }
    }

    #[derive(Debug, Default)]
    struct FakeManager {
        pull_pitcher: bool,
    }

    impl ManagerProvider for FakeManager {
        fn decide_strategy(
            &mut self,
            _context: &TurnContext,
            _side: Side,
        ) -> Result<ManagerDecision, ProviderError> {
            Ok(ManagerDecision {
                change_pitcher: self.pull_pitcher,
                description: "play it straight".to_owned(),
                ..ManagerDecision::default()
            })
        }
    }

    #[derive(Debug)]
    struct FakePitcher(dugout_engine::Effort);

    impl PitcherProvider for FakePitcher {
        fn decide_pitch(
            &mut self,
            _context: &TurnContext,
            _strategy: TeamStrategy,
        ) -> Result<PitcherDecision, ProviderError> {
            Ok(PitcherDecision {
                pitch_type: PitchType::Fastball,
                location: PitchLocation::Low,
                effort: self.0,
                description: "heater".to_owned(),
            })
        }
    }

    #[derive(Debug)]
    struct FakeBatter;

    impl BatterProvider for FakeBatter {
        fn decide_swing(
            &mut self,
            _context: &TurnContext,
            _strategy: TeamStrategy,
        ) -> Result<BatterDecision, ProviderError> {
            Ok(BatterDecision {
                aim_pitch_type: None,
                aim_location: None,
                style: BattingStyle::Cautious,
                description: "take a look".to_owned(),
            })
        }
    }

    /// Hands out judgments from a script, repeating the last one. Counts calls and
    /// records the feedback it received.
    #[derive(Debug)]
    struct ScriptedJudge {
        script: Vec<OutcomeJudgment>,
        calls: Arc<AtomicU32>,
        feedback: Arc<std::sync::Mutex<Vec<Option<u32>>>>,
    }

    impl JudgeProvider for ScriptedJudge {
        fn judge(
            &mut self,
            request: &JudgmentRequest<'_>,
        ) -> Result<OutcomeJudgment, ProviderError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
            self.feedback
                .lock()
                .unwrap()
                .push(request.feedback.map(|r| r.attempt));
            let judgment = self
                .script
                .get(n)
                .or(self.script.last())
                .cloned()
                .ok_or_else(|| ProviderError::unavailable(CollaboratorRole::Judge, "empty"))?;
            Ok(judgment)
        }
    }

    /// Rejects the first `reject` verdicts of each turn's worth of calls, forever when `None`.
    #[derive(Debug)]
    struct FakeValidator {
        reject: Option<u32>,
        seen: u32,
    }

    impl ValidatorProvider for FakeValidator {
        fn validate(
            &mut self,
            _context: &TurnContext,
            _judgment: &OutcomeJudgment,
        ) -> Result<ValidationVerdict, ProviderError> {
            self.seen += 1;
            match self.reject {
                Some(n) if self.seen > n => Ok(ValidationVerdict::valid("fine")),
                _ => Ok(ValidationVerdict::invalid(
                    ErrorCategory::LogicError,
                    "description contradicts code",
                    "pick one",
                )),
            }
        }
    }

    #[derive(Debug)]
    struct BrokenJudge;

    impl JudgeProvider for BrokenJudge {
        fn judge(&mut self, _: &JudgmentRequest<'_>) -> Result<OutcomeJudgment, ProviderError> {
            Err(ProviderError::timeout(CollaboratorRole::Judge, "deadline exceeded"))
        }
    }

    struct Harness {
        calls: Arc<AtomicU32>,
        feedback: Arc<std::sync::Mutex<Vec<Option<u32>>>>,
    }

    fn orchestrator(
        script: Vec<OutcomeJudgment>,
        reject: Option<u32>,
        pull_pitcher: bool,
    ) -> (MatchOrchestrator, Harness) {
        let calls = Arc::new(AtomicU32::new(0));
        let feedback = Arc::new(std::sync::Mutex::new(Vec::new()));
        let collaborators = Collaborators {
            environment: Box::new(StillEnvironment),
            home_manager: Box::new(FakeManager { pull_pitcher }),
            away_manager: Box::new(FakeManager { pull_pitcher }),
            pitcher: Box::new(FakePitcher(dugout_engine::Effort::Normal)),
            batter: Box::new(FakeBatter),
            judge: Box::new(ScriptedJudge {
                script,
                calls: Arc::clone(&calls),
                feedback: Arc::clone(&feedback),
            }),
            validator: Box::new(FakeValidator { reject, seen: 0 }),
        };
        (
            MatchOrchestrator::new(collaborators, MatchRules::default()),
            Harness { calls, feedback },
        )
    }

    fn judged(code: OutcomeCode) -> OutcomeJudgment {
        OutcomeJudgment::new(code, code.to_string())
    }

    fn playing() -> MatchState {
        let mut state = new_match();
        state.start();
        state
    }

    #[test]
    fn test_valid_judgment_is_applied_once() {
        let (mut orch, harness) = orchestrator(vec![judged(OutcomeCode::Double)], Some(0), false);
        let mut state = playing();
        let batter = state.current_batter().id();

        let report = orch.play_turn(&mut state).unwrap();

        assert_eq!(report.judgment_attempts, 1);
        assert!(!report.validation_exhausted);
        assert_eq!(report.transition, Transition::Continue);
        assert_eq!(harness.calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.bases().slots(), &[None, Some(batter), None]);
        assert_eq!(state.plate_appearances(), 1);
        assert_eq!(state.current_pitcher().pitch_count(), 1);
        assert_eq!(state.current_batter().name(), "Away B1");
    }

    #[test]
    fn test_always_invalid_validator_is_bounded() {
        let script = vec![
            judged(OutcomeCode::Single),
            judged(OutcomeCode::Walk),
            judged(OutcomeCode::FlyOut),
            judged(OutcomeCode::HomeRun),
            judged(OutcomeCode::Triple),
        ];
        let (mut orch, harness) = orchestrator(script, None, false);
        let mut state = playing();

        let report = orch.play_turn(&mut state).unwrap();

        assert_eq!(harness.calls.load(Ordering::SeqCst), 4);
        assert_eq!(report.judgment_attempts, 4);
        assert!(report.validation_exhausted);
        // The fourth judgment is the one applied.
        assert_eq!(state.away_score(), 1);
        assert_eq!(state.last_judgment().unwrap().code, OutcomeCode::HomeRun);
        assert_eq!(
            *harness.feedback.lock().unwrap(),
            vec![None, Some(1), Some(2), Some(3)]
        );
    }

    #[test]
    fn test_retry_counter_resets_between_turns() {
        let (mut orch, harness) = orchestrator(vec![judged(OutcomeCode::GroundOut)], Some(4), false);
        let mut state = playing();

        let first = orch.play_turn(&mut state).unwrap();
        assert_eq!(first.judgment_attempts, 4);
        assert!(first.validation_exhausted);

        let second = orch.play_turn(&mut state).unwrap();
        assert_eq!(second.judgment_attempts, 1);
        assert!(!second.validation_exhausted);
        assert_eq!(harness.calls.load(Ordering::SeqCst), 5);
        assert_eq!(harness.feedback.lock().unwrap()[4], None);
    }

    /// Log sink shared between a test and the subscriber it installs.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn count(&self, needle: &str) -> usize {
            let bytes = self.0.lock().unwrap();
            String::from_utf8_lossy(&bytes)
                .lines()
                .filter(|line| line.contains("WARN") && line.contains(needle))
                .count()
        }
    }

    fn warnings_during<T>(f: impl FnOnce() -> T) -> (T, CapturedLog) {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        (value, log)
    }

    #[test]
    fn test_exhausted_validation_warns_once() {
        let (mut orch, _) = orchestrator(vec![judged(OutcomeCode::Single)], None, false);
        let mut state = playing();
        let (report, log) = warnings_during(|| orch.play_turn(&mut state).unwrap());
        assert_eq!(report.judgment_attempts, 4);
        assert_eq!(log.count("validation exhausted"), 1);

        let (mut orch, _) = orchestrator(vec![judged(OutcomeCode::Single)], Some(1), false);
        let mut state = playing();
        let (report, log) = warnings_during(|| orch.play_turn(&mut state).unwrap());
        assert_eq!(report.judgment_attempts, 2);
        assert!(!report.validation_exhausted);
        assert_eq!(log.count("validation exhausted"), 0);
    }

    #[test]
    fn test_inconsistent_state_is_rejected_before_callback() {
        let (mut orch, harness) = orchestrator(vec![judged(OutcomeCode::Single)], Some(0), false);
        let mut json = serde_json::to_value(playing()).unwrap();
        json["bases"] = serde_json::json!(["home#3", null, null]);
        let mut state: MatchState = serde_json::from_value(json).unwrap();
        let before = state.clone();
        let mut steps = 0;

        let err = orch
            .turn(&mut state, &mut |_: &MatchState| steps += 1)
            .unwrap_err();

        assert!(matches!(err, MatchError::Invariant(_)), "{err}");
        assert_eq!(steps, 0);
        assert_eq!(harness.calls.load(Ordering::SeqCst), 0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_zero_retries_accepts_first_judgment() {
        let (orch, harness) = orchestrator(vec![judged(OutcomeCode::Walk)], None, false);
        let mut orch = orch.with_retry_policy(RetryPolicy { max_retries: 0 });
        let mut state = playing();

        let report = orch.play_turn(&mut state).unwrap();
        assert_eq!(report.judgment_attempts, 1);
        assert!(report.validation_exhausted);
        assert_eq!(harness.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_runner_claim_is_dropped() {
        let mut judgment = judged(OutcomeCode::Single);
        let ghost = PlayerId::new(Side::Home, 7);
        judgment.final_bases = [Some(ghost), None, None];
        judgment.runs_scored = 4;
        let (mut orch, _) = orchestrator(vec![judgment], Some(0), false);
        let mut state = playing();
        let batter = state.current_batter().id();

        orch.play_turn(&mut state).unwrap();

        let stored = state.last_judgment().unwrap();
        assert_eq!(stored.final_bases, [Some(batter), None, None]);
        assert_eq!(stored.runs_scored, 0);
        assert_eq!(state.away_score(), 0);
    }

    #[test]
    fn test_resolve_runners_keeps_only_players_in_play() {
        let mut state = playing();
        apply_single(&mut state);
        let context = TurnContext::capture(&state);
        let runner = context.runners[0].id;
        let ghost = PlayerId::new(Side::Away, 8);

        let mut judgment = judged(OutcomeCode::Single);
        judgment.final_bases = [Some(context.batter.id), Some(runner), Some(ghost)];
        resolve_runners(&context, &mut judgment);
        assert_eq!(
            judgment.final_bases,
            [Some(context.batter.id), Some(runner), None]
        );
    }

    fn apply_single(state: &mut MatchState) {
        rule_engine::commit_plate_appearance(state, judged(OutcomeCode::Single));
    }

    #[test]
    fn test_pitching_change_before_pitch() {
        let (mut orch, _) = orchestrator(vec![judged(OutcomeCode::Strikeout)], Some(0), true);
        let mut state = playing();
        let starter = state.current_pitcher().id();

        let report = orch.play_turn(&mut state).unwrap();

        let change = report.pitching_change.unwrap();
        assert_eq!(change.from, starter);
        assert_eq!(state.current_pitcher().id(), change.to);
        assert_eq!(state.current_pitcher().pitch_count(), 1);
        assert_eq!(state.player(starter).unwrap().pitch_count(), 0);

        orch.play_turn(&mut state).unwrap();
        let third = orch.play_turn(&mut state).unwrap();
        assert!(third.pitching_change.is_none());
        assert!(third.transition.is_half_inning_ended());
        assert_eq!(state.home().remaining_relievers(), 0);
    }

    #[test]
    fn test_three_outs_end_half_and_callback_sees_them() {
        let (mut orch, _) = orchestrator(vec![judged(OutcomeCode::Strikeout)], Some(0), false);
        let mut state = playing();
        let mut seen = Vec::new();

        for _ in 0..3 {
            orch.play_turn(&mut state).unwrap();
            seen.push((state.inning(), state.half(), state.outs()));
        }
        assert_eq!(seen.last(), Some(&(1, Half::Bottom, 0)));

        let mut outs_at_callback = Vec::new();
        let (mut orch, _) = orchestrator(vec![judged(OutcomeCode::Strikeout)], Some(0), false);
        let mut state = playing();
        for _ in 0..3 {
            orch.turn(&mut state, &mut |s: &MatchState| outs_at_callback.push(s.outs()))
                .unwrap();
        }
        assert_eq!(outs_at_callback, vec![1, 2, 3]);
    }

    #[test]
    fn test_run_match_ends_after_regulation() {
        // Every plate appearance is a strikeout except the leadoff home run of the game.
        let mut script = vec![judged(OutcomeCode::HomeRun)];
        script.extend(std::iter::repeat_n(judged(OutcomeCode::Strikeout), 200));
        let (mut orch, harness) = orchestrator(script, Some(0), false);
        let mut steps = 0;

        let state = orch.run_match(new_match(), |_| steps += 1).unwrap();

        assert!(state.status().is_finished());
        assert_eq!(state.winner(), Some(Side::Away));
        assert_eq!((state.inning(), state.half()), (9, Half::Bottom));
        // One home run plus 3 outs in each of 18 halves.
        assert_eq!(steps, 55);
        assert_eq!(harness.calls.load(Ordering::SeqCst), 55);
        let game_ends = state
            .events()
            .iter()
            .filter(|e| matches!(e, dugout_engine::MatchEvent::GameEnd { .. }))
            .count();
        assert_eq!(game_ends, 1);
    }

    #[test]
    fn test_provider_failure_aborts_with_state() {
        let (mut orch, _) = orchestrator(vec![judged(OutcomeCode::Single)], Some(0), false);
        let mut state = playing();
        orch.play_turn(&mut state).unwrap();
        orch.collaborators.judge = Box::new(BrokenJudge);

        let before = state.clone();
        let err = orch.play_turn(&mut state).unwrap_err();
        assert!(matches!(err, MatchError::Provider(_)));
        assert_eq!(state, before);

        let aborted = orch.run_match(state, |_| {}).unwrap_err();
        assert_eq!(aborted.state.status(), MatchStatus::Abandoned);
        assert_eq!(aborted.state.plate_appearances(), 1);
        assert_eq!(aborted.state.events().len(), before.events().len());
        assert!(aborted.to_string().contains("deadline exceeded"));
    }

    #[test]
    fn test_unstarted_match_is_not_played() {
        let (mut orch, _) = orchestrator(vec![judged(OutcomeCode::Single)], Some(0), false);
        let mut state = new_match();
        let err = orch.play_turn(&mut state).unwrap_err();
        assert!(matches!(
            err,
            MatchError::NotPlaying {
                status: MatchStatus::Ready
            }
        ));
    }

    #[test]
    fn test_tied_game_goes_to_extras() {
        // Away homers in the top of the 1st, home answers in the bottom of the 1st,
        // then the away side homers again in the 10th.
        let k = || judged(OutcomeCode::Strikeout);
        let mut script = vec![judged(OutcomeCode::HomeRun), k(), k(), k()];
        script.extend([judged(OutcomeCode::HomeRun), k(), k(), k()]);
        // Innings 2 through 9: 16 halves of three strikeouts.
        script.extend(std::iter::repeat_n(k(), 48));
        script.extend([judged(OutcomeCode::HomeRun), k(), k(), k()]);
        script.extend([k(), k(), k()]);
        let (mut orch, _) = orchestrator(script, Some(0), false);

        let state = orch.run_match(new_match(), |_| {}).unwrap();

        assert_eq!((state.away_score(), state.home_score()), (2, 1));
        assert_eq!(state.inning(), 10);
        assert_eq!(state.winner(), Some(Side::Away));
    }
}

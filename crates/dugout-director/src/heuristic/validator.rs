use dugout_engine::{Bases, OutcomeFamily, OutcomeJudgment, rule_engine};

use crate::{
    context::TurnContext,
    decision::{ErrorCategory, ValidationVerdict},
    provider::{ProviderError, ValidatorProvider},
};

const HIT_WORDS: [&str; 5] = ["a single", "a double", "a triple", "home run", "homer"];
const OUT_WORDS: [&str; 7] = [
    "strikes out",
    "struck out",
    "grounds out",
    "flies out",
    "lines out",
    "pops out",
    "is out",
];

/// Checks a judgment against the rules, without asking anyone.
///
/// Rejects, in order: runners that are not in the play, a runner on two bases, claimed
/// bases or runs that disagree with the rule engine, and a description that narrates a
/// different kind of outcome than the code.
#[derive(Debug, Default)]
pub struct RuleValidator;

impl RuleValidator {
    #[must_use]
    pub fn check(context: &TurnContext, judgment: &OutcomeJudgment) -> ValidationVerdict {
        let claimed = Bases::from_slots(judgment.final_bases);

        if let Some((_, ghost)) = claimed
            .runners()
            .find(|(_, id)| !context.potential_runners().any(|p| p == *id))
        {
            return ValidationVerdict::invalid(
                ErrorCategory::Hallucination,
                format!("{ghost} is neither the batter nor a runner"),
                "place only the batter and the current runners",
            );
        }
        if let Some(twice) = claimed.duplicate_runner() {
            return ValidationVerdict::invalid(
                ErrorCategory::RuleViolation,
                format!("{twice} occupies two bases"),
                "place each runner at most once",
            );
        }

        let (expected, result) =
            rule_engine::project(&context.bases, context.batter.id, judgment.code);
        if claimed != expected || judgment.runs_scored != result.runs() {
            return ValidationVerdict::invalid(
                ErrorCategory::RuleViolation,
                format!(
                    "{} leaves bases {expected} with {} run(s), judgment claims {claimed} with {}",
                    judgment.code,
                    result.runs(),
                    judgment.runs_scored
                ),
                format!("final bases {expected}, runs {}", result.runs()),
            );
        }

        let text = judgment.description.to_lowercase();
        let mentions = |words: &[&'static str]| words.iter().find(|w| text.contains(*w)).copied();
        let contradiction = match judgment.code.family() {
            OutcomeFamily::Hit(_) => mentions(&OUT_WORDS),
            OutcomeFamily::Out => mentions(&HIT_WORDS),
            OutcomeFamily::ForcedAdvance => mentions(&HIT_WORDS).or_else(|| mentions(&OUT_WORDS)),
        };
        if let Some(word) = contradiction {
            return ValidationVerdict::invalid(
                ErrorCategory::LogicError,
                format!("description says {word:?} but the code is {}", judgment.code),
                "make the description match the outcome code",
            );
        }

        ValidationVerdict::valid(format!("{} is consistent", judgment.code))
    }
}

impl ValidatorProvider for RuleValidator {
    fn validate(
        &mut self,
        context: &TurnContext,
        judgment: &OutcomeJudgment,
    ) -> Result<ValidationVerdict, ProviderError> {
        Ok(Self::check(context, judgment))
    }
}

#[cfg(test)]
mod tests {
    use dugout_engine::{OutcomeCode, PlayerId, Side};

    use super::*;
    use crate::context::tests::new_match;

    fn on_first() -> (TurnContext, PlayerId, PlayerId) {
        let mut ctx = TurnContext::capture(&new_match());
        let runner = PlayerId::new(Side::Away, 8);
        ctx.bases = Bases::from_slots([Some(runner), None, None]);
        ctx.runners.push(crate::context::RunnerView {
            base: dugout_engine::Base::First,
            id: runner,
            name: "Away B5".to_owned(),
            speed: 60,
        });
        let batter = ctx.batter.id;
        (ctx, runner, batter)
    }

    #[test]
    fn test_consistent_double_is_valid() {
        let (ctx, runner, batter) = on_first();
        let mut judgment = OutcomeJudgment::new(OutcomeCode::Double, "drives a double to left");
        judgment.final_bases = [None, Some(batter), Some(runner)];
        assert!(RuleValidator::check(&ctx, &judgment).is_valid);
    }

    #[test]
    fn test_unknown_runner_is_hallucination() {
        let (ctx, _, batter) = on_first();
        let mut judgment = OutcomeJudgment::new(OutcomeCode::Single, "a single");
        judgment.final_bases = [Some(batter), Some(PlayerId::new(Side::Home, 2)), None];
        let verdict = RuleValidator::check(&ctx, &judgment);
        assert_eq!(verdict.error_category, Some(ErrorCategory::Hallucination));
    }

    #[test]
    fn test_duplicate_runner_is_rule_violation() {
        let (ctx, runner, _) = on_first();
        let mut judgment = OutcomeJudgment::new(OutcomeCode::Single, "a single");
        judgment.final_bases = [Some(runner), Some(runner), None];
        let verdict = RuleValidator::check(&ctx, &judgment);
        assert_eq!(verdict.error_category, Some(ErrorCategory::RuleViolation));
    }

    #[test]
    fn test_wrong_run_count_is_rule_violation() {
        let (ctx, runner, batter) = on_first();
        let mut judgment = OutcomeJudgment::new(OutcomeCode::Single, "lines a single");
        judgment.final_bases = [Some(batter), Some(runner), None];
        judgment.runs_scored = 1;
        let verdict = RuleValidator::check(&ctx, &judgment);
        assert!(!verdict.is_valid);
        assert_eq!(verdict.error_category, Some(ErrorCategory::RuleViolation));
        assert!(verdict.correction.unwrap().contains("runs 0"));
    }

    #[test]
    fn test_description_contradicting_code_is_logic_error() {
        let ctx = TurnContext::capture(&new_match());
        let judgment = OutcomeJudgment::new(OutcomeCode::GroundOut, "Crushes a home run to left");
        let verdict = RuleValidator::check(&ctx, &judgment);
        assert_eq!(verdict.error_category, Some(ErrorCategory::LogicError));

        let walk = OutcomeJudgment {
            final_bases: [Some(ctx.batter.id), None, None],
            ..OutcomeJudgment::new(OutcomeCode::Walk, "ball four, he walks")
        };
        assert!(RuleValidator::check(&ctx, &walk).is_valid);
    }
}

//! Collaborator contracts, one trait per decision role.
//!
//! Collaborators are called synchronously and in a fixed order; a turn never issues two
//! calls at once. Any `Err` is treated as a transport failure: fatal to the turn and never
//! retried. Only invalid judgments are retried, and that is the orchestrator's business.

use std::fmt;

use dugout_engine::{OutcomeJudgment, Side};

use crate::{
    context::TurnContext,
    decision::{
        BatterDecision, Environment, ManagerDecision, PitcherDecision, Rejection, TeamStrategy,
        ValidationVerdict,
    },
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum CollaboratorRole {
    #[display("environment")]
    Environment,
    #[display("{_0} manager")]
    Manager(Side),
    #[display("pitcher")]
    Pitcher,
    #[display("batter")]
    Batter,
    #[display("judge")]
    Judge,
    #[display("validator")]
    Validator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum ProviderErrorKind {
    #[display("unavailable")]
    Unavailable,
    #[display("timed out")]
    Timeout,
    #[display("malformed response")]
    Malformed,
}

/// A collaborator could not produce an answer.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("{role} collaborator {kind}: {message}")]
pub struct ProviderError {
    role: CollaboratorRole,
    kind: ProviderErrorKind,
    message: String,
}

impl ProviderError {
    #[must_use]
    pub fn new(role: CollaboratorRole, kind: ProviderErrorKind, message: impl fmt::Display) -> Self {
        Self {
            role,
            kind,
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn unavailable(role: CollaboratorRole, message: impl fmt::Display) -> Self {
        Self::new(role, ProviderErrorKind::Unavailable, message)
    }

    #[must_use]
    pub fn timeout(role: CollaboratorRole, message: impl fmt::Display) -> Self {
        Self::new(role, ProviderErrorKind::Timeout, message)
    }

    /// The collaborator answered, but the answer could not be parsed, e.g. an
    /// [`UnknownOutcomeCode`](dugout_engine::UnknownOutcomeCode).
    #[must_use]
    pub fn malformed(role: CollaboratorRole, message: impl fmt::Display) -> Self {
        Self::new(role, ProviderErrorKind::Malformed, message)
    }

    #[must_use]
    pub fn role(&self) -> CollaboratorRole {
        self.role
    }

    #[must_use]
    pub fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Keeps or revises the ballpark conditions.
pub trait EnvironmentProvider: fmt::Debug + Send {
    fn update_environment(
        &mut self,
        context: &TurnContext,
        current: &Environment,
    ) -> Result<Environment, ProviderError>;
}

/// A team's manager. Asked once per turn, for its own side.
pub trait ManagerProvider: fmt::Debug + Send {
    fn decide_strategy(
        &mut self,
        context: &TurnContext,
        side: Side,
    ) -> Result<ManagerDecision, ProviderError>;
}

/// The pitcher on the mound, given the fielding side's strategy.
pub trait PitcherProvider: fmt::Debug + Send {
    fn decide_pitch(
        &mut self,
        context: &TurnContext,
        strategy: TeamStrategy,
    ) -> Result<PitcherDecision, ProviderError>;
}

/// The batter at the plate, given the batting side's strategy.
pub trait BatterProvider: fmt::Debug + Send {
    fn decide_swing(
        &mut self,
        context: &TurnContext,
        strategy: TeamStrategy,
    ) -> Result<BatterDecision, ProviderError>;
}

/// Everything the judge synthesizes into one [`OutcomeJudgment`].
#[derive(Debug, Clone, Copy)]
pub struct JudgmentRequest<'a> {
    pub context: &'a TurnContext,
    pub environment: &'a Environment,
    pub offense: &'a ManagerDecision,
    pub defense: &'a ManagerDecision,
    pub pitch: &'a PitcherDecision,
    pub swing: &'a BatterDecision,
    /// Why the previous attempt in this turn was rejected, if it was.
    pub feedback: Option<&'a Rejection>,
}

pub trait JudgeProvider: fmt::Debug + Send {
    fn judge(&mut self, request: &JudgmentRequest<'_>) -> Result<OutcomeJudgment, ProviderError>;
}

pub trait ValidatorProvider: fmt::Debug + Send {
    fn validate(
        &mut self,
        context: &TurnContext,
        judgment: &OutcomeJudgment,
    ) -> Result<ValidationVerdict, ProviderError>;
}

/// The full set of collaborators driving one match.
#[derive(Debug)]
pub struct Collaborators {
    pub environment: Box<dyn EnvironmentProvider>,
    pub home_manager: Box<dyn ManagerProvider>,
    pub away_manager: Box<dyn ManagerProvider>,
    pub pitcher: Box<dyn PitcherProvider>,
    pub batter: Box<dyn BatterProvider>,
    pub judge: Box<dyn JudgeProvider>,
    pub validator: Box<dyn ValidatorProvider>,
}

impl Collaborators {
    pub(crate) fn manager(&mut self, side: Side) -> &mut dyn ManagerProvider {
        match side {
            Side::Home => self.home_manager.as_mut(),
            Side::Away => self.away_manager.as_mut(),
        }
    }
}

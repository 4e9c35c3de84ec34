//! Structured decisions exchanged with collaborators.
//!
//! Every collaborator answer is one of these types. Free text (`description`,
//! `reasoning`) is carried for the play-by-play only and never drives state.

use dugout_engine::{Effort, OutcomeJudgment, Repertoire};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weather {
    #[default]
    #[display("sunny")]
    Sunny,
    #[display("cloudy")]
    Cloudy,
    #[display("rainy")]
    Rainy,
    #[display("windy")]
    Windy,
}

impl Weather {
    pub const ALL: [Self; 4] = [Self::Sunny, Self::Cloudy, Self::Rainy, Self::Windy];
}

/// How generous the plate umpire's strike zone is.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UmpireZone {
    #[default]
    #[display("normal")]
    Normal,
    /// Favors the pitcher.
    #[display("wide")]
    Wide,
    /// Favors the batter.
    #[display("narrow")]
    Narrow,
    #[display("erratic")]
    Erratic,
}

impl UmpireZone {
    pub const ALL: [Self; 4] = [Self::Normal, Self::Wide, Self::Narrow, Self::Erratic];
}

/// Ballpark conditions, kept or revised at the start of every turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub weather: Weather,
    pub wind: String,
    pub umpire_zone: UmpireZone,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            weather: Weather::Sunny,
            wind: "calm".to_owned(),
            umpire_zone: UmpireZone::Normal,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamStrategy {
    #[default]
    #[display("normal")]
    Normal,
    #[display("bunt")]
    Bunt,
    #[display("hit-and-run")]
    HitAndRun,
    #[display("infield-in")]
    InfieldIn,
    #[display("long-ball")]
    LongBall,
}

/// A manager's call for the coming plate appearance.
///
/// Both managers answer every turn; only the offense strategy of the batting side and
/// the defense strategy (and pitcher change flag) of the fielding side take effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerDecision {
    #[serde(default)]
    pub offense_strategy: TeamStrategy,
    #[serde(default)]
    pub defense_strategy: TeamStrategy,
    #[serde(default)]
    pub change_pitcher: bool,
    pub description: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PitchType {
    #[display("fastball")]
    Fastball,
    #[display("slider")]
    Slider,
    #[display("curve")]
    Curve,
    #[display("changeup")]
    Changeup,
    #[display("splitter")]
    Splitter,
}

impl PitchType {
    pub const ALL: [Self; 5] = [
        Self::Fastball,
        Self::Slider,
        Self::Curve,
        Self::Changeup,
        Self::Splitter,
    ];

    /// The pitcher's grade for this pitch.
    #[must_use]
    pub fn grade(self, repertoire: &Repertoire) -> u8 {
        match self {
            Self::Fastball => repertoire.fastball,
            Self::Slider => repertoire.slider,
            Self::Curve => repertoire.curve,
            Self::Changeup => repertoire.changeup,
            Self::Splitter => repertoire.splitter,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PitchLocation {
    #[display("high")]
    High,
    #[display("low")]
    Low,
    #[display("inside")]
    Inside,
    #[display("outside")]
    Outside,
    /// Over the heart of the plate, usually a mistake.
    #[display("middle")]
    Middle,
}

impl PitchLocation {
    pub const ALL: [Self; 5] = [
        Self::High,
        Self::Low,
        Self::Inside,
        Self::Outside,
        Self::Middle,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitcherDecision {
    pub pitch_type: PitchType,
    pub location: PitchLocation,
    #[serde(default)]
    pub effort: Effort,
    pub description: String,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BattingStyle {
    #[display("aggressive")]
    Aggressive,
    #[default]
    #[display("cautious")]
    Cautious,
    #[display("pull")]
    Pull,
    #[display("push")]
    Push,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterDecision {
    #[serde(default)]
    pub aim_pitch_type: Option<PitchType>,
    #[serde(default)]
    pub aim_location: Option<PitchLocation>,
    pub style: BattingStyle,
    pub description: String,
}

impl BatterDecision {
    /// Whether the batter guessed the pitch type correctly.
    #[must_use]
    pub fn read_pitch(&self, pitch: &PitcherDecision) -> bool {
        self.aim_pitch_type == Some(pitch.pitch_type)
    }

    /// Whether the batter sat on the right location.
    #[must_use]
    pub fn read_location(&self, pitch: &PitcherDecision) -> bool {
        self.aim_location == Some(pitch.location)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// Internally contradictory, e.g. the description narrates a different outcome.
    #[display("logic error")]
    LogicError,
    /// Impossible under the rules, e.g. runners the play could not have produced.
    #[display("rule violation")]
    RuleViolation,
    /// Refers to players that are not in the play.
    #[display("hallucination")]
    Hallucination,
}

/// A validator's answer about one judgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub is_valid: bool,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub error_category: Option<ErrorCategory>,
    #[serde(default)]
    pub correction: Option<String>,
}

impl ValidationVerdict {
    #[must_use]
    pub fn valid(reasoning: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            reasoning: reasoning.into(),
            error_category: None,
            correction: None,
        }
    }

    #[must_use]
    pub fn invalid(
        category: ErrorCategory,
        reasoning: impl Into<String>,
        correction: impl Into<String>,
    ) -> Self {
        Self {
            is_valid: false,
            reasoning: reasoning.into(),
            error_category: Some(category),
            correction: Some(correction.into()),
        }
    }
}

/// Feedback handed back to the judge after its previous judgment was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// 1-based number of the rejected attempt.
    pub attempt: u32,
    pub judgment: OutcomeJudgment,
    pub category: Option<ErrorCategory>,
    pub reasoning: String,
    pub correction: Option<String>,
}

impl Rejection {
    #[must_use]
    pub fn new(attempt: u32, judgment: OutcomeJudgment, verdict: ValidationVerdict) -> Self {
        Self {
            attempt,
            judgment,
            category: verdict.error_category,
            reasoning: verdict.reasoning,
            correction: verdict.correction,
        }
    }
}

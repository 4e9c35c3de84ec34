use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Abstract result of a plate appearance.
///
/// Serialized with the short scorebook codes (`1B`, `HR`, `SO`, ...). Parsing via
/// [`FromStr`] also accepts the long aliases decision services tend to emit
/// (`HIT_SINGLE`, `HOMERUN`, `OUT_GROUND`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum OutcomeCode {
    #[serde(rename = "1B")]
    #[display("1B")]
    Single,
    #[serde(rename = "2B")]
    #[display("2B")]
    Double,
    #[serde(rename = "3B")]
    #[display("3B")]
    Triple,
    #[serde(rename = "HR")]
    #[display("HR")]
    HomeRun,
    #[serde(rename = "BB")]
    #[display("BB")]
    Walk,
    #[serde(rename = "HBP")]
    #[display("HBP")]
    HitByPitch,
    #[serde(rename = "E")]
    #[display("E")]
    Error,
    #[serde(rename = "SO")]
    #[display("SO")]
    Strikeout,
    #[serde(rename = "GO")]
    #[display("GO")]
    GroundOut,
    #[serde(rename = "FO")]
    #[display("FO")]
    FlyOut,
    #[serde(rename = "LO")]
    #[display("LO")]
    LineOut,
    #[serde(rename = "PO")]
    #[display("PO")]
    PopOut,
    /// An out of unspecified kind.
    #[serde(rename = "OUT")]
    #[display("OUT")]
    Out,
}

/// Rule class of an [`OutcomeCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum OutcomeFamily {
    /// Every runner and the batter advance exactly this many bases.
    Hit(usize),
    /// Batter to 1st, pushing forced runners only.
    ForcedAdvance,
    Out,
}

impl OutcomeCode {
    pub const ALL: [Self; 13] = [
        Self::Single,
        Self::Double,
        Self::Triple,
        Self::HomeRun,
        Self::Walk,
        Self::HitByPitch,
        Self::Error,
        Self::Strikeout,
        Self::GroundOut,
        Self::FlyOut,
        Self::LineOut,
        Self::PopOut,
        Self::Out,
    ];

    #[must_use]
    pub const fn family(self) -> OutcomeFamily {
        match self {
            Self::Single => OutcomeFamily::Hit(1),
            Self::Double => OutcomeFamily::Hit(2),
            Self::Triple => OutcomeFamily::Hit(3),
            Self::HomeRun => OutcomeFamily::Hit(4),
            Self::Walk | Self::HitByPitch | Self::Error => OutcomeFamily::ForcedAdvance,
            Self::Strikeout
            | Self::GroundOut
            | Self::FlyOut
            | Self::LineOut
            | Self::PopOut
            | Self::Out => OutcomeFamily::Out,
        }
    }

    #[must_use]
    pub fn is_hit(self) -> bool {
        self.family().is_hit()
    }

    #[must_use]
    pub fn is_out(self) -> bool {
        self.family().is_out()
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unknown outcome code `{code}`")]
pub struct UnknownOutcomeCode {
    code: String,
}

impl FromStr for OutcomeCode {
    type Err = UnknownOutcomeCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        let code = match normalized.as_str() {
            "1B" | "SINGLE" | "HIT_SINGLE" | "HIT" => Self::Single,
            "2B" | "DOUBLE" | "HIT_DOUBLE" => Self::Double,
            "3B" | "TRIPLE" | "HIT_TRIPLE" => Self::Triple,
            "HR" | "HOMERUN" | "HOME_RUN" => Self::HomeRun,
            "BB" | "IBB" | "WALK" | "BASE_ON_BALLS" => Self::Walk,
            "HBP" | "HIT_BY_PITCH" => Self::HitByPitch,
            "E" | "ERROR" | "REACHED_ON_ERROR" => Self::Error,
            "SO" | "K" | "STRIKEOUT" | "STRIKE_OUT" | "LOOKING_STRIKEOUT"
            | "SWINGING_STRIKEOUT" => Self::Strikeout,
            "GO" | "GROUND_OUT" | "OUT_GROUND" | "GROUNDOUT" => Self::GroundOut,
            "FO" | "FLY" | "FLY_OUT" | "FLYOUT" | "OUT_FLY" => Self::FlyOut,
            "LO" | "LINE_OUT" | "LINEOUT" | "OUT_LINE" => Self::LineOut,
            "PO" | "POP_OUT" | "POPOUT" | "OUT_POP" => Self::PopOut,
            "OUT" => Self::Out,
            _ => {
                return Err(UnknownOutcomeCode {
                    code: s.to_owned(),
                });
            }
        };
        Ok(code)
    }
}

/// A structured decision about one plate appearance.
///
/// This is the only channel through which a decision collaborator influences the match.
/// The rule engine reads [`code`](Self::code) alone; `final_bases` and `runs_scored` are the
/// collaborator's own claims, kept for validation and broadcast, and are overwritten with
/// the engine's result once the play is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeJudgment {
    pub code: OutcomeCode,
    pub description: String,
    #[serde(default)]
    pub reasoning: String,
    /// Claimed occupants of 1st, 2nd, and 3rd after the play.
    #[serde(default)]
    pub final_bases: [Option<PlayerId>; 3],
    #[serde(default)]
    pub runs_scored: u32,
}

impl OutcomeJudgment {
    #[must_use]
    pub fn new(code: OutcomeCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            reasoning: String::new(),
            final_bases: [None; 3],
            runs_scored: 0,
        }
    }
}

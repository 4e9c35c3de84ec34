use serde::{Deserialize, Serialize};

/// Tunable rules of a match.
///
/// # Example
///
/// ```
/// use dugout_engine::MatchRules;
///
/// let rules = MatchRules {
///     regulation_innings: 7,
///     ..MatchRules::default()
/// };
/// assert_eq!(rules.pitch_cost, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    /// Innings after which a decided game ends.
    pub regulation_innings: u32,
    /// Stamina spent on an ordinary pitch.
    pub pitch_cost: u32,
    /// Stamina spent on a full-effort pitch.
    pub full_effort_pitch_cost: u32,
    /// End the game as soon as the home side leads in the bottom of the regulation
    /// inning or later, instead of waiting for the half to close.
    pub walk_off: bool,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            regulation_innings: 9,
            pitch_cost: 1,
            full_effort_pitch_cost: 3,
            walk_off: false,
        }
    }
}

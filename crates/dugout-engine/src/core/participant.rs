use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Which team a player belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[display("home")]
    Home,
    #[display("away")]
    Away,
}

impl Side {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Home => Self::Away,
            Self::Away => Self::Home,
        }
    }
}

/// Stable identifier of a player within a match.
///
/// Assigned when a [`Roster`](super::Roster) is built: the side of the roster plus the
/// player's position in it. Bases, events, and judgments refer to players only through
/// this identifier, never by display name.
///
/// Serialized as `"<side>#<index>"` (e.g., `"away#4"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId {
    side: Side,
    index: u16,
}

impl PlayerId {
    #[must_use]
    pub const fn new(side: Side, index: u16) -> Self {
        Self { side, index }
    }

    #[must_use]
    pub const fn side(self) -> Side {
        self.side
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.side, self.index)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid player id `{input}`, expected `home#N` or `away#N`")]
pub struct ParsePlayerIdError {
    input: String,
}

impl FromStr for PlayerId {
    type Err = ParsePlayerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePlayerIdError {
            input: s.to_owned(),
        };
        let (side, index) = s.split_once('#').ok_or_else(err)?;
        let side = match side {
            "home" => Side::Home,
            "away" => Side::Away,
            _ => return Err(err()),
        };
        let index = index.parse().map_err(|_| err())?;
        Ok(Self { side, index })
    }
}

impl Serialize for PlayerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Pitcher,
    Batter,
}

/// Pitch repertoire grades (0-100 each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repertoire {
    pub fastball: u8,
    pub slider: u8,
    pub curve: u8,
    pub changeup: u8,
    pub splitter: u8,
}

impl Default for Repertoire {
    fn default() -> Self {
        Self {
            fastball: 50,
            slider: 50,
            curve: 50,
            changeup: 50,
            splitter: 50,
        }
    }
}

/// Fielding ratings (0-100 each). `error` is an error tendency: lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defense {
    pub range: u8,
    pub error: u8,
    pub arm: u8,
}

impl Default for Defense {
    fn default() -> Self {
        Self {
            range: 50,
            error: 50,
            arm: 50,
        }
    }
}

/// A player's ability profile.
///
/// The three base ratings are shared between roles and reinterpreted by the
/// role-specific views: for pitchers `contact` is control, `power` is stuff and
/// `speed` is velocity.
///
/// Ability values never change during a match; per-match counters live on
/// [`PlayerState`](super::PlayerState).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub role: Role,
    #[serde(default = "default_position")]
    pub position: String,
    pub contact: u8,
    pub power: u8,
    pub speed: u8,
    #[serde(default = "default_rating")]
    pub mental: u8,
    #[serde(default = "default_stamina")]
    pub stamina: u32,
    #[serde(default = "default_rating")]
    pub recovery: u8,
    #[serde(default = "default_velocity_max")]
    pub velocity_max: u16,
    #[serde(default)]
    pub repertoire: Repertoire,
    #[serde(default = "default_rating")]
    pub eye: u8,
    #[serde(default = "default_rating")]
    pub clutch: u8,
    #[serde(default)]
    pub defense: Defense,
}

fn default_position() -> String {
    "DH".to_owned()
}

const fn default_rating() -> u8 {
    50
}

const fn default_stamina() -> u32 {
    100
}

const fn default_velocity_max() -> u16 {
    145
}

/// Pitching view of a [`Participant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchingView {
    pub control: u8,
    pub stuff: u8,
    pub velocity: u8,
    pub stamina: u32,
    pub mental: u8,
    pub repertoire: Repertoire,
}

/// Batting view of a [`Participant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingView {
    pub contact: u8,
    pub power: u8,
    pub speed: u8,
    pub eye: u8,
    pub clutch: u8,
    pub defense: Defense,
}

impl Participant {
    /// Creates a participant with the given base ratings and neutral extended ratings.
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role, contact: u8, power: u8, speed: u8) -> Self {
        Self {
            name: name.into(),
            role,
            position: match role {
                Role::Pitcher => "P".to_owned(),
                Role::Batter => default_position(),
            },
            contact,
            power,
            speed,
            mental: default_rating(),
            stamina: default_stamina(),
            recovery: default_rating(),
            velocity_max: default_velocity_max(),
            repertoire: Repertoire::default(),
            eye: default_rating(),
            clutch: default_rating(),
            defense: Defense::default(),
        }
    }

    #[must_use]
    pub fn pitching(&self) -> Option<PitchingView> {
        self.role.is_pitcher().then_some(PitchingView {
            control: self.contact,
            stuff: self.power,
            velocity: self.speed,
            stamina: self.stamina,
            mental: self.mental,
            repertoire: self.repertoire,
        })
    }

    #[must_use]
    pub fn batting(&self) -> Option<BattingView> {
        self.role.is_batter().then_some(BattingView {
            contact: self.contact,
            power: self.power,
            speed: self.speed,
            eye: self.eye,
            clutch: self.clutch,
            defense: self.defense,
        })
    }
}

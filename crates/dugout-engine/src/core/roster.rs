use serde::{Deserialize, Serialize};

use super::participant::{Participant, PlayerId, Role, Side};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    Best,
    Good,
    #[default]
    Normal,
    Bad,
}

/// A participant plus the counters that change during a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    id: PlayerId,
    participant: Participant,
    current_stamina: u32,
    pitch_count: u32,
    condition: Condition,
}

impl PlayerState {
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.participant.name
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.participant.role
    }

    #[must_use]
    pub fn current_stamina(&self) -> u32 {
        self.current_stamina
    }

    #[must_use]
    pub fn pitch_count(&self) -> u32 {
        self.pitch_count
    }

    #[must_use]
    pub fn condition(&self) -> Condition {
        self.condition
    }

    /// Deducts `cost` stamina (floored at zero) and counts one pitch.
    pub(crate) fn record_pitch(&mut self, cost: u32) {
        self.current_stamina = self.current_stamina.saturating_sub(cost);
        self.pitch_count += 1;
    }
}

/// Roster input supplied by the caller before a match starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub participant: Participant,
    /// Starting stamina; defaults to the participant's maximum.
    #[serde(default)]
    pub stamina: Option<u32>,
    #[serde(default)]
    pub condition: Condition,
}

impl From<Participant> for RosterEntry {
    fn from(participant: Participant) -> Self {
        Self {
            participant,
            stamina: None,
            condition: Condition::Normal,
        }
    }
}

/// Team roster file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub name: String,
    pub players: Vec<RosterEntry>,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RosterError {
    #[display("roster `{team}` has no pitcher")]
    NoPitcher { team: String },
    #[display("roster `{team}` has no batter")]
    NoBatter { team: String },
    #[display("roster `{team}` has {count} players, more than the supported {max}")]
    TooManyPlayers {
        team: String,
        count: usize,
        max: usize,
    },
    #[display("roster `{team}`: player at position {index} is recorded as {id}")]
    MisplacedPlayer {
        team: String,
        index: usize,
        id: PlayerId,
    },
    #[display("roster `{team}`: pitcher and batter lists do not match the player roles")]
    RoleMismatch { team: String },
    #[display("roster `{team}`: active pitcher {active} of {pitchers}")]
    ActivePitcherOutOfRange {
        team: String,
        active: usize,
        pitchers: usize,
    },
}

/// An ordered team roster for one side of a match.
///
/// - The batting order is the positional order of the batters.
/// - Exactly one pitcher is active at a time, selected by an index into the pitchers.
///
/// # Example
///
/// ```
/// use dugout_engine::{Participant, Role, Roster, Side, TeamSheet};
///
/// let sheet = TeamSheet {
///     name: "Lions".to_owned(),
///     players: vec![
///         Participant::new("Ace", Role::Pitcher, 60, 60, 60).into(),
///         Participant::new("Leadoff", Role::Batter, 70, 40, 80).into(),
///     ],
/// };
/// let roster = Roster::new(Side::Away, sheet).unwrap();
/// assert_eq!(roster.active_pitcher().name(), "Ace");
/// assert_eq!(roster.batter_at(0).name(), "Leadoff");
/// ```
///
/// A deserialized roster goes through the same checks as [`Roster::new`], so a
/// snapshot with an empty lineup or a dangling index is rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RosterRepr")]
pub struct Roster {
    side: Side,
    name: String,
    players: Vec<PlayerState>,
    pitchers: Vec<usize>,
    batters: Vec<usize>,
    active_pitcher: usize,
}

#[derive(Deserialize)]
struct RosterRepr {
    side: Side,
    name: String,
    players: Vec<PlayerState>,
    pitchers: Vec<usize>,
    batters: Vec<usize>,
    active_pitcher: usize,
}

fn indices_of(players: &[PlayerState], role: Role) -> Vec<usize> {
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.role() == role)
        .map(|(i, _)| i)
        .collect()
}

impl TryFrom<RosterRepr> for Roster {
    type Error = RosterError;

    fn try_from(repr: RosterRepr) -> Result<Self, Self::Error> {
        let RosterRepr {
            side,
            name,
            players,
            pitchers,
            batters,
            active_pitcher,
        } = repr;
        for (index, player) in players.iter().enumerate() {
            if player.id.side() != side || player.id.index() != index {
                return Err(RosterError::MisplacedPlayer {
                    team: name,
                    index,
                    id: player.id,
                });
            }
        }
        if pitchers.is_empty() {
            return Err(RosterError::NoPitcher { team: name });
        }
        if batters.is_empty() {
            return Err(RosterError::NoBatter { team: name });
        }
        if pitchers != indices_of(&players, Role::Pitcher)
            || batters != indices_of(&players, Role::Batter)
        {
            return Err(RosterError::RoleMismatch { team: name });
        }
        if active_pitcher >= pitchers.len() {
            return Err(RosterError::ActivePitcherOutOfRange {
                team: name,
                active: active_pitcher,
                pitchers: pitchers.len(),
            });
        }
        Ok(Self {
            side,
            name,
            players,
            pitchers,
            batters,
            active_pitcher,
        })
    }
}

impl Roster {
    pub fn new(side: Side, sheet: TeamSheet) -> Result<Self, RosterError> {
        let TeamSheet { name, players } = sheet;
        if players.len() > usize::from(u16::MAX) {
            return Err(RosterError::TooManyPlayers {
                team: name,
                count: players.len(),
                max: usize::from(u16::MAX),
            });
        }

        let players: Vec<PlayerState> = players
            .into_iter()
            .zip(0..)
            .map(|(entry, index)| PlayerState {
                id: PlayerId::new(side, index),
                current_stamina: entry
                    .stamina
                    .unwrap_or(entry.participant.stamina)
                    .min(entry.participant.stamina),
                participant: entry.participant,
                pitch_count: 0,
                condition: entry.condition,
            })
            .collect();

        let pitchers = indices_of(&players, Role::Pitcher);
        let batters = indices_of(&players, Role::Batter);

        if pitchers.is_empty() {
            return Err(RosterError::NoPitcher { team: name });
        }
        if batters.is_empty() {
            return Err(RosterError::NoBatter { team: name });
        }

        Ok(Self {
            side,
            name,
            players,
            pitchers,
            batters,
            active_pitcher: 0,
        })
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    /// Returns the player with the given id, if it belongs to this roster.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        if id.side() != self.side {
            return None;
        }
        self.players.get(id.index())
    }

    pub fn pitchers(&self) -> impl Iterator<Item = &PlayerState> + '_ {
        self.pitchers.iter().map(|&i| &self.players[i])
    }

    pub fn batters(&self) -> impl Iterator<Item = &PlayerState> + '_ {
        self.batters.iter().map(|&i| &self.players[i])
    }

    #[must_use]
    pub fn batter_count(&self) -> usize {
        self.batters.len()
    }

    /// Returns the batter at the given batting-order cursor, wrapping around the lineup.
    #[must_use]
    pub fn batter_at(&self, cursor: usize) -> &PlayerState {
        &self.players[self.batters[cursor % self.batters.len()]]
    }

    #[must_use]
    pub fn active_pitcher(&self) -> &PlayerState {
        &self.players[self.pitchers[self.active_pitcher]]
    }

    pub(crate) fn active_pitcher_mut(&mut self) -> &mut PlayerState {
        &mut self.players[self.pitchers[self.active_pitcher]]
    }

    /// Number of pitchers that have not yet entered the game.
    #[must_use]
    pub fn remaining_relievers(&self) -> usize {
        self.pitchers.len() - self.active_pitcher - 1
    }

    /// Brings in the next pitcher, if one remains.
    ///
    /// Returns `(outgoing, incoming)` on success, `None` when the active pitcher is the last.
    pub(crate) fn change_pitcher(&mut self) -> Option<(PlayerId, PlayerId)> {
        if self.remaining_relievers() == 0 {
            return None;
        }
        let from = self.active_pitcher().id();
        self.active_pitcher += 1;
        Some((from, self.active_pitcher().id()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sheet(name: &str, pitchers: usize, batters: usize) -> TeamSheet {
        let players = (0..pitchers)
            .map(|i| Participant::new(format!("{name} P{i}"), Role::Pitcher, 60, 60, 60))
            .chain(
                (0..batters)
                    .map(|i| Participant::new(format!("{name} B{i}"), Role::Batter, 60, 60, 60)),
            )
            .map(RosterEntry::from)
            .collect();
        TeamSheet {
            name: name.to_owned(),
            players,
        }
    }

    #[test]
    fn test_roster_requires_pitcher_and_batter() {
        assert!(matches!(
            Roster::new(Side::Home, sheet("A", 0, 9)),
            Err(RosterError::NoPitcher { .. })
        ));
        assert!(matches!(
            Roster::new(Side::Home, sheet("A", 2, 0)),
            Err(RosterError::NoBatter { .. })
        ));
    }

    #[test]
    fn test_batting_order_wraps() {
        let roster = Roster::new(Side::Home, sheet("A", 2, 9)).unwrap();
        assert_eq!(roster.batter_at(0).name(), "A B0");
        assert_eq!(roster.batter_at(8).name(), "A B8");
        assert_eq!(roster.batter_at(9).name(), "A B0");
        assert_eq!(roster.batter_at(20).name(), "A B2");
    }

    #[test]
    fn test_player_ids_are_roster_positions() {
        let roster = Roster::new(Side::Away, sheet("B", 1, 3)).unwrap();
        for (i, player) in roster.players().iter().enumerate() {
            assert_eq!(player.id(), PlayerId::new(Side::Away, u16::try_from(i).unwrap()));
            assert_eq!(roster.player(player.id()).unwrap().name(), player.name());
        }
        assert!(roster.player(PlayerId::new(Side::Home, 0)).is_none());
        assert!(roster.player(PlayerId::new(Side::Away, 4)).is_none());
    }

    #[test]
    fn test_change_pitcher_stops_at_last() {
        let mut roster = Roster::new(Side::Home, sheet("A", 2, 9)).unwrap();
        let first = roster.active_pitcher().id();
        let (from, to) = roster.change_pitcher().unwrap();
        assert_eq!(from, first);
        assert_eq!(roster.active_pitcher().id(), to);
        assert_eq!(roster.remaining_relievers(), 0);
        assert!(roster.change_pitcher().is_none());
        assert_eq!(roster.active_pitcher().id(), to);
    }

    #[test]
    fn test_starting_stamina_is_capped_by_max() {
        let mut sheet = sheet("A", 1, 1);
        sheet.players[0].stamina = Some(500);
        sheet.players[1].stamina = Some(40);
        let roster = Roster::new(Side::Home, sheet).unwrap();
        assert_eq!(roster.players()[0].current_stamina(), 100);
        assert_eq!(roster.players()[1].current_stamina(), 40);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut roster = Roster::new(Side::Away, sheet("A", 2, 9)).unwrap();
        roster.change_pitcher();
        let json = serde_json::to_string(&roster).unwrap();
        assert_eq!(serde_json::from_str::<Roster>(&json).unwrap(), roster);
    }

    #[test]
    fn test_snapshot_with_broken_lineup_is_rejected() {
        let roster = Roster::new(Side::Away, sheet("A", 2, 9)).unwrap();
        let edit = |key: &str, value: serde_json::Value| {
            let mut json = serde_json::to_value(&roster).unwrap();
            json[key] = value;
            serde_json::from_value::<Roster>(json).unwrap_err().to_string()
        };

        assert!(edit("batters", serde_json::json!([])).contains("has no batter"));
        assert!(edit("pitchers", serde_json::json!([])).contains("has no pitcher"));
        assert!(edit("active_pitcher", serde_json::json!(2)).contains("active pitcher 2 of 2"));
        assert!(edit("batters", serde_json::json!([0, 2])).contains("do not match"));
        assert!(edit("side", serde_json::json!("home")).contains("recorded as away#0"));
    }

    #[test]
    fn test_record_pitch_floors_stamina() {
        let mut roster = Roster::new(Side::Home, sheet("A", 1, 1)).unwrap();
        let pitcher = roster.active_pitcher_mut();
        for _ in 0..40 {
            pitcher.record_pitch(3);
        }
        assert_eq!(pitcher.current_stamina(), 0);
        assert_eq!(pitcher.pitch_count(), 40);
    }
}

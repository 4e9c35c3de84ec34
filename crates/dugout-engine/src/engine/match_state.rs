use serde::{Deserialize, Serialize};

use crate::{
    RosterError,
    core::{Base, Bases, PlayerId, PlayerState, Roster, Side, TeamSheet},
};

use super::{event::MatchEvent, outcome::OutcomeJudgment};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Half {
    #[display("top")]
    Top,
    #[display("bottom")]
    Bottom,
}

impl Half {
    /// The side at bat in this half.
    #[must_use]
    pub const fn offense(self) -> Side {
        match self {
            Self::Top => Side::Away,
            Self::Bottom => Side::Home,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[display("ready")]
    Ready,
    #[display("playing")]
    Playing,
    #[display("finished")]
    Finished,
    /// Stopped by the caller, usually after a collaborator failure.
    #[display("abandoned")]
    Abandoned,
}

/// The aggregate root of a match.
///
/// Holds both rosters, the inning/half/outs counters, the score, base occupancy,
/// the batting-order cursors, the lifecycle status, and the event log.
///
/// Fields change only through the rule engine, the lifecycle functions, and the
/// fatigue bookkeeping in this crate; everything outside reads through accessors.
///
/// # Example
///
/// ```
/// use dugout_engine::{Half, MatchState, Participant, Role, TeamSheet};
///
/// let team = |name: &str| TeamSheet {
///     name: name.to_owned(),
///     players: vec![
///         Participant::new(format!("{name} ace"), Role::Pitcher, 60, 60, 60).into(),
///         Participant::new(format!("{name} leadoff"), Role::Batter, 60, 60, 60).into(),
///     ],
/// };
/// let state = MatchState::new(team("Tigers"), team("Lions")).unwrap();
///
/// assert_eq!(state.inning(), 1);
/// assert_eq!(state.half(), Half::Top);
/// assert_eq!(state.current_batter().name(), "Lions leadoff");
/// assert_eq!(state.current_pitcher().name(), "Tigers ace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(super) home: Roster,
    pub(super) away: Roster,
    pub(super) inning: u32,
    pub(super) half: Half,
    pub(super) outs: u32,
    pub(super) home_score: u32,
    pub(super) away_score: u32,
    pub(super) bases: Bases,
    pub(super) home_cursor: usize,
    pub(super) away_cursor: usize,
    pub(super) status: MatchStatus,
    pub(super) events: Vec<MatchEvent>,
    pub(super) last_judgment: Option<OutcomeJudgment>,
    pub(super) plate_appearances: u32,
}

impl MatchState {
    /// Builds the initial state from the two team sheets.
    pub fn new(home: TeamSheet, away: TeamSheet) -> Result<Self, RosterError> {
        Ok(Self {
            home: Roster::new(Side::Home, home)?,
            away: Roster::new(Side::Away, away)?,
            inning: 1,
            half: Half::Top,
            outs: 0,
            home_score: 0,
            away_score: 0,
            bases: Bases::EMPTY,
            home_cursor: 0,
            away_cursor: 0,
            status: MatchStatus::Ready,
            events: Vec::new(),
            last_judgment: None,
            plate_appearances: 0,
        })
    }

    #[must_use]
    pub fn inning(&self) -> u32 {
        self.inning
    }

    #[must_use]
    pub fn half(&self) -> Half {
        self.half
    }

    #[must_use]
    pub fn outs(&self) -> u32 {
        self.outs
    }

    #[must_use]
    pub fn home_score(&self) -> u32 {
        self.home_score
    }

    #[must_use]
    pub fn away_score(&self) -> u32 {
        self.away_score
    }

    #[must_use]
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_score,
            Side::Away => self.away_score,
        }
    }

    #[must_use]
    pub fn bases(&self) -> &Bases {
        &self.bases
    }

    #[must_use]
    pub fn runner_at(&self, base: Base) -> Option<&PlayerState> {
        self.bases.get(base).and_then(|id| self.player(id))
    }

    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    #[must_use]
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    /// The judgment committed by the most recent turn, with the engine's bases and runs.
    #[must_use]
    pub fn last_judgment(&self) -> Option<&OutcomeJudgment> {
        self.last_judgment.as_ref()
    }

    /// Number of completed plate appearances.
    #[must_use]
    pub fn plate_appearances(&self) -> u32 {
        self.plate_appearances
    }

    #[must_use]
    pub fn home(&self) -> &Roster {
        &self.home
    }

    #[must_use]
    pub fn away(&self) -> &Roster {
        &self.away
    }

    #[must_use]
    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub(super) fn roster_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    #[must_use]
    pub fn offense_side(&self) -> Side {
        self.half.offense()
    }

    #[must_use]
    pub fn defense_side(&self) -> Side {
        self.half.offense().opponent()
    }

    #[must_use]
    pub fn offense_team(&self) -> &Roster {
        self.roster(self.offense_side())
    }

    #[must_use]
    pub fn defense_team(&self) -> &Roster {
        self.roster(self.defense_side())
    }

    /// Batting-order cursor of `side` (number of that side's completed plate appearances).
    #[must_use]
    pub fn batting_cursor(&self, side: Side) -> usize {
        match side {
            Side::Home => self.home_cursor,
            Side::Away => self.away_cursor,
        }
    }

    #[must_use]
    pub fn current_batter(&self) -> &PlayerState {
        self.offense_team()
            .batter_at(self.batting_cursor(self.offense_side()))
    }

    #[must_use]
    pub fn current_pitcher(&self) -> &PlayerState {
        self.defense_team().active_pitcher()
    }

    /// The batter due up after the current one.
    #[must_use]
    pub fn next_batter_preview(&self) -> &PlayerState {
        self.offense_team()
            .batter_at(self.batting_cursor(self.offense_side()) + 1)
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.roster(id.side()).player(id)
    }

    /// The side ahead on the scoreboard, once the match has finished.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        if !self.status.is_finished() {
            return None;
        }
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Moves a ready match into play. Has no effect in any other status.
    pub fn start(&mut self) {
        if self.status.is_ready() {
            self.status = MatchStatus::Playing;
        }
    }

    /// Marks an unfinished match as abandoned, keeping all progress.
    pub fn abandon(&mut self) {
        if !self.status.is_finished() {
            self.status = MatchStatus::Abandoned;
        }
    }

    pub(super) fn advance_batting_order(&mut self) {
        match self.offense_side() {
            Side::Home => self.home_cursor += 1,
            Side::Away => self.away_cursor += 1,
        }
    }

    pub(super) fn push_event(&mut self, event: MatchEvent) {
        self.events.push(event);
    }
}

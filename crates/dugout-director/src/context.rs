//! Read-only snapshot of a match handed to every collaborator.

use dugout_engine::{
    Base, Bases, Half, MatchState, PlayerId, PlayerState, Repertoire, Side,
};
use serde::{Deserialize, Serialize};

/// A runner on base, as a collaborator sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerView {
    pub base: Base,
    pub id: PlayerId,
    pub name: String,
    pub speed: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterProfile {
    pub id: PlayerId,
    pub name: String,
    pub position: String,
    pub contact: u8,
    pub power: u8,
    pub speed: u8,
    pub eye: u8,
    pub clutch: u8,
}

impl BatterProfile {
    fn of(player: &PlayerState) -> Self {
        let p = player.participant();
        Self {
            id: player.id(),
            name: p.name.clone(),
            position: p.position.clone(),
            contact: p.contact,
            power: p.power,
            speed: p.speed,
            eye: p.eye,
            clutch: p.clutch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitcherProfile {
    pub id: PlayerId,
    pub name: String,
    pub control: u8,
    pub stuff: u8,
    pub velocity: u8,
    pub mental: u8,
    pub repertoire: Repertoire,
    pub max_stamina: u32,
    pub current_stamina: u32,
    pub pitch_count: u32,
}

impl PitcherProfile {
    fn of(player: &PlayerState) -> Self {
        let p = player.participant();
        Self {
            id: player.id(),
            name: p.name.clone(),
            control: p.contact,
            stuff: p.power,
            velocity: p.speed,
            mental: p.mental,
            repertoire: p.repertoire,
            max_stamina: p.stamina,
            current_stamina: player.current_stamina(),
            pitch_count: player.pitch_count(),
        }
    }

    /// Remaining stamina as a fraction of the maximum, in `0.0..=1.0`.
    #[must_use]
    pub fn stamina_ratio(&self) -> f32 {
        if self.max_stamina == 0 {
            return 0.0;
        }
        #[expect(clippy::cast_precision_loss)]
        let ratio = self.current_stamina as f32 / self.max_stamina as f32;
        ratio.clamp(0.0, 1.0)
    }
}

/// Mean fielding ratings of the defending side's position players.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefenseRatings {
    pub range: f32,
    pub error: f32,
    pub arm: f32,
}

impl DefenseRatings {
    fn of<'a>(fielders: impl Iterator<Item = &'a PlayerState>) -> Self {
        let (mut range, mut error, mut arm, mut count) = (0.0, 0.0, 0.0, 0_u16);
        for fielder in fielders {
            let d = fielder.participant().defense;
            range += f32::from(d.range);
            error += f32::from(d.error);
            arm += f32::from(d.arm);
            count = count.saturating_add(1);
        }
        if count == 0 {
            return Self {
                range: 50.0,
                error: 50.0,
                arm: 50.0,
            };
        }
        let count = f32::from(count);
        Self {
            range: range / count,
            error: error / count,
            arm: arm / count,
        }
    }
}

/// Everything a collaborator may know about the coming plate appearance.
///
/// Owned, so it can be logged or shipped to an external service as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnContext {
    pub inning: u32,
    pub half: Half,
    pub outs: u32,
    pub home_name: String,
    pub away_name: String,
    pub home_score: u32,
    pub away_score: u32,
    pub bases: Bases,
    pub runners: Vec<RunnerView>,
    pub batter: BatterProfile,
    pub pitcher: PitcherProfile,
    pub next_batter: String,
    pub defense: DefenseRatings,
    /// Pitchers left in the fielding side's bullpen.
    pub remaining_relievers: usize,
    pub plate_appearances: u32,
}

impl TurnContext {
    #[must_use]
    pub fn capture(state: &MatchState) -> Self {
        let runners = state
            .bases()
            .runners()
            .filter_map(|(base, id)| {
                let p = state.player(id)?.participant();
                Some(RunnerView {
                    base,
                    id,
                    name: p.name.clone(),
                    speed: p.speed,
                })
            })
            .collect();
        let defense = state.defense_team();
        Self {
            inning: state.inning(),
            half: state.half(),
            outs: state.outs(),
            home_name: state.home().name().to_owned(),
            away_name: state.away().name().to_owned(),
            home_score: state.home_score(),
            away_score: state.away_score(),
            bases: *state.bases(),
            runners,
            batter: BatterProfile::of(state.current_batter()),
            pitcher: PitcherProfile::of(state.current_pitcher()),
            next_batter: state.next_batter_preview().name().to_owned(),
            defense: DefenseRatings::of(defense.batters()),
            remaining_relievers: defense.remaining_relievers(),
            plate_appearances: state.plate_appearances(),
        }
    }

    #[must_use]
    pub fn offense(&self) -> Side {
        self.half.offense()
    }

    #[must_use]
    pub fn defense_side(&self) -> Side {
        self.half.offense().opponent()
    }

    #[must_use]
    pub fn team_name(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_name,
            Side::Away => &self.away_name,
        }
    }

    /// Runs `side` leads by; negative when trailing.
    #[must_use]
    pub fn score_diff(&self, side: Side) -> i64 {
        let (mine, theirs) = match side {
            Side::Home => (self.home_score, self.away_score),
            Side::Away => (self.away_score, self.home_score),
        };
        i64::from(mine) - i64::from(theirs)
    }

    /// Players who can end up on base after this play: the runners and the batter.
    pub fn potential_runners(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.runners
            .iter()
            .map(|r| r.id)
            .chain(std::iter::once(self.batter.id))
    }

    /// Display name of a player in the play.
    #[must_use]
    pub fn name_of(&self, id: PlayerId) -> Option<&str> {
        if id == self.batter.id {
            return Some(&self.batter.name);
        }
        self.runners
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.name.as_str())
    }
}

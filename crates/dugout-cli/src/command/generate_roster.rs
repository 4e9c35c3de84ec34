use std::path::PathBuf;

use anyhow::Context as _;
use dugout_director::heuristic::MatchSeed;
use dugout_engine::{Condition, Defense, Participant, Repertoire, Role, RosterEntry, TeamSheet};
use rand::{Rng, seq::IndexedRandom as _};
use rand_distr::{Distribution as _, Triangular};
use tracing::info;

use crate::util::Output;

const GIVEN_NAMES: [&str; 16] = [
    "Min", "Jae", "Hyun", "Sung", "Joon", "Tae", "Woo", "Ji", "Dong", "Young", "Sang", "Ho",
    "Kyu", "Seok", "Chan", "Hoon",
];
const FAMILY_NAMES: [&str; 10] = [
    "Kim", "Lee", "Park", "Choi", "Jung", "Kang", "Cho", "Yoon", "Jang", "Lim",
];
const FIELD_POSITIONS: [&str; 8] = ["C", "1B", "2B", "3B", "SS", "LF", "CF", "RF"];
const CONDITIONS: [Condition; 4] = [
    Condition::Best,
    Condition::Good,
    Condition::Normal,
    Condition::Bad,
];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateRosterArg {
    /// Team name
    #[arg(long)]
    name: String,
    /// Seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<MatchSeed>,
    /// Number of pitchers (the first one starts)
    #[arg(long, default_value_t = 5)]
    pitchers: usize,
    /// Number of batters (the first nine bat in order)
    #[arg(long, default_value_t = 12)]
    batters: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateRosterArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(rand::random);
    info!(%seed, team = %arg.name, "generating roster");
    let sheet = generate_team(&arg.name, arg.pitchers, arg.batters, &mut seed.rng(0))?;
    Output::save_json(&sheet, arg.output.clone())
}

/// Ratings drawn the way a scout's sheet reads: most players are average, few are stars.
#[derive(Debug)]
struct RatingDistribution {
    base: Triangular<f64>,
    velocity: Triangular<f64>,
}

impl RatingDistribution {
    fn new() -> anyhow::Result<Self> {
        Ok(Self {
            base: Triangular::new(30.0, 100.0, 60.0).context("invalid rating distribution")?,
            velocity: Triangular::new(130.0, 160.0, 144.0)
                .context("invalid velocity distribution")?,
        })
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn base<R: Rng>(&self, rng: &mut R) -> u8 {
        self.base.sample(rng).clamp(0.0, 100.0) as u8
    }

    fn sub<R: Rng>(rng: &mut R) -> u8 {
        rng.random_range(30..=90)
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn velocity<R: Rng>(&self, rng: &mut R) -> u16 {
        self.velocity.sample(rng) as u16
    }
}

fn player_name<R: Rng>(rng: &mut R) -> String {
    let family = FAMILY_NAMES.choose(rng).copied().unwrap_or("Kim");
    let given = GIVEN_NAMES.choose(rng).copied().unwrap_or("Min");
    format!("{given} {family}")
}

fn player<R: Rng>(
    dist: &RatingDistribution,
    role: Role,
    position: String,
    rng: &mut R,
) -> RosterEntry {
    let participant = Participant {
        name: player_name(rng),
        role,
        position,
        contact: dist.base(rng),
        power: dist.base(rng),
        speed: dist.base(rng),
        mental: RatingDistribution::sub(rng),
        stamina: match role {
            Role::Pitcher => rng.random_range(60..=100),
            Role::Batter => rng.random_range(40..=80),
        },
        recovery: RatingDistribution::sub(rng),
        velocity_max: dist.velocity(rng),
        repertoire: Repertoire {
            fastball: RatingDistribution::sub(rng),
            slider: RatingDistribution::sub(rng),
            curve: RatingDistribution::sub(rng),
            changeup: RatingDistribution::sub(rng),
            splitter: RatingDistribution::sub(rng),
        },
        eye: RatingDistribution::sub(rng),
        clutch: RatingDistribution::sub(rng),
        defense: Defense {
            range: RatingDistribution::sub(rng),
            error: rng.random_range(10..=80),
            arm: RatingDistribution::sub(rng),
        },
    };
    RosterEntry {
        participant,
        stamina: None,
        condition: CONDITIONS.choose(rng).copied().unwrap_or_default(),
    }
}

/// A random team: `pitchers` pitchers followed by `batters` batters.
pub(crate) fn generate_team<R: Rng>(
    name: &str,
    pitchers: usize,
    batters: usize,
    rng: &mut R,
) -> anyhow::Result<TeamSheet> {
    let dist = RatingDistribution::new()?;
    let pitching = (0..pitchers).map(|i| {
        let position = if i == 0 { "SP" } else { "RP" };
        (Role::Pitcher, position.to_owned())
    });
    let batting = (0..batters).map(|i| {
        let position = FIELD_POSITIONS.get(i).copied().unwrap_or("DH");
        (Role::Batter, position.to_owned())
    });
    let players = pitching
        .chain(batting)
        .map(|(role, position)| player(&dist, role, position, rng))
        .collect();
    Ok(TeamSheet {
        name: name.to_owned(),
        players,
    })
}

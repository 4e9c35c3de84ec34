use std::path::{Path, PathBuf};

use anyhow::Context as _;
use dugout_director::{
    heuristic::{self, MatchSeed},
    orchestrator::{MatchAborted, MatchOrchestrator, RetryPolicy},
};
use dugout_engine::{MatchEvent, MatchRules, MatchState, TeamSheet};
use tracing::{error, info};

use crate::{
    command::generate_roster::generate_team,
    schema::record::{MatchRecord, StepRecord},
    util::{self, Output},
};

/// Seed streams for generated rosters, clear of the collaborators' streams.
const HOME_ROSTER_STREAM: u64 = 100;
const AWAY_ROSTER_STREAM: u64 = 101;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Home roster JSON (generated from the seed if omitted)
    #[arg(long)]
    home: Option<PathBuf>,
    /// Away roster JSON (generated from the seed if omitted)
    #[arg(long)]
    away: Option<PathBuf>,
    /// Seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<MatchSeed>,
    /// Regulation innings
    #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(1..))]
    innings: u32,
    /// End the game as soon as the home side takes the lead in the last inning
    #[arg(long)]
    walk_off: bool,
    /// Judgment retries per plate appearance after a rejection
    #[arg(long, default_value_t = 3)]
    max_retries: u32,
    /// Output file path for the match record
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_or_generate(
    path: Option<&Path>,
    name: &str,
    seed: MatchSeed,
    stream: u64,
) -> anyhow::Result<TeamSheet> {
    match path {
        Some(path) => util::read_roster_file(path),
        None => generate_team(name, 5, 12, &mut seed.rng(stream)),
    }
}

/// Logs match events as they are appended, each one once.
#[derive(Debug, Default)]
struct EventFeed {
    logged: usize,
}

impl EventFeed {
    fn flush<'a>(&mut self, state: &'a MatchState) -> &'a [MatchEvent] {
        let fresh = state.events().get(self.logged..).unwrap_or_default();
        for event in fresh {
            info!("{event}");
        }
        self.logged = state.events().len();
        fresh
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(rand::random);
    let rules = MatchRules {
        regulation_innings: arg.innings,
        walk_off: arg.walk_off,
        ..MatchRules::default()
    };
    let retry = RetryPolicy {
        max_retries: arg.max_retries,
    };

    let home = load_or_generate(arg.home.as_deref(), "Home Tigers", seed, HOME_ROSTER_STREAM)?;
    let away = load_or_generate(arg.away.as_deref(), "Away Lions", seed, AWAY_ROSTER_STREAM)?;
    let state = MatchState::new(home.clone(), away.clone()).context("Invalid roster")?;
    info!(%seed, home = %home.name, away = %away.name, "play ball");

    let mut plays = Vec::new();
    let mut feed = EventFeed::default();
    let mut orchestrator = MatchOrchestrator::new(heuristic::collaborators(seed), rules)
        .with_retry_policy(retry);
    let outcome = orchestrator.run_match(state, |state: &MatchState| {
        feed.flush(state);
        plays.extend(StepRecord::capture(state));
    });
    let (state, failure) = match outcome {
        Ok(state) => (state, None),
        Err(MatchAborted { state, source }) => {
            error!(%source, "match abandoned");
            (*state, Some(source))
        }
    };
    feed.flush(&state);

    let record = MatchRecord {
        recorded_at: chrono::Utc::now(),
        seed,
        rules,
        retry,
        home,
        away,
        home_score: state.home_score(),
        away_score: state.away_score(),
        winner: state.winner(),
        status: state.status(),
        failure: failure.as_ref().map(ToString::to_string),
        plays,
        events: state.events().to_vec(),
    };
    Output::save_json(&record, arg.output.clone())?;

    match failure {
        Some(source) => Err(anyhow::Error::new(source).context("Match abandoned")),
        None => Ok(()),
    }
}

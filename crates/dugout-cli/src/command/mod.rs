use clap::{Parser, Subcommand};

use crate::logging::{self, LogFormat};

use self::{generate_roster::GenerateRosterArg, play::PlayArg};

mod generate_roster;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); `DUGOUT_LOG` overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Human, global = true)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a full match with the built-in collaborators
    Play(#[clap(flatten)] PlayArg),
    /// Generate a random team roster
    GenerateRoster(#[clap(flatten)] GenerateRosterArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.log_format, args.verbose);
    match args.mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::GenerateRoster(arg) => generate_roster::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_arguments() {
        let args = CommandArgs::try_parse_from([
            "dugout",
            "-vv",
            "play",
            "--innings",
            "7",
            "--walk-off",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Mode::Play(_)));
    }

    #[test]
    fn test_reject_bad_seed() {
        let result = CommandArgs::try_parse_from(["dugout", "play", "--seed", "xyz"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_zero_innings() {
        let result = CommandArgs::try_parse_from(["dugout", "play", "--innings", "0"]);
        assert!(result.is_err());
        let result = CommandArgs::try_parse_from(["dugout", "play", "--innings", "1"]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory as _;
        CommandArgs::command().debug_assert();
    }
}

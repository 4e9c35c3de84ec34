//! Log setup for the binary.
//!
//! Library crates only emit `tracing` events; this installs the subscriber that prints
//! them to stderr, so stdout stays free for the JSON match record.

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DUGOUT_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Human,
    /// Newline-delimited JSON
    Json,
}

fn directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber. `DUGOUT_LOG` takes precedence over `verbosity`.
pub fn init(format: LogFormat, verbosity: u8) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(directive(verbosity)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr);

    // A second install (in tests) fails and is ignored.
    let _ = match format {
        LogFormat::Human => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_saturates_at_trace() {
        assert_eq!(directive(0), "warn");
        assert_eq!(directive(1), "info");
        assert_eq!(directive(2), "debug");
        assert_eq!(directive(3), "trace");
        assert_eq!(directive(9), "trace");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(LogFormat::Human, 0);
        init(LogFormat::Json, 3);
    }
}

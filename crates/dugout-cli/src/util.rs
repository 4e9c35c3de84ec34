use std::{
    fs::File,
    io::{self, BufReader, BufWriter, StdoutLock, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use dugout_engine::TeamSheet;

/// Where a JSON document goes: a file when a path is given, stdout otherwise.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Output::File {
                    writer: BufWriter::new(file),
                    path,
                }
            }
            None => Output::Stdout(io::stdout().lock()),
        };
        output.write_json(value)
    }

    fn display_path(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Output::Stdout(writer) => writer,
            Output::File { writer, .. } => writer,
        }
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let target = self.display_path();
        let writer = self.writer();
        serde_json::to_writer_pretty(&mut *writer, value)
            .with_context(|| format!("Failed to write JSON to {target}"))?;
        writeln!(writer).with_context(|| format!("Failed to write newline to {target}"))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {target}"))?;
        Ok(())
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Read a team roster from a JSON file
pub fn read_roster_file<P>(path: P) -> anyhow::Result<TeamSheet>
where
    P: AsRef<Path>,
{
    read_json_file("roster", path)
}

#[cfg(test)]
mod tests {
    use dugout_engine::{Participant, Role};

    use super::*;

    #[test]
    fn test_roster_file_round_trip() {
        let sheet = TeamSheet {
            name: "Lions".to_owned(),
            players: vec![Participant::new("Ace", Role::Pitcher, 70, 60, 50).into()],
        };
        let path = std::env::temp_dir().join(format!("dugout-roster-{}.json", std::process::id()));
        Output::save_json(&sheet, Some(path.clone())).unwrap();
        let loaded = read_roster_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, sheet);
    }

    #[test]
    fn test_missing_roster_file_names_path() {
        let err = read_roster_file("/nonexistent/dugout/roster.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dugout/roster.json"));
    }
}

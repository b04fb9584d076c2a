// Game-log loading: play-by-play CSV exports into raw rows, one file per
// team.

use std::io::Read;
use std::path::Path;

use tracing::info;
use ultiscore_core::event::RawRow;
use ultiscore_core::pipeline::TeamInput;

use crate::config::Config;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum GameLogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Read every record of a game-log export, keyed by header.
///
/// Rows shorter than the header simply lack the trailing columns; whether
/// that matters is decided when the rows are parsed into events.
pub fn load_rows_from_reader<R: Read>(rdr: R) -> Result<Vec<RawRow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers = reader.headers()?.clone();
    reader
        .records()
        .map(|record| -> Result<RawRow, csv::Error> {
            let record = record?;
            Ok(headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect())
        })
        .collect()
}

/// Load a game-log CSV file.
pub fn load_game_log(path: &Path) -> Result<Vec<RawRow>, GameLogError> {
    let file = std::fs::File::open(path).map_err(|e| GameLogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let rows = load_rows_from_reader(file).map_err(|e| GameLogError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load every configured team's game log, resolving paths against
/// `base_dir`.
pub fn load_team_inputs(config: &Config, base_dir: &Path) -> Result<Vec<TeamInput>, GameLogError> {
    config
        .teams
        .iter()
        .map(|team| {
            let rows = load_game_log(&base_dir.join(&team.game_log))?;
            Ok(TeamInput {
                name: team.name.trim().to_string(),
                rows,
                selector: team.selector(),
                squad: team.squad_plan(),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ultiscore_core::event::{parse_rows, Action, RowError};

    const HEADER: &str = "Date/Time,Tournamemnt,Opponent,Line,Event Type,Action,Passer,Receiver,Defender,Player 0,Player 1,Player 2,Player 3,Player 4,Player 5,Player 6";

    #[test]
    fn rows_keyed_by_header() {
        let csv_data = format!(
            "{HEADER}\n\
2025-03-01 09:00,Cowbell,Tigers,O,Offense,Goal,Ann,Bea,,Ann,Bea,Cat,,,,\n"
        );
        let rows = load_rows_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Action"], "Goal");
        assert_eq!(rows[0]["Player 2"], "Cat");
        assert_eq!(rows[0]["Player 6"], "");
        assert_eq!(rows[0]["Line"], "O");
    }

    #[test]
    fn parsed_rows_become_events() {
        let csv_data = format!(
            "{HEADER}\n\
2025-03-01 09:00,Cowbell,Tigers,D,Defense,D,,,Cat,Ann,Bea,Cat,,,,\n"
        );
        let rows = load_rows_from_reader(csv_data.as_bytes()).unwrap();
        let events = parse_rows(&rows).unwrap();
        assert_eq!(events[0].action, Action::Defense);
        assert_eq!(events[0].defender, "Cat");
    }

    #[test]
    fn short_row_is_malformed_event() {
        let csv_data = format!(
            "{HEADER}\n\
2025-03-01 09:00,Cowbell,Tigers,O,Offense,Goal,Ann,Bea,,Ann,Bea\n"
        );
        let rows = load_rows_from_reader(csv_data.as_bytes()).unwrap();
        assert!(matches!(
            parse_rows(&rows),
            Err(RowError::MissingField { row: 0, .. })
        ));
    }

    #[test]
    fn empty_log_has_no_rows() {
        assert!(load_rows_from_reader(HEADER.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_game_log(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, GameLogError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}

// Play-by-play event rows: the string-keyed records of a game-log export and
// their typed form.

use std::collections::HashMap;

use thiserror::Error;

/// One record of a game-log export, keyed by column header.
pub type RawRow = HashMap<String, String>;

/// Number of on-field player columns read from each row.
pub const PLAYER_SLOTS: usize = 7;

pub const ACTION: &str = "Action";
pub const PASSER: &str = "Passer";
pub const RECEIVER: &str = "Receiver";
pub const DEFENDER: &str = "Defender";
/// The export misspells this header; `Tournament` is accepted as well.
pub const TOURNAMENT: &str = "Tournamemnt";
pub const TOURNAMENT_FALLBACK: &str = "Tournament";
pub const OPPONENT: &str = "Opponent";

/// Placeholder the export uses for players it could not identify.
pub const ANONYMOUS: &str = "Anonymous";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row {row}: missing required field `{field}`")]
    MissingField { row: usize, field: String },
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// What happened on a play. Only four kinds move the counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Goal,
    /// A defensive play ("D").
    Defense,
    Throwaway,
    Drop,
    Other(String),
}

impl Action {
    /// Parse an export action label. Matching is exact.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Goal" => Action::Goal,
            "D" => Action::Defense,
            "Throwaway" => Action::Throwaway,
            "Drop" => Action::Drop,
            other => Action::Other(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// EventRow
// ---------------------------------------------------------------------------

/// A single play with every field the scoring engine reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub action: Action,
    pub passer: String,
    pub receiver: String,
    pub defender: String,
    pub tournament: String,
    pub opponent: String,
    pub players: [String; PLAYER_SLOTS],
}

impl EventRow {
    /// Build a typed row from a raw record. `index` is only used to point at
    /// the offending row when a column is missing.
    pub fn from_raw(index: usize, raw: &RawRow) -> Result<Self, RowError> {
        let field = |name: &str| -> Result<String, RowError> {
            raw.get(name).cloned().ok_or_else(|| RowError::MissingField {
                row: index,
                field: name.to_string(),
            })
        };

        let tournament = raw
            .get(TOURNAMENT)
            .or_else(|| raw.get(TOURNAMENT_FALLBACK))
            .map(|t| t.trim().to_string())
            .ok_or_else(|| RowError::MissingField {
                row: index,
                field: TOURNAMENT.to_string(),
            })?;

        let mut players: [String; PLAYER_SLOTS] = Default::default();
        for (slot, player) in players.iter_mut().enumerate() {
            *player = field(&player_column(slot))?;
        }

        Ok(EventRow {
            action: Action::from_label(&field(ACTION)?),
            passer: field(PASSER)?,
            receiver: field(RECEIVER)?,
            defender: field(DEFENDER)?,
            tournament,
            opponent: field(OPPONENT)?,
            players,
        })
    }

    /// Names in the on-field slots, blanks skipped.
    pub fn on_field(&self) -> impl Iterator<Item = &str> {
        self.players
            .iter()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}

/// Header of the `slot`-th on-field player column.
pub fn player_column(slot: usize) -> String {
    format!("Player {slot}")
}

/// Convert every raw record, stopping at the first malformed one.
pub fn parse_rows(raw: &[RawRow]) -> Result<Vec<EventRow>, RowError> {
    raw.iter()
        .enumerate()
        .map(|(i, row)| EventRow::from_raw(i, row))
        .collect()
}

/// Blank names and the anonymous placeholder are never credited with stats.
pub fn is_anonymous(name: &str) -> bool {
    let name = name.trim();
    name.is_empty() || name.eq_ignore_ascii_case(ANONYMOUS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

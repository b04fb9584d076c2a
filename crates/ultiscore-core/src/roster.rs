// Roster extraction: every distinct name seen on the field for one team.

use std::collections::BTreeSet;

use crate::event::EventRow;

/// The known players of one team. Built once from the game log and never
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: BTreeSet<String>,
}

impl Roster {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Roster {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut names: BTreeSet<String> = iter.into_iter().map(Into::into).collect();
        names.remove("");
        Roster { names }
    }
}

/// Collect the distinct names from the on-field slots of every row. The
/// empty name is never a roster entry.
pub fn extract_roster(rows: &[EventRow]) -> Roster {
    rows.iter()
        .flat_map(|row| row.players.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::row;

    #[test]
    fn distinct_names_across_rows() {
        let rows = vec![
            row("Catch", "A", "B", "", "Cow", "Z", &["A", "B", "C"]),
            row("Goal", "B", "C", "", "Cow", "Z", &["C", "B", "D"]),
        ];
        let roster = extract_roster(&rows);
        assert_eq!(roster.iter().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn blank_slots_are_not_players() {
        let rows = vec![row("Catch", "", "", "", "Cow", "Z", &["A"])];
        let roster = extract_roster(&rows);
        assert_eq!(roster.len(), 1);
        assert!(!roster.contains(""));
    }

    #[test]
    fn thrower_outside_slots_is_not_a_player() {
        let rows = vec![row("Goal", "Ghost", "A", "", "Cow", "Z", &["A"])];
        assert!(!extract_roster(&rows).contains("Ghost"));
    }

    #[test]
    fn no_rows_empty_roster() {
        assert!(extract_roster(&[]).is_empty());
    }
}

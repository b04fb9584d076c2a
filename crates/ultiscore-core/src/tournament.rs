// Tournament discovery, selection and row filtering.
//
// Selection is a capability: given the tournaments found in a team's game
// log, a `TournamentSelector` returns the ones to keep. The filter itself
// only ever sees exact names.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::event::EventRow;

/// Sorted, distinct, non-empty tournament names appearing in `rows`.
pub fn collect_tournaments(rows: &[EventRow]) -> Vec<String> {
    rows.iter()
        .map(|row| row.tournament.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Keep the rows whose tournament is in `retain`, preserving order.
///
/// An empty `retain` means no filtering was requested and every row is
/// returned.
pub fn filter_by_tournaments(rows: &[EventRow], retain: &[String]) -> Vec<EventRow> {
    if retain.is_empty() {
        return rows.to_vec();
    }
    let retain: BTreeSet<&str> = retain.iter().map(|t| t.trim()).collect();
    rows.iter()
        .filter(|row| retain.contains(row.tournament.trim()))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Outcome of a tournament selection for one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// No filtering: every row counts.
    All,
    /// Only rows from these exact tournament names count.
    Only(Vec<String>),
    /// The team has none of the wanted tournaments and is left out.
    Skip,
}

impl Selection {
    /// The retain-set handed to `filter_by_tournaments`.
    pub fn retain_set(&self) -> &[String] {
        match self {
            Selection::Only(names) => names,
            Selection::All | Selection::Skip => &[],
        }
    }
}

/// Chooses which of a team's tournaments feed its statistics, given the
/// tournament names found in its game log.
pub trait TournamentSelector {
    fn select(&self, team: &str, candidates: &[String]) -> Selection;
}

/// Keep every tournament.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllTournaments;

impl TournamentSelector for AllTournaments {
    fn select(&self, _team: &str, _candidates: &[String]) -> Selection {
        Selection::All
    }
}

/// Keep an explicit list of tournament names. Names missing from the game
/// log are ignored; if none remain, every tournament is kept.
#[derive(Debug, Clone, Default)]
pub struct NamedTournaments(pub Vec<String>);

impl TournamentSelector for NamedTournaments {
    fn select(&self, team: &str, candidates: &[String]) -> Selection {
        let mut chosen = Vec::new();
        for name in &self.0 {
            let name = name.trim();
            if candidates.iter().any(|c| c == name) {
                chosen.push(name.to_string());
            } else {
                warn!("{team}: tournament '{name}' not found in game log, ignoring");
            }
        }
        if chosen.is_empty() {
            if !self.0.is_empty() {
                warn!("{team}: no valid tournaments selected, including all tournaments");
            }
            return Selection::All;
        }
        Selection::Only(chosen)
    }
}

/// Keep every tournament whose name contains `needle`, ignoring case. A team
/// with no matching tournament is skipped.
#[derive(Debug, Clone)]
pub struct MatchingTournaments {
    pub needle: String,
}

impl MatchingTournaments {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }
}

impl TournamentSelector for MatchingTournaments {
    fn select(&self, team: &str, candidates: &[String]) -> Selection {
        let needle = self.needle.to_lowercase();
        let chosen: Vec<String> = candidates
            .iter()
            .filter(|c| c.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        debug!(
            "{team}: {} of {} tournaments match '{}'",
            chosen.len(),
            candidates.len(),
            self.needle
        );
        if chosen.is_empty() {
            warn!(
                "{team}: no tournament containing '{}' (available: {})",
                self.needle,
                candidates.join(", ")
            );
            return Selection::Skip;
        }
        Selection::Only(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::row;

    fn sample_rows() -> Vec<EventRow> {
        vec![
            row("Catch", "A", "B", "", "Cowbell", "Z", &["A", "B"]),
            row("Catch", "A", "B", "", "Sectionals", "Y", &["A", "B"]),
            row("Goal", "A", "B", "", "Cowbell", "X", &["A", "B"]),
            row("Catch", "A", "B", "", "", "W", &["A", "B"]),
            row("Goal", "B", "A", "", "alabamacowbell", "V", &["A", "B"]),
        ]
    }

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn collect_is_sorted_and_distinct() {
        assert_eq!(
            collect_tournaments(&sample_rows()),
            names(&["Cowbell", "Sectionals", "alabamacowbell"])
        );
    }

    #[test]
    fn empty_retain_returns_input_unchanged() {
        let rows = sample_rows();
        assert_eq!(filter_by_tournaments(&rows, &[]), rows);
    }

    #[test]
    fn filter_keeps_order_and_exact_matches() {
        let rows = sample_rows();
        let kept = filter_by_tournaments(&rows, &names(&["Cowbell"]));
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].opponent, "Z");
        assert_eq!(kept[1].opponent, "X");
    }

    #[test]
    fn filter_is_case_sensitive_but_trims() {
        let rows = sample_rows();
        assert!(filter_by_tournaments(&rows, &names(&["cowbell"])).is_empty());
        assert_eq!(filter_by_tournaments(&rows, &names(&[" Cowbell "])).len(), 2);
    }

    #[test]
    fn all_selector_keeps_everything() {
        let selection = AllTournaments.select("T", &names(&["A", "B"]));
        assert_eq!(selection, Selection::All);
        assert!(selection.retain_set().is_empty());
    }

    #[test]
    fn named_selector_drops_unknown_names() {
        let candidates = names(&["Cowbell", "Sectionals"]);
        let selector = NamedTournaments(names(&["Sectionals", "Regionals"]));
        assert_eq!(
            selector.select("T", &candidates),
            Selection::Only(names(&["Sectionals"]))
        );
    }

    #[test]
    fn named_selector_with_no_valid_names_selects_all() {
        let selector = NamedTournaments(names(&["Regionals"]));
        assert_eq!(selector.select("T", &names(&["Cowbell"])), Selection::All);
        assert_eq!(NamedTournaments::default().select("T", &[]), Selection::All);
    }

    #[test]
    fn matching_selector_is_case_insensitive_substring() {
        let candidates = collect_tournaments(&sample_rows());
        let selector = MatchingTournaments::new("COW");
        let selection = selector.select("T", &candidates);
        assert_eq!(selection, Selection::Only(names(&["Cowbell", "alabamacowbell"])));
        assert_eq!(selection.retain_set().len(), 2);
    }

    #[test]
    fn matching_selector_skips_team_without_match() {
        let selector = MatchingTournaments::new("cow");
        assert_eq!(
            selector.select("T", &names(&["Sectionals"])),
            Selection::Skip
        );
    }
}

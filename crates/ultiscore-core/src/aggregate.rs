// Per-player stat accumulation over a team's play-by-play rows.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::{is_anonymous, Action, EventRow};
use crate::roster::Roster;
use crate::scoring::{Counts, Scores};

/// Tournament name → distinct opponents faced there.
pub type TournamentLog = BTreeMap<String, BTreeSet<String>>;

/// Player name → statistics, for one team.
pub type TeamStats = BTreeMap<String, PlayerStats>;

/// Team name → players, across every team in a pricing batch.
pub type League = BTreeMap<String, TeamStats>;

/// Everything tracked for one player of one team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub assists: u32,
    pub goals: u32,
    /// Defensive plays.
    pub ds: u32,
    pub turnovers: u32,
    /// Older exports of this record used the misspelled key.
    #[serde(alias = "tournamemnts")]
    pub tournaments: TournamentLog,
    pub games_played: u32,
    /// Set by hand for players who may miss the next tournament.
    pub questionable: bool,
    pub scores: Scores,
    pub price: u32,
}

impl PlayerStats {
    /// The four raw counts the role scores are computed from.
    pub fn counts(&self) -> Counts {
        Counts {
            assists: self.assists,
            goals: self.goals,
            ds: self.ds,
            turnovers: self.turnovers,
        }
    }
}

/// Games played: distinct opponents summed over every tournament.
pub fn games_played(tournaments: &TournamentLog) -> u32 {
    tournaments.values().map(|opponents| opponents.len() as u32).sum()
}

/// Fold `rows` into a fresh record for every roster player.
///
/// Only roster players are credited; anonymous or blank passers, receivers
/// and defenders are skipped. Every roster player on the field for a row
/// records that row's opponent under its tournament.
pub fn aggregate(roster: &Roster, rows: &[EventRow]) -> TeamStats {
    let mut team: TeamStats = roster
        .iter()
        .map(|name| (name.to_string(), PlayerStats::default()))
        .collect();

    for row in rows {
        match row.action {
            Action::Goal => {
                credit(&mut team, &row.passer, |p| p.assists += 1);
                credit(&mut team, &row.receiver, |p| p.goals += 1);
            }
            Action::Defense => credit(&mut team, &row.defender, |p| p.ds += 1),
            Action::Throwaway => credit(&mut team, &row.passer, |p| p.turnovers += 1),
            Action::Drop => credit(&mut team, &row.receiver, |p| p.turnovers += 1),
            Action::Other(_) => {}
        }

        for name in row.on_field() {
            if let Some(player) = team.get_mut(name) {
                player
                    .tournaments
                    .entry(row.tournament.clone())
                    .or_default()
                    .insert(row.opponent.clone());
            }
        }
    }

    for player in team.values_mut() {
        player.games_played = games_played(&player.tournaments);
    }

    debug!("aggregated {} rows into {} players", rows.len(), team.len());
    team
}

fn credit(team: &mut TeamStats, name: &str, bump: impl FnOnce(&mut PlayerStats)) {
    if is_anonymous(name) {
        return;
    }
    if let Some(player) = team.get_mut(name) {
        bump(player);
    }
}

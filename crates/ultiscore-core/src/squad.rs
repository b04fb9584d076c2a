// Squad management: narrowing a team to the players expected at the next
// tournament, adding players the game log never saw, and flagging possible
// absences.

use tracing::{info, warn};

use crate::aggregate::{PlayerStats, TeamStats};

/// Roster changes for one team, applied after aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SquadPlan {
    /// Players attending. Empty keeps everyone.
    pub keep: Vec<String>,
    /// New players, given all-zero records.
    pub add: Vec<String>,
    /// Players flagged as questionable. Replaces any earlier flags.
    pub questionable: Vec<String>,
    /// Drop players with no recorded games in the selected tournaments.
    pub drop_inactive: bool,
}

/// What `apply_squad` actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SquadReport {
    pub removed: Vec<String>,
    pub added: Vec<String>,
    pub flagged: Vec<String>,
    /// Names in the plan that matched nothing or were already present.
    pub ignored: Vec<String>,
}

impl SquadPlan {
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty()
            && self.add.is_empty()
            && self.questionable.is_empty()
            && !self.drop_inactive
    }
}

pub fn apply_squad(team_name: &str, team: &mut TeamStats, plan: &SquadPlan) -> SquadReport {
    let mut report = SquadReport::default();

    if plan.drop_inactive {
        team.retain(|name, player| {
            let active = player.games_played > 0;
            if !active {
                report.removed.push(name.clone());
            }
            active
        });
    }

    if !plan.keep.is_empty() {
        let mut kept = Vec::new();
        for name in &plan.keep {
            let name = name.trim();
            if team.contains_key(name) {
                kept.push(name.to_string());
            } else {
                warn!("{team_name}: cannot keep unknown player '{name}'");
                report.ignored.push(name.to_string());
            }
        }
        if kept.is_empty() {
            warn!("{team_name}: no valid players selected, keeping all players");
        } else {
            team.retain(|name, _| {
                let keep = kept.contains(name);
                if !keep {
                    report.removed.push(name.clone());
                }
                keep
            });
        }
    }

    for name in &plan.add {
        let name = name.trim();
        if name.is_empty() || team.contains_key(name) {
            report.ignored.push(name.to_string());
            continue;
        }
        team.insert(name.to_string(), PlayerStats::default());
        report.added.push(name.to_string());
    }

    if !plan.questionable.is_empty() {
        for player in team.values_mut() {
            player.questionable = false;
        }
        for name in &plan.questionable {
            let name = name.trim();
            match team.get_mut(name) {
                Some(player) => {
                    player.questionable = true;
                    report.flagged.push(name.to_string());
                }
                None => {
                    warn!("{team_name}: cannot flag unknown player '{name}'");
                    report.ignored.push(name.to_string());
                }
            }
        }
    }

    if !plan.is_empty() {
        info!(
            "{team_name}: squad of {} ({} removed, {} added, {} questionable)",
            team.len(),
            report.removed.len(),
            report.added.len(),
            report.flagged.len()
        );
    }
    report
}

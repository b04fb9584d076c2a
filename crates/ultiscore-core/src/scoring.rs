// Role scores: fixed linear weightings of the four raw counts.

use serde::{Deserialize, Serialize};

use crate::aggregate::{League, TeamStats};

/// The raw counts every role score is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Counts {
    pub assists: u32,
    pub goals: u32,
    pub ds: u32,
    pub turnovers: u32,
}

/// One playing-style valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreKind {
    Captain,
    Handler,
    Cutter,
    Defender,
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 4] = [
        ScoreKind::Captain,
        ScoreKind::Handler,
        ScoreKind::Cutter,
        ScoreKind::Defender,
    ];

    /// Serialized key of this score.
    pub fn key(self) -> &'static str {
        match self {
            ScoreKind::Captain => "captain_score",
            ScoreKind::Handler => "handler_score",
            ScoreKind::Cutter => "cutter_score",
            ScoreKind::Defender => "defender_score",
        }
    }

    pub fn weights(self) -> Weights {
        match self {
            ScoreKind::Captain => CAPTAIN,
            ScoreKind::Handler => HANDLER,
            ScoreKind::Cutter => CUTTER,
            ScoreKind::Defender => DEFENDER,
        }
    }
}

/// Per-count multipliers. Turnovers subtract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    pub assists: i64,
    pub goals: i64,
    pub ds: i64,
    pub turnovers: i64,
}

pub const CAPTAIN: Weights = Weights {
    assists: 3,
    goals: 3,
    ds: 9,
    turnovers: 3,
};

pub const HANDLER: Weights = Weights {
    assists: 3,
    goals: 1,
    ds: 3,
    turnovers: 1,
};

pub const CUTTER: Weights = Weights {
    assists: 1,
    goals: 3,
    ds: 3,
    turnovers: 1,
};

pub const DEFENDER: Weights = Weights {
    assists: 1,
    goals: 1,
    ds: 9,
    turnovers: 1,
};

impl Weights {
    pub fn apply(&self, counts: &Counts) -> i64 {
        self.assists * i64::from(counts.assists)
            + self.goals * i64::from(counts.goals)
            + self.ds * i64::from(counts.ds)
            - self.turnovers * i64::from(counts.turnovers)
    }
}

/// The four role scores of a player. All zero until scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub captain_score: i64,
    pub handler_score: i64,
    pub cutter_score: i64,
    pub defender_score: i64,
}

impl Scores {
    pub fn get(&self, kind: ScoreKind) -> i64 {
        match kind {
            ScoreKind::Captain => self.captain_score,
            ScoreKind::Handler => self.handler_score,
            ScoreKind::Cutter => self.cutter_score,
            ScoreKind::Defender => self.defender_score,
        }
    }
}

/// Compute all four role scores from raw counts.
pub fn score(counts: &Counts) -> Scores {
    Scores {
        captain_score: CAPTAIN.apply(counts),
        handler_score: HANDLER.apply(counts),
        cutter_score: CUTTER.apply(counts),
        defender_score: DEFENDER.apply(counts),
    }
}

/// Overwrite every player's scores from its current counts.
pub fn apply_scores(team: &mut TeamStats) {
    for player in team.values_mut() {
        player.scores = score(&player.counts());
    }
}

pub fn apply_league_scores(league: &mut League) {
    league.values_mut().for_each(apply_scores);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::PlayerStats;

    fn counts(assists: u32, goals: u32, ds: u32, turnovers: u32) -> Counts {
        Counts {
            assists,
            goals,
            ds,
            turnovers,
        }
    }

    #[test]
    fn zero_counts_zero_scores() {
        assert_eq!(score(&Counts::default()), Scores::default());
    }

    #[test]
    fn single_stat_weights() {
        assert_eq!(
            score(&counts(1, 0, 0, 0)),
            Scores {
                captain_score: 3,
                handler_score: 3,
                cutter_score: 1,
                defender_score: 1
            }
        );
        assert_eq!(
            score(&counts(0, 1, 0, 0)),
            Scores {
                captain_score: 3,
                handler_score: 1,
                cutter_score: 3,
                defender_score: 1
            }
        );
        assert_eq!(
            score(&counts(0, 0, 1, 0)),
            Scores {
                captain_score: 9,
                handler_score: 3,
                cutter_score: 3,
                defender_score: 9
            }
        );
        assert_eq!(
            score(&counts(0, 0, 0, 1)),
            Scores {
                captain_score: -3,
                handler_score: -1,
                cutter_score: -1,
                defender_score: -1
            }
        );
    }

    #[test]
    fn mixed_counts() {
        let s = score(&counts(4, 2, 3, 5));
        assert_eq!(s.captain_score, 12 + 6 + 27 - 15);
        assert_eq!(s.handler_score, 12 + 2 + 9 - 5);
        assert_eq!(s.cutter_score, 4 + 6 + 9 - 5);
        assert_eq!(s.defender_score, 4 + 2 + 27 - 5);
    }

    #[test]
    fn high_turnover_player_goes_negative() {
        let s = score(&counts(0, 1, 0, 6));
        assert_eq!(s.captain_score, -15);
        assert!(ScoreKind::ALL.iter().all(|&k| s.get(k) < 0));
    }

    #[test]
    fn identical_counts_identical_scores() {
        let mut team = TeamStats::new();
        for name in ["A", "B"] {
            team.insert(
                name.into(),
                PlayerStats {
                    assists: 2,
                    goals: 3,
                    ds: 1,
                    turnovers: 4,
                    ..Default::default()
                },
            );
        }
        apply_scores(&mut team);
        assert_eq!(team["A"].scores, team["B"].scores);
        assert_eq!(team["A"].scores.get(ScoreKind::Captain), 6 + 9 + 9 - 12);
    }

    #[test]
    fn league_scoring_covers_every_team() {
        let mut league = League::new();
        for team in ["A", "B"] {
            let mut roster = TeamStats::new();
            roster.insert(
                "p".into(),
                PlayerStats {
                    ds: 1,
                    ..Default::default()
                },
            );
            league.insert(team.into(), roster);
        }
        apply_league_scores(&mut league);
        assert!(league.values().all(|t| t["p"].scores.captain_score == 9));
    }

    #[test]
    fn weights_table_matches_keys() {
        let keys: Vec<_> = ScoreKind::ALL.iter().map(|k| k.key()).collect();
        assert_eq!(
            keys,
            vec!["captain_score", "handler_score", "cutter_score", "defender_score"]
        );
        assert_eq!(ScoreKind::Defender.weights(), DEFENDER);
    }
}

// End-to-end scoring of a batch of teams.
//
// Each team goes through parse → roster → tournament selection → aggregate
// → squad → scores on its own. Prices are set once every team is scored,
// since they are normalized over the whole batch.

use thiserror::Error;
use tracing::{info, warn};

use crate::aggregate::{aggregate, League, TeamStats};
use crate::event::{parse_rows, RawRow, RowError};
use crate::pricing::{apply_prices, DegeneratePolicy, PriceOutcome, PricingError};
use crate::roster::extract_roster;
use crate::scoring::apply_scores;
use crate::squad::{apply_squad, SquadPlan};
use crate::tournament::{
    collect_tournaments, filter_by_tournaments, AllTournaments, Selection, TournamentSelector,
};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("team '{team}': {source}")]
    MalformedInput { team: String, source: RowError },

    #[error("team '{0}' appears more than once in the batch")]
    DuplicateTeam(String),

    /// Scores are computed but prices could not be set. The scored league is
    /// returned with the error.
    #[error("{source}")]
    Pricing {
        source: PricingError,
        league: Box<League>,
    },
}

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// One team's game log together with how to select and trim it.
pub struct TeamInput {
    pub name: String,
    pub rows: Vec<RawRow>,
    pub selector: Box<dyn TournamentSelector>,
    pub squad: SquadPlan,
}

impl TeamInput {
    /// A team using every tournament and no squad changes.
    pub fn new(name: impl Into<String>, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.into(),
            rows,
            selector: Box::new(AllTournaments),
            squad: SquadPlan::default(),
        }
    }

    pub fn with_selector(mut self, selector: impl TournamentSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn with_squad(mut self, squad: SquadPlan) -> Self {
        self.squad = squad;
        self
    }
}

/// A fully scored and priced batch.
#[derive(Debug, Clone)]
pub struct LeagueReport {
    pub league: League,
    /// Teams left out because none of their tournaments were selected.
    pub skipped: Vec<String>,
    pub pricing: PriceOutcome,
}

// ---------------------------------------------------------------------------
// Pipeline entry points
// ---------------------------------------------------------------------------

/// Score one team. Returns `Ok(None)` when its selector skips it.
pub fn score_team(input: &TeamInput) -> Result<Option<TeamStats>, RowError> {
    let rows = parse_rows(&input.rows)?;
    let roster = extract_roster(&rows);

    let tournaments = collect_tournaments(&rows);
    let selection = input.selector.select(&input.name, &tournaments);
    if selection == Selection::Skip {
        return Ok(None);
    }
    let selected = filter_by_tournaments(&rows, selection.retain_set());

    let mut stats = aggregate(&roster, &selected);
    apply_squad(&input.name, &mut stats, &input.squad);
    apply_scores(&mut stats);

    info!(
        "{}: {} players from {} of {} rows",
        input.name,
        stats.len(),
        selected.len(),
        rows.len()
    );
    Ok(Some(stats))
}

/// Score every team, then price the whole batch.
pub fn score_league(
    inputs: &[TeamInput],
    policy: DegeneratePolicy,
) -> Result<LeagueReport, PipelineError> {
    let mut league = League::new();
    let mut skipped = Vec::new();

    for input in inputs {
        if league.contains_key(&input.name) || skipped.contains(&input.name) {
            return Err(PipelineError::DuplicateTeam(input.name.clone()));
        }
        let scored = score_team(input).map_err(|source| PipelineError::MalformedInput {
            team: input.name.clone(),
            source,
        })?;
        match scored {
            Some(stats) => {
                league.insert(input.name.clone(), stats);
            }
            None => {
                warn!("{}: skipped, no selected tournaments", input.name);
                skipped.push(input.name.clone());
            }
        }
    }

    match apply_prices(&mut league, policy) {
        Ok(pricing) => Ok(LeagueReport {
            league,
            skipped,
            pricing,
        }),
        Err(source) => Err(PipelineError::Pricing {
            source,
            league: Box::new(league),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

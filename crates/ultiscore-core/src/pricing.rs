// Draft prices: min-max scaling of captain scores onto a fixed price band.
//
// Normalization is global: every player of every team in the batch shares
// one min and one max, so prices can only be set once all teams are scored.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::aggregate::League;

pub const MIN_PRICE: u32 = 3;
pub const MAX_PRICE: u32 = 25;
pub const MIDPOINT_PRICE: u32 = (MIN_PRICE + MAX_PRICE) / 2;

// ---------------------------------------------------------------------------
// Error and outcome types
// ---------------------------------------------------------------------------

/// Why a batch cannot be min-max scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Degeneracy {
    #[error("no players to price")]
    NoPlayers,
    #[error("every captain score is {0}")]
    IdenticalScores(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("cannot scale prices: {0}")]
    Degenerate(Degeneracy),
}

/// What to do with a degenerate batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Price every player at the bottom of the band.
    #[default]
    Floor,
    /// Price every player at the middle of the band.
    Midpoint,
    /// Leave prices at zero and report the batch as an error.
    Fail,
}

impl DegeneratePolicy {
    fn fallback_price(self) -> Option<u32> {
        match self {
            DegeneratePolicy::Floor => Some(MIN_PRICE),
            DegeneratePolicy::Midpoint => Some(MIDPOINT_PRICE),
            DegeneratePolicy::Fail => None,
        }
    }
}

/// How prices were assigned for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceOutcome {
    Scaled { min: i64, max: i64 },
    Fallback { price: u32, cause: Degeneracy },
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Map one captain score into the price band given the batch extremes.
///
/// `price = round(3 + 22 * (score - min) / (max - min))`, ties rounding to
/// the even integer. Callers must guarantee `min < max`.
pub fn scale_price(score: i64, min: i64, max: i64) -> u32 {
    let span = (max - min) as f64;
    let band = f64::from(MAX_PRICE - MIN_PRICE);
    let raw = f64::from(MIN_PRICE) + band * (score - min) as f64 / span;
    raw.round_ties_even() as u32
}

/// Price table keyed by captain score. Players sharing a score share a
/// price.
pub fn price_table(scores: &[i64]) -> Result<BTreeMap<i64, u32>, Degeneracy> {
    let (Some(&min), Some(&max)) = (scores.iter().min(), scores.iter().max()) else {
        return Err(Degeneracy::NoPlayers);
    };
    if min == max {
        return Err(Degeneracy::IdenticalScores(min));
    }
    Ok(scores
        .iter()
        .map(|&score| (score, scale_price(score, min, max)))
        .collect())
}

/// Set every player's price from its captain score.
///
/// Prices are reset to zero first. A degenerate batch is priced by
/// `policy`; under `DegeneratePolicy::Fail` prices stay zero and the
/// condition comes back as an error.
pub fn apply_prices(
    league: &mut League,
    policy: DegeneratePolicy,
) -> Result<PriceOutcome, PricingError> {
    let mut scores = Vec::new();
    for player in league.values_mut().flat_map(|team| team.values_mut()) {
        player.price = 0;
        scores.push(player.scores.captain_score);
    }

    match price_table(&scores) {
        Ok(table) => {
            for player in league.values_mut().flat_map(|team| team.values_mut()) {
                if let Some(&price) = table.get(&player.scores.captain_score) {
                    player.price = price;
                }
            }
            let min = *table.keys().next().unwrap_or(&0);
            let max = *table.keys().next_back().unwrap_or(&0);
            info!("priced {} players (captain scores {min}..={max})", scores.len());
            Ok(PriceOutcome::Scaled { min, max })
        }
        Err(cause) => {
            let Some(price) = policy.fallback_price() else {
                warn!("pricing failed: {cause}");
                return Err(PricingError::Degenerate(cause));
            };
            warn!("{cause}; pricing every player at {price}");
            for player in league.values_mut().flat_map(|team| team.values_mut()) {
                player.price = price;
            }
            Ok(PriceOutcome::Fallback { price, cause })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

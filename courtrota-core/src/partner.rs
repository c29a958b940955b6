/// Partner matching: split the active players of a round into doubles teams.
///
/// Exhaustive backtracking over every partition of the players into pairs,
/// scored by how often each pair has already been teammates. A pair that has
/// played together `c` times costs `c³`, so one pair repeating twice is worse
/// than two pairs repeating once.
use std::collections::HashMap;

use crate::constants::{DEFAULT_RATING, PARTNER_RATING_WEIGHT};
use crate::error::{Result, SchedulerError};
use crate::search::min_cost_pairing;
use crate::types::{CostTable, Team};

/// Best partition found by the search.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerSolution {
    pub teams: Vec<Team>,
    /// `Σ count³` over the chosen pairs, plus the rating term in ranked mode.
    pub cost: f64,
}

/// Pair every active player with exactly one partner.
///
/// `ratings` switches on ranked mode: teammates with close ratings are
/// preferred, and the search no longer stops at the first zero-cost
/// partition. Players missing from `ratings` count as [`DEFAULT_RATING`].
pub fn match_partners(
    active: &[String],
    partnerships: &CostTable,
    ratings: Option<&HashMap<String, f64>>,
) -> Result<PartnerSolution> {
    let n = active.len();
    if n % 2 != 0 {
        return Err(SchedulerError::NoFeasiblePartition { count: n });
    }

    let ranked_ratings: Option<Vec<f64>> = ratings.map(|r| {
        active
            .iter()
            .map(|id| r.get(id).copied().unwrap_or(DEFAULT_RATING))
            .collect()
    });

    let cost: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    let repeats = partnerships.get(&active[i], &active[j]) as f64;
                    let mut pair_cost = repeats * repeats * repeats;
                    if let Some(r) = &ranked_ratings {
                        pair_cost += (r[i] - r[j]).abs() * PARTNER_RATING_WEIGHT;
                    }
                    pair_cost
                })
                .collect()
        })
        .collect();

    // Unranked, nothing beats a partition with no repeated partners.
    let stop_at_zero = ranked_ratings.is_none();
    let (pairs, total) = min_cost_pairing(&cost, stop_at_zero)
        .ok_or(SchedulerError::NoFeasiblePartition { count: n })?;

    let teams = pairs
        .into_iter()
        .map(|(i, j)| Team::pair(&active[i], &active[j]))
        .collect();

    Ok(PartnerSolution { teams, cost: total })
}

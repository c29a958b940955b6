/// Opponent scheduling: put this round's doubles teams against each other.
///
/// Every way of grouping the teams two at a time is considered. A grouping
/// costs the squared number of times each cross-court pair of players has
/// already faced each other; ranked mode adds a heavier penalty for matches
/// whose team-average ratings are far apart.
use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::constants::{DEFAULT_RATING, OPPONENT_BALANCE_WEIGHT, RATING_GAP_SCALE};
use crate::error::{Result, SchedulerError};
use crate::search::min_cost_pairing;
use crate::types::{CostTable, Match, Team};

/// Squared opponent repetition between two teams.
pub fn repetition_cost(a: &Team, b: &Team, opponents: &CostTable) -> f64 {
    let mut total = 0.0;
    for p in a.members() {
        for q in b.members() {
            let seen = opponents.get(p, q) as f64;
            total += seen * seen;
        }
    }
    total
}

/// Mean rating of a team's members.
pub fn team_rating(team: &Team, ratings: &HashMap<String, f64>) -> f64 {
    let members = team.members();
    if members.is_empty() {
        return DEFAULT_RATING;
    }
    let sum: f64 = members
        .iter()
        .map(|id| ratings.get(id).copied().unwrap_or(DEFAULT_RATING))
        .sum();
    sum / members.len() as f64
}

/// Ranked-mode imbalance penalty for one match.
pub fn balance_cost(a: &Team, b: &Team, ratings: &HashMap<String, f64>) -> f64 {
    let gap = (team_rating(a, ratings) - team_rating(b, ratings)).abs() / RATING_GAP_SCALE;
    OPPONENT_BALANCE_WEIGHT * gap * gap
}

/// Group `teams` into matches, then shuffle which match lands on which court.
///
/// Fails with [`SchedulerError::NoFeasiblePartition`] for an odd team count.
/// The grouping itself is deterministic; only the court order uses `rng`.
pub fn schedule_opponents(
    teams: &[Team],
    opponents: &CostTable,
    ratings: &HashMap<String, f64>,
    ranked: bool,
    rng: &mut impl Rng,
) -> Result<Vec<Match>> {
    let n = teams.len();
    if n % 2 != 0 {
        return Err(SchedulerError::NoFeasiblePartition { count: n });
    }

    let cost: Vec<Vec<f64>> = teams
        .iter()
        .map(|a| {
            teams
                .iter()
                .map(|b| {
                    let mut match_cost = repetition_cost(a, b, opponents);
                    if ranked {
                        match_cost += balance_cost(a, b, ratings);
                    }
                    match_cost
                })
                .collect()
        })
        .collect();

    let (groups, total) = min_cost_pairing(&cost, !ranked)
        .ok_or(SchedulerError::NoFeasiblePartition { count: n })?;
    log::debug!("opponent grouping: {} matches, cost {total}", groups.len());

    let mut matches: Vec<Match> = groups
        .into_iter()
        .map(|(i, j)| Match::new(teams[i].clone(), teams[j].clone()))
        .collect();
    matches.shuffle(rng);

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn roster(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn players_of(matches: &[Match]) -> Vec<String> {
        let mut all: Vec<String> = matches.iter().flat_map(|m| m.participants().cloned()).collect();
        all.sort();
        all
    }

    #[test]
    fn test_preserves_players_and_keeps_pairs_intact() {
        let teams = vec![
            Team::pair("a", "b"),
            Team::pair("c", "d"),
            Team::pair("e", "f"),
            Team::pair("g", "h"),
        ];
        let table = CostTable::for_roster(&roster(&["a", "b", "c", "d", "e", "f", "g", "h"]));
        let mut rng = StdRng::seed_from_u64(7);

        let matches = schedule_opponents(&teams, &table, &HashMap::new(), false, &mut rng).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(players_of(&matches), roster(&["a", "b", "c", "d", "e", "f", "g", "h"]));
        for m in &matches {
            assert!(teams.contains(&m.team_a));
            assert!(teams.contains(&m.team_b));
        }
    }

    #[test]
    fn test_avoids_previous_opponents() {
        let teams = vec![
            Team::pair("a", "b"),
            Team::pair("c", "d"),
            Team::pair("e", "f"),
            Team::pair("g", "h"),
        ];
        let mut table = CostTable::default();
        // a/b already faced c/d.
        for p in ["a", "b"] {
            for q in ["c", "d"] {
                table.increment(p, q);
            }
        }
        let mut rng = StdRng::seed_from_u64(1);

        let matches = schedule_opponents(&teams, &table, &HashMap::new(), false, &mut rng).unwrap();
        for m in &matches {
            assert_eq!(repetition_cost(&m.team_a, &m.team_b, &table), 0.0);
        }
    }

    #[test]
    fn test_ranked_balances_team_ratings() {
        let teams = vec![
            Team::pair("strong1", "strong2"),
            Team::pair("weak1", "weak2"),
            Team::pair("strong3", "weak3"),
            Team::pair("strong4", "weak4"),
        ];
        let mut ratings = HashMap::new();
        for id in ["strong1", "strong2", "strong3", "strong4"] {
            ratings.insert(id.to_string(), 1400.0);
        }
        for id in ["weak1", "weak2", "weak3", "weak4"] {
            ratings.insert(id.to_string(), 600.0);
        }
        let mut rng = StdRng::seed_from_u64(3);

        let matches =
            schedule_opponents(&teams, &CostTable::default(), &ratings, true, &mut rng).unwrap();
        // Strong pair vs weak pair is lopsided; the two mixed pairs are even. The
        // alternatives (strong vs mixed, weak vs mixed) each have a 400 gap: 2 * 5 * 16 = 160
        // against 5 * 64 = 320 for the lopsided grouping.
        for m in &matches {
            let gap = (team_rating(&m.team_a, &ratings) - team_rating(&m.team_b, &ratings)).abs();
            assert!((gap - 400.0).abs() < 1e-9, "unexpected gap {gap}");
        }
    }

    #[test]
    fn test_balance_cost_formula() {
        let mut ratings = HashMap::new();
        ratings.insert("a".to_string(), 1200.0);
        ratings.insert("b".to_string(), 1000.0);
        ratings.insert("c".to_string(), 1000.0);
        ratings.insert("d".to_string(), 1000.0);
        // averages 1100 vs 1000 -> gap 1.0 -> 5 * 1 = 5
        let cost = balance_cost(&Team::pair("a", "b"), &Team::pair("c", "d"), &ratings);
        assert!((cost - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_same_court_order() {
        let teams: Vec<Team> = (0..6)
            .map(|i| Team::pair(&format!("p{}", 2 * i), &format!("p{}", 2 * i + 1)))
            .collect();
        let table = CostTable::default();

        let first = schedule_opponents(
            &teams,
            &table,
            &HashMap::new(),
            false,
            &mut StdRng::seed_from_u64(42),
        )
        .unwrap();
        let second = schedule_opponents(
            &teams,
            &table,
            &HashMap::new(),
            false,
            &mut StdRng::seed_from_u64(42),
        )
        .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_odd_team_count_is_infeasible() {
        let teams = vec![Team::pair("a", "b"), Team::pair("c", "d"), Team::pair("e", "f")];
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            schedule_opponents(&teams, &CostTable::default(), &HashMap::new(), false, &mut rng),
            Err(SchedulerError::NoFeasiblePartition { count: 3 })
        );
    }
}

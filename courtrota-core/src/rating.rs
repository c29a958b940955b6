/// Per-player statistics and ratings, rebuilt from the full match history.
///
/// Nothing here is incremental: every call to [`recompute`] starts from an
/// empty table and replays all completed matches, so entering, correcting or
/// clearing a score can never leave stale totals behind.
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::constants::{DEFAULT_RATING, MAX_RATING, MIN_RATING, POINT_DIFF_WEIGHT, WIN_RATE_WEIGHT};
use crate::types::Match;

/// Aggregate record for one roster entry (player or fixed team).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    pub player: String,
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub point_diff: i64,
    pub rating: f64,
}

impl PlayerStats {
    pub fn new(player: &str) -> Self {
        PlayerStats {
            player: player.to_string(),
            games_played: 0,
            games_won: 0,
            games_lost: 0,
            points_for: 0,
            points_against: 0,
            point_diff: 0,
            rating: DEFAULT_RATING,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.games_played += 1;
        self.points_for += scored as u64;
        self.points_against += conceded as u64;
        self.point_diff += scored as i64 - conceded as i64;
        match scored.cmp(&conceded) {
            Ordering::Greater => self.games_won += 1,
            Ordering::Less => self.games_lost += 1,
            Ordering::Equal => {}
        }
    }
}

/// `clamp(1000 + winRate * 400 + avgPointDiff * 10, 500, 1500)`.
///
/// A player without games keeps [`DEFAULT_RATING`].
pub fn rating_for(games_played: u32, games_won: u32, point_diff: i64) -> f64 {
    if games_played == 0 {
        return DEFAULT_RATING;
    }
    let games = games_played as f64;
    let win_rate = games_won as f64 / games;
    let avg_point_diff = point_diff as f64 / games;
    (DEFAULT_RATING + win_rate * WIN_RATE_WEIGHT + avg_point_diff * POINT_DIFF_WEIGHT)
        .clamp(MIN_RATING, MAX_RATING)
}

/// Sort order for a ranking table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingOrder {
    /// Rating, then point differential, then points scored (ranked doubles).
    Rating,
    /// Wins, then point differential, then points scored (team scoreboard).
    Wins,
}

/// One line of a ranking table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingRow {
    /// 1-based position.
    pub rank: usize,
    pub player: String,
    pub rating: f64,
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u64,
    pub points_against: u64,
    pub point_diff: i64,
}

/// Stats for every roster entry, in roster order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Standings {
    stats: Vec<PlayerStats>,
    index: HashMap<String, usize>,
}

impl Standings {
    /// Everyone on `roster` at zero games and the default rating.
    pub fn empty(roster: &[String]) -> Self {
        let mut standings = Standings::default();
        for id in roster {
            standings.slot(id);
        }
        standings
    }

    fn slot(&mut self, id: &str) -> &mut PlayerStats {
        let idx = match self.index.get(id) {
            Some(&idx) => idx,
            None => {
                self.stats.push(PlayerStats::new(id));
                self.index.insert(id.to_string(), self.stats.len() - 1);
                self.stats.len() - 1
            }
        };
        &mut self.stats[idx]
    }

    pub fn get(&self, id: &str) -> Option<&PlayerStats> {
        self.index.get(id).map(|&idx| &self.stats[idx])
    }

    /// Current rating, or the default for unknown entries.
    pub fn rating(&self, id: &str) -> f64 {
        self.get(id).map_or(DEFAULT_RATING, |s| s.rating)
    }

    /// Rating lookup table for the solvers.
    pub fn ratings(&self) -> HashMap<String, f64> {
        self.stats.iter().map(|s| (s.player.clone(), s.rating)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerStats> {
        self.stats.iter()
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Ranked table, ties kept in roster order.
    pub fn ranking(&self, order: RankingOrder) -> Vec<RankingRow> {
        let mut sorted: Vec<&PlayerStats> = self.stats.iter().collect();
        sorted.sort_by(|a, b| {
            let primary = match order {
                RankingOrder::Rating => b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal),
                RankingOrder::Wins => b.games_won.cmp(&a.games_won),
            };
            primary
                .then_with(|| b.point_diff.cmp(&a.point_diff))
                .then_with(|| b.points_for.cmp(&a.points_for))
        });

        sorted
            .into_iter()
            .enumerate()
            .map(|(i, s)| RankingRow {
                rank: i + 1,
                player: s.player.clone(),
                rating: s.rating,
                games: s.games_played,
                wins: s.games_won,
                losses: s.games_lost,
                points_for: s.points_for,
                points_against: s.points_against,
                point_diff: s.point_diff,
            })
            .collect()
    }
}

/// Rebuild every entry's stats and rating from the completed matches.
///
/// Blank matches (no score on either side) are skipped; a missing score on
/// one side counts as zero. Entries found in matches but not on `roster` are
/// appended after the roster.
pub fn recompute<'a>(roster: &[String], matches: impl IntoIterator<Item = &'a Match>) -> Standings {
    let mut standings = Standings::empty(roster);
    let mut counted = 0usize;

    for m in matches {
        let Some((score_a, score_b)) = m.final_score() else {
            continue;
        };
        counted += 1;
        for id in m.team_a.members() {
            standings.slot(id).record(score_a, score_b);
        }
        for id in m.team_b.members() {
            standings.slot(id).record(score_b, score_a);
        }
    }

    for stats in &mut standings.stats {
        stats.rating = rating_for(stats.games_played, stats.games_won, stats.point_diff);
    }

    if standings.len() > roster.len() {
        log::warn!(
            "{} entries in match history are not on the roster",
            standings.len() - roster.len()
        );
    }
    log::debug!("recomputed ratings from {counted} completed matches");
    standings
}

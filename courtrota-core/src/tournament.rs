/// Tournament session: roster, schedule, cost tables and standings.
///
/// One `Tournament` value owns all mutable state for one event. Rounds are
/// computed in full before anything is committed, so a failed or degraded
/// round never leaves the cost tables or the sit-out queue half updated.
use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::constants::{DEFAULT_MAX_COURTS, PLAYERS_PER_COURT, TEAMS_PER_COURT};
use crate::error::{Result, SchedulerError};
use crate::opponent::schedule_opponents;
use crate::partner::match_partners;
use crate::rating::{RankingOrder, RankingRow, Standings, recompute};
use crate::rotation::SitOutQueue;
use crate::round_robin;
use crate::types::{CostTable, Match, Mode, Round, Side};

/// Settings fixed at tournament start.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TournamentConfig {
    pub mode: Mode,
    pub courts: usize,
    /// Balance ratings when pairing (rotating doubles only).
    pub ranked: bool,
    /// Seed for court-order shuffles. Round `i` uses `seed + i`.
    pub seed: u64,
    /// Requested court counts above this are clamped.
    pub max_courts: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            mode: Mode::RotatingDoubles,
            courts: 2,
            ranked: false,
            seed: 0,
            max_courts: DEFAULT_MAX_COURTS,
        }
    }
}

/// Everything needed to restore a tournament: settings, roster and the
/// realized rounds including entered scores.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TournamentRecord {
    pub config: TournamentConfig,
    pub roster: Vec<String>,
    pub rounds: Vec<Round>,
}

/// Parse a score as typed by a user.
///
/// Blank input is "not entered" (`None`). Anything else that is not a
/// non-negative integer is recorded as 0 and logged.
pub fn parse_score(text: &str) -> Option<u32> {
    try_parse_score(text).unwrap_or_else(|e| {
        log::warn!("{e}, using 0");
        Some(0)
    })
}

/// Strict variant of [`parse_score`]: malformed text is an error.
pub fn try_parse_score(text: &str) -> Result<Option<u32>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| SchedulerError::MalformedScore(trimmed.to_string()))
}

/// Trim entries, drop blank lines and reject duplicates.
pub fn normalize_roster<S: AsRef<str>>(entries: &[S]) -> Result<Vec<String>> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut roster = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = entry.as_ref().trim();
        if id.is_empty() {
            continue;
        }
        if !seen.insert(id.to_string()) {
            return Err(SchedulerError::DuplicateIdentifier(id.to_string()));
        }
        roster.push(id.to_string());
    }
    Ok(roster)
}

#[derive(Debug, Clone)]
pub struct Tournament {
    config: TournamentConfig,
    roster: Vec<String>,
    rounds: Vec<Round>,
    partnerships: CostTable,
    opponents: CostTable,
    sit_queue: SitOutQueue,
    standings: Standings,
}

impl Tournament {
    /// Validate the roster and settings and start a tournament.
    ///
    /// Fixed-team mode builds its whole schedule here; rotating doubles
    /// starts with no rounds.
    pub fn new<S: AsRef<str>>(config: TournamentConfig, entries: &[S]) -> Result<Self> {
        let roster = normalize_roster(entries)?;
        let mut config = config;

        if config.courts == 0 {
            return Err(SchedulerError::InvalidCourtCount(0));
        }
        let max_courts = config.max_courts.max(1);
        if config.courts > max_courts {
            log::warn!("{} courts requested, clamping to {max_courts}", config.courts);
            config.courts = max_courts;
        }

        let required = match config.mode {
            Mode::RotatingDoubles => PLAYERS_PER_COURT,
            Mode::FixedTeam => TEAMS_PER_COURT,
        };
        if roster.len() < required {
            return Err(SchedulerError::InsufficientRoster {
                mode: config.mode,
                required,
                found: roster.len(),
            });
        }

        if config.ranked && config.mode == Mode::FixedTeam {
            log::warn!("ranked pairing only applies to rotating doubles, ignoring");
            config.ranked = false;
        }

        Ok(Self::fresh(config, roster))
    }

    fn fresh(config: TournamentConfig, roster: Vec<String>) -> Self {
        let mut tournament = Tournament {
            partnerships: CostTable::for_roster(&roster),
            opponents: CostTable::for_roster(&roster),
            sit_queue: SitOutQueue::new(&roster),
            standings: Standings::empty(&roster),
            rounds: Vec::new(),
            config,
            roster,
        };

        if tournament.config.mode == Mode::FixedTeam {
            let rounds = round_robin::schedule(&tournament.roster, tournament.config.courts);
            for round in &rounds {
                record_costs(&mut tournament.partnerships, &mut tournament.opponents, &round.matches);
            }
            tournament.rounds = rounds;
        }
        tournament
    }

    /// Restore a tournament from a record, rebuilding derived state.
    pub fn from_record(record: TournamentRecord) -> Result<Self> {
        let mut tournament = Tournament::new(record.config, &record.roster)?;
        let known: HashSet<&String> = tournament.roster.iter().collect();

        for round in &record.rounds {
            let stranger = round
                .matches
                .iter()
                .flat_map(|m| m.participants())
                .chain(&round.sitting_out)
                .find(|id| !known.contains(id));
            if let Some(id) = stranger {
                return Err(SchedulerError::InvalidRecord(format!(
                    "round {} mentions {id:?}, who is not on the roster",
                    round.index + 1
                )));
            }
        }

        tournament.partnerships = CostTable::for_roster(&tournament.roster);
        tournament.opponents = CostTable::for_roster(&tournament.roster);
        tournament.sit_queue = SitOutQueue::new(&tournament.roster);
        tournament.rounds = record.rounds;

        for (index, round) in tournament.rounds.iter_mut().enumerate() {
            round.index = index;
            record_costs(&mut tournament.partnerships, &mut tournament.opponents, &round.matches);
            // Degraded rounds never rotated the queue.
            if tournament.config.mode == Mode::RotatingDoubles && !round.is_empty() {
                tournament.sit_queue.requeue(&round.sitting_out);
            }
        }
        tournament.refresh_standings();

        log::info!("restored tournament with {} rounds", tournament.rounds.len());
        Ok(tournament)
    }

    pub fn to_record(&self) -> TournamentRecord {
        TournamentRecord {
            config: self.config.clone(),
            roster: self.roster.clone(),
            rounds: self.rounds.clone(),
        }
    }

    /// Drop every round and score, keeping roster and settings.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        let roster = std::mem::take(&mut self.roster);
        *self = Self::fresh(config, roster);
        log::info!("tournament reset");
    }

    /// Players on court per round: the largest multiple of four that fits
    /// both the courts and the roster.
    pub fn active_count(&self) -> usize {
        let slots = (self.config.courts * PLAYERS_PER_COURT).min(self.roster.len());
        slots - slots % PLAYERS_PER_COURT
    }

    pub fn sit_count(&self) -> usize {
        self.roster.len() - self.active_count()
    }

    /// Generate the next rotating-doubles round.
    ///
    /// If either solver fails the round is still added, with no matches, and
    /// the queue and cost tables are left as they were.
    pub fn generate_round(&mut self) -> Result<&Round> {
        if self.config.mode == Mode::FixedTeam {
            return Err(SchedulerError::FixedSchedule);
        }

        let index = self.rounds.len();
        let (sitters, next_queue) = self.sit_queue.peek(self.sit_count(), &self.roster);
        let active: Vec<String> = self
            .roster
            .iter()
            .filter(|id| !sitters.contains(id))
            .cloned()
            .collect();

        let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(index as u64));
        let ratings = self.standings.ratings();
        let ranked = self.config.ranked;

        let outcome = match_partners(&active, &self.partnerships, ranked.then_some(&ratings))
            .and_then(|solution| {
                schedule_opponents(&solution.teams, &self.opponents, &ratings, ranked, &mut rng)
            });

        self.commit_round(sitters, next_queue, outcome);
        Ok(&self.rounds[index])
    }

    /// Append a generated round. Queue and cost tables only advance when the
    /// solvers succeeded; a failed round is kept with no matches.
    fn commit_round(&mut self, sitters: Vec<String>, next_queue: SitOutQueue, outcome: Result<Vec<Match>>) {
        let index = self.rounds.len();
        let matches = match outcome {
            Ok(matches) => {
                self.sit_queue.commit(next_queue);
                record_costs(&mut self.partnerships, &mut self.opponents, &matches);
                matches
            }
            Err(e) => {
                log::error!("round {}: {e}; leaving the round empty", index + 1);
                Vec::new()
            }
        };

        log::info!(
            "round {}: {} matches, {} sitting out",
            index + 1,
            matches.len(),
            sitters.len()
        );
        self.rounds.push(Round {
            index,
            matches,
            sitting_out: sitters,
        });
    }

    /// Set (or with `None`, clear) one side's score and refresh the standings.
    pub fn enter_score(
        &mut self,
        round: usize,
        court: usize,
        side: Side,
        score: Option<u32>,
    ) -> Result<()> {
        self.match_mut(round, court)?.set_score(side, score);
        self.refresh_standings();
        Ok(())
    }

    /// [`enter_score`](Self::enter_score) with text input, see [`parse_score`].
    pub fn enter_score_text(&mut self, round: usize, court: usize, side: Side, text: &str) -> Result<()> {
        self.enter_score(round, court, side, parse_score(text))
    }

    /// Blank both sides of a match, removing it from the standings.
    pub fn clear_score(&mut self, round: usize, court: usize) -> Result<()> {
        let m = self.match_mut(round, court)?;
        m.score_a = None;
        m.score_b = None;
        self.refresh_standings();
        Ok(())
    }

    fn match_mut(&mut self, round: usize, court: usize) -> Result<&mut Match> {
        self.rounds
            .get_mut(round)
            .and_then(|r| r.matches.get_mut(court))
            .ok_or(SchedulerError::UnknownCourt { round, court })
    }

    fn refresh_standings(&mut self) {
        let history = self.rounds.iter().flat_map(|r| &r.matches);
        self.standings = recompute(&self.roster, history);
    }

    /// Ranking table: by rating for rotating doubles, by wins for fixed teams.
    pub fn ranking_table(&self) -> Vec<RankingRow> {
        let order = match self.config.mode {
            Mode::RotatingDoubles => RankingOrder::Rating,
            Mode::FixedTeam => RankingOrder::Wins,
        };
        self.standings.ranking(order)
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    pub fn partnerships(&self) -> &CostTable {
        &self.partnerships
    }

    pub fn opponents(&self) -> &CostTable {
        &self.opponents
    }

    /// Sit-out order, next to sit first.
    pub fn sit_queue(&self) -> Vec<String> {
        self.sit_queue.as_vec()
    }
}

/// Count teammates and cross-court opponents of every match.
fn record_costs(partnerships: &mut CostTable, opponents: &mut CostTable, matches: &[Match]) {
    for m in matches {
        for team in [&m.team_a, &m.team_b] {
            let members = team.members();
            for (i, a) in members.iter().enumerate() {
                for b in &members[i + 1..] {
                    partnerships.increment(a, b);
                }
            }
        }
        for p in m.team_a.members() {
            for q in m.team_b.members() {
                opponents.increment(p, q);
            }
        }
    }
}

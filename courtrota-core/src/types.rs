use std::collections::HashMap;
use std::fmt;

/// Tournament format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Mode {
    /// Fixed teams, full round robin generated up front.
    FixedTeam,
    /// "Americano": partners and opponents change every round.
    #[default]
    RotatingDoubles,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::FixedTeam => write!(f, "fixed-team"),
            Mode::RotatingDoubles => write!(f, "rotating-doubles"),
        }
    }
}

/// Order-independent key for two roster entries.
///
/// The lexicographically smaller identifier is always stored first, so
/// `PairKey::new(a, b) == PairKey::new(b, a)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(String, String);

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            PairKey(a.to_string(), b.to_string())
        } else {
            PairKey(b.to_string(), a.to_string())
        }
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }
}

/// How many times each pair of entries has been teammates (or opponents).
///
/// Counts only ever go up; a fresh table is built on tournament reset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostTable {
    counts: HashMap<PairKey, u32>,
}

impl CostTable {
    /// Table with a zero entry for every pair drawn from `roster`.
    pub fn for_roster(roster: &[String]) -> Self {
        let mut counts = HashMap::with_capacity(roster.len() * roster.len() / 2);
        for (i, a) in roster.iter().enumerate() {
            for b in &roster[i + 1..] {
                counts.insert(PairKey::new(a, b), 0);
            }
        }
        CostTable { counts }
    }

    /// Count for a pair; pairs never seen count as zero.
    pub fn get(&self, a: &str, b: &str) -> u32 {
        self.counts.get(&PairKey::new(a, b)).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, a: &str, b: &str) {
        *self.counts.entry(PairKey::new(a, b)).or_insert(0) += 1;
    }

    /// Sum of every count in the table.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// One side of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    /// Two players thrown together for one round (rotating doubles).
    Pair([String; 2]),
    /// A named team that stays together all tournament (fixed-team).
    Single(String),
}

impl Team {
    pub fn pair(a: &str, b: &str) -> Self {
        Team::Pair([a.to_string(), b.to_string()])
    }

    pub fn single(name: &str) -> Self {
        Team::Single(name.to_string())
    }

    /// Roster entries that accrue stats when this team plays.
    pub fn members(&self) -> &[String] {
        match self {
            Team::Pair(players) => players,
            Team::Single(name) => std::slice::from_ref(name),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members().iter().any(|m| m == id)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Pair([a, b]) => write!(f, "{a} & {b}"),
            Team::Single(name) => write!(f, "{name}"),
        }
    }
}

/// Which side of a match a score belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

/// Two opposing teams and whatever scores have been entered so far.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    pub team_a: Team,
    pub team_b: Team,
    /// `None` until a score is entered for that side.
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
}

impl Match {
    pub fn new(team_a: Team, team_b: Team) -> Self {
        Match {
            team_a,
            team_b,
            score_a: None,
            score_b: None,
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    pub fn set_score(&mut self, side: Side, score: Option<u32>) {
        match side {
            Side::A => self.score_a = score,
            Side::B => self.score_b = score,
        }
    }

    /// At least one side has a score. An entirely blank match has not been played.
    pub fn is_completed(&self) -> bool {
        self.score_a.is_some() || self.score_b.is_some()
    }

    /// Final score with a blank side read as zero, or `None` for a blank match.
    pub fn final_score(&self) -> Option<(u32, u32)> {
        if !self.is_completed() {
            return None;
        }
        Some((self.score_a.unwrap_or(0), self.score_b.unwrap_or(0)))
    }

    /// Every roster entry on court, side A first.
    pub fn participants(&self) -> impl Iterator<Item = &String> {
        self.team_a.members().iter().chain(self.team_b.members())
    }
}

/// One physical round: matches indexed by court, plus who sits out.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round {
    /// Zero-based round number.
    pub index: usize,
    pub matches: Vec<Match>,
    pub sitting_out: Vec<String>,
}

impl Round {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn court(&self, court: usize) -> Option<&Match> {
        self.matches.get(court)
    }
}

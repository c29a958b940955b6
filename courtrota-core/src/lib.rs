/// courtrota-core: Fair-rotation scheduling for racket-sport social play.
///
/// Roster in → rounds of court assignments out, with partners, opponents and
/// sit-outs spread as evenly as possible. No IO, no clock, no filesystem.
///
/// Two formats are supported: rotating doubles, where each round pairs players
/// into fresh doubles teams, and fixed teams playing a full round robin.
/// Entries are identified by caller-provided names; the solvers map them to
/// array indices internally.
///
/// # Quick start
///
/// ```rust
/// use courtrota_core::{Side, Tournament, TournamentConfig};
///
/// let roster = ["Ana", "Ben", "Cai", "Dee", "Eli", "Fay", "Gus", "Hal", "Ivy"];
/// let mut tournament = Tournament::new(TournamentConfig::default(), &roster).unwrap();
///
/// let round = tournament.generate_round().unwrap();
/// assert_eq!(round.matches.len(), 2);
/// assert_eq!(round.sitting_out, vec!["Ana".to_string()]);
///
/// tournament.enter_score(0, 0, Side::A, Some(11)).unwrap();
/// tournament.enter_score(0, 0, Side::B, Some(7)).unwrap();
///
/// for row in tournament.ranking_table() {
///     println!("{}. {} {:.0}", row.rank, row.player, row.rating);
/// }
/// ```

pub mod constants;
pub mod error;
pub mod opponent;
pub mod partner;
pub mod rating;
pub mod rotation;
pub mod round_robin;
mod search;
pub mod tournament;
pub mod types;

// Re-export primary public API at crate root.
pub use error::{Result, SchedulerError};
pub use opponent::schedule_opponents;
pub use partner::{match_partners, PartnerSolution};
pub use rating::{rating_for, recompute, PlayerStats, RankingOrder, RankingRow, Standings};
pub use rotation::{next_sit_outs, SitOutQueue};
pub use round_robin::circle_pairings;
pub use tournament::{
    normalize_roster, parse_score, try_parse_score, Tournament, TournamentConfig,
    TournamentRecord,
};
pub use types::{CostTable, Match, Mode, PairKey, Round, Side, Team};

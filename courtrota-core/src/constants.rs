/// Rating assigned to every player before they have a completed game.
pub const DEFAULT_RATING: f64 = 1000.0;

/// Ratings are clamped into `[MIN_RATING, MAX_RATING]` after every recomputation.
pub const MIN_RATING: f64 = 500.0;
pub const MAX_RATING: f64 = 1500.0;

/// Rating points gained per unit of win rate (a perfect record adds 400).
pub const WIN_RATE_WEIGHT: f64 = 400.0;

/// Rating points gained per point of average score differential.
pub const POINT_DIFF_WEIGHT: f64 = 10.0;

/// Ranked mode: partner cost added per rating point between two teammates.
pub const PARTNER_RATING_WEIGHT: f64 = 0.1;

/// Ranked mode: multiplier on the squared team-average rating gap of a match.
pub const OPPONENT_BALANCE_WEIGHT: f64 = 5.0;

/// Rating gap that counts as one unit of imbalance before squaring.
pub const RATING_GAP_SCALE: f64 = 100.0;

/// Players needed to fill one doubles court.
pub const PLAYERS_PER_COURT: usize = 4;

/// Teams needed to fill one court in fixed-team mode.
pub const TEAMS_PER_COURT: usize = 2;

/// Upper bound applied to the requested court count.
/// Partner and opponent searches are exponential in the players on court.
pub const DEFAULT_MAX_COURTS: usize = 6;

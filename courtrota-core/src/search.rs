//! Minimum-cost perfect matching by exhaustive backtracking.
//!
//! Shared by the partner solver (players into teams) and the opponent solver
//! (teams into matches). Both are the same problem on a symmetric cost matrix:
//! split `0..n` into couples so that the summed cost of the couples is as low
//! as possible.
//!
//! Search order is canonical: the lowest unused index is always coupled next,
//! trying partners in ascending index order, so every partition is visited at
//! most once and ties resolve to the first partition in that order.

use std::collections::HashMap;

/// Internal indexed couple (positions in the caller's list).
pub(crate) type IndexedPair = (usize, usize);

/// Best partition and its total cost.
pub(crate) type Partition = (Vec<IndexedPair>, f64);

/// Used entries are tracked as a bitmask.
const MAX_ENTRIES: usize = 64;

/// Bounded subtrees within this much of the best cost count as ties.
const BOUND_SLACK: f64 = 1e-9;

/// Find the cheapest way to split `0..cost.len()` into couples.
///
/// `cost[i][j]` is the cost of coupling `i` with `j`; costs must be
/// non-negative. With `stop_at_zero` the search ends at the first zero-cost
/// partition. Returns `None` for an odd count or more than 64 entries.
pub(crate) fn min_cost_pairing(cost: &[Vec<f64>], stop_at_zero: bool) -> Option<Partition> {
    let n = cost.len();
    if n % 2 != 0 {
        return None;
    }
    if n > MAX_ENTRIES {
        log::error!("pairing search: {n} entries exceeds the limit of {MAX_ENTRIES}");
        return None;
    }

    let mut search = PairingSearch::new(cost, stop_at_zero);
    let mut chosen = Vec::with_capacity(n / 2);
    let best = search.descend(0, &mut chosen, 0.0, None);

    if let Some((_, best_cost)) = &best {
        log::debug!(
            "pairing search: {n} entries, {} nodes, {} floors, best cost {best_cost}",
            search.nodes,
            search.floors.len()
        );
    }
    best
}

struct PairingSearch<'a> {
    cost: &'a [Vec<f64>],
    stop_at_zero: bool,
    /// Mask with every entry used.
    full: u64,
    /// Each row's other entries, cheapest first.
    by_cost: Vec<Vec<usize>>,
    /// Proven lower bounds on the cheapest completion, keyed by used mask.
    floors: HashMap<u64, f64>,
    nodes: usize,
}

impl<'a> PairingSearch<'a> {
    fn new(cost: &'a [Vec<f64>], stop_at_zero: bool) -> Self {
        let n = cost.len();
        let by_cost = (0..n)
            .map(|i| {
                let mut others: Vec<usize> = (0..n).filter(|&j| j != i).collect();
                others.sort_by(|&a, &b| cost[i][a].total_cmp(&cost[i][b]));
                others
            })
            .collect();
        let full = if n == MAX_ENTRIES { u64::MAX } else { (1u64 << n) - 1 };

        PairingSearch {
            cost,
            stop_at_zero,
            full,
            by_cost,
            floors: HashMap::new(),
            nodes: 0,
        }
    }

    /// Lower bound on the cost of coupling every entry not in `used`.
    ///
    /// Every remaining entry pays at least half its cheapest coupling with
    /// another remaining entry; a bound proven by an earlier visit may be higher.
    fn floor(&self, used: u64) -> f64 {
        if used == self.full {
            return 0.0;
        }
        let mut halves = 0.0;
        for i in 0..self.cost.len() {
            if used & (1 << i) != 0 {
                continue;
            }
            if let Some(&j) = self.by_cost[i].iter().find(|&&j| used & (1 << j) == 0) {
                halves += self.cost[i][j];
            }
        }
        let proven = self.floors.get(&used).copied().unwrap_or(0.0);
        (halves / 2.0).max(proven)
    }

    /// Extend `chosen` to full partitions, returning the best one seen.
    ///
    /// `best` is the best complete partition found before this call; the
    /// return value is the best after exploring this subtree.
    fn descend(
        &mut self,
        used: u64,
        chosen: &mut Vec<IndexedPair>,
        partial: f64,
        best: Option<Partition>,
    ) -> Option<Partition> {
        self.nodes += 1;

        if used == self.full {
            return match best {
                Some((pairs, cost)) if cost <= partial => Some((pairs, cost)),
                _ => Some((chosen.clone(), partial)),
            };
        }

        let first = (!used).trailing_zeros() as usize;
        let mut best = best;

        for second in first + 1..self.cost.len() {
            if used & (1 << second) != 0 {
                continue;
            }

            let candidate = partial + self.cost[first][second];
            let next = used | (1 << first) | (1 << second);
            if let Some((_, best_cost)) = &best {
                if candidate >= *best_cost
                    || candidate + self.floor(next) >= *best_cost - BOUND_SLACK {
                    continue;
                }
            }

            chosen.push((first, second));
            best = self.descend(next, chosen, candidate, best);
            chosen.pop();

            if self.stop_at_zero && matches!(&best, Some((_, c)) if *c == 0.0) {
                break;
            }
        }

        // Nothing below `used` completes for less than best - partial.
        if let Some((_, best_cost)) = &best {
            let proven = best_cost - partial;
            let floor = self.floors.entry(used).or_insert(proven);
            if proven > *floor {
                *floor = proven;
            }
        }
        best
    }
}

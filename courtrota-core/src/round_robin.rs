/// Fixed-team round robin via the circle method.
///
/// Every unordered pair of teams meets exactly once. The logical rounds of the
/// circle method are flattened into one match list and then packed into
/// physical rounds limited by the number of courts.
use crate::search::IndexedPair;
use crate::types::{Match, Round, Team};

/// Logical rounds of the circle method for `n` teams, as index pairs.
///
/// An odd `n` gets a bye slot; pairs touching the bye are left out, so each
/// logical round then has one team resting. For even `n` there are `n - 1`
/// rounds and each is a perfect matching.
pub fn circle_pairings(n: usize) -> Vec<Vec<(usize, usize)>> {
    if n < 2 {
        return Vec::new();
    }

    // None is the bye.
    let mut slots: Vec<Option<usize>> = (0..n).map(Some).collect();
    if n % 2 != 0 {
        slots.push(None);
    }
    let size = slots.len();

    let mut rounds = Vec::with_capacity(size - 1);
    for _ in 0..size - 1 {
        let mut pairs = Vec::with_capacity(size / 2);
        for i in 0..size / 2 {
            if let (Some(a), Some(b)) = (slots[i], slots[size - 1 - i]) {
                pairs.push((a, b));
            }
        }
        rounds.push(pairs);

        // Slot 0 stays put; the last slot moves to position 1.
        if let Some(last) = slots.pop() {
            slots.insert(1, last);
        }
    }
    rounds
}

/// Full fixed-team schedule for `teams` on `courts` courts.
///
/// Matches are taken in circle-method order. A physical round admits a match
/// only if neither team is already playing in it; anything that does not fit
/// waits for the next round. Teams without a match in a round are listed as
/// sitting out.
pub fn schedule(teams: &[String], courts: usize) -> Vec<Round> {
    let courts = courts.max(1);
    let mut pending: Vec<IndexedPair> = circle_pairings(teams.len()).into_iter().flatten().collect();
    let total = pending.len();

    let mut rounds = Vec::new();
    while !pending.is_empty() {
        let mut seated = vec![false; teams.len()];
        let mut placed: Vec<IndexedPair> = Vec::with_capacity(courts);
        let mut deferred = Vec::with_capacity(pending.len());

        for (a, b) in pending.drain(..) {
            if placed.len() < courts && !seated[a] && !seated[b] {
                seated[a] = true;
                seated[b] = true;
                placed.push((a, b));
            } else {
                deferred.push((a, b));
            }
        }
        pending = deferred;

        let matches = placed
            .into_iter()
            .map(|(a, b)| Match::new(Team::single(&teams[a]), Team::single(&teams[b])))
            .collect();
        let sitting_out = teams
            .iter()
            .zip(&seated)
            .filter(|&(_, &playing)| !playing)
            .map(|(team, _)| team.clone())
            .collect();

        rounds.push(Round {
            index: rounds.len(),
            matches,
            sitting_out,
        });
    }

    log::info!(
        "round robin: {} teams, {} matches over {} rounds on {} courts",
        teams.len(),
        total,
        rounds.len(),
        courts
    );
    rounds
}

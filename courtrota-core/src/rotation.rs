/// Sit-out rotation: a FIFO queue of roster entries.
///
/// The front of the queue is whoever has gone longest without sitting out.
/// Sitters are taken from the front and pushed to the back, so nobody sits
/// again until everyone queued ahead of them has had a turn.
use std::collections::VecDeque;

/// Split `queue` into this round's sitters and the queue for the next round.
///
/// Returns `(sitters, new_queue)` where `new_queue` is the untouched remainder
/// in its original order followed by the sitters. If `queue` holds fewer than
/// `sit_count` entries it is replaced by `roster` before sampling.
pub fn next_sit_outs(
    queue: &[String],
    sit_count: usize,
    roster: &[String],
) -> (Vec<String>, Vec<String>) {
    let source = if queue.len() < sit_count { roster } else { queue };
    let sit_count = sit_count.min(source.len());

    let sitters = source[..sit_count].to_vec();
    let mut new_queue = Vec::with_capacity(source.len());
    new_queue.extend_from_slice(&source[sit_count..]);
    new_queue.extend_from_slice(&sitters);

    (sitters, new_queue)
}

/// The rotation state stored by a tournament.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SitOutQueue {
    queue: VecDeque<String>,
}

impl SitOutQueue {
    /// Queue seeded in roster order.
    pub fn new(roster: &[String]) -> Self {
        SitOutQueue {
            queue: roster.iter().cloned().collect(),
        }
    }

    /// Pick this round's sitters without modifying the queue.
    ///
    /// Returns the sitters and the queue to [`commit`](Self::commit) once the
    /// rest of the round has been generated.
    pub fn peek(&self, sit_count: usize, roster: &[String]) -> (Vec<String>, SitOutQueue) {
        let current: Vec<String> = self.queue.iter().cloned().collect();
        let (sitters, next) = next_sit_outs(&current, sit_count, roster);
        (sitters, SitOutQueue { queue: next.into() })
    }

    pub fn commit(&mut self, next: SitOutQueue) {
        *self = next;
    }

    /// Move `sitters` to the back, keeping everyone else in order.
    ///
    /// Replays a recorded round. Equivalent to the rotation above whenever the
    /// sitters were at the front of the queue.
    pub fn requeue(&mut self, sitters: &[String]) {
        self.queue.retain(|id| !sitters.contains(id));
        self.queue.extend(sitters.iter().cloned());
    }

    pub fn as_vec(&self) -> Vec<String> {
        self.queue.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// True when the queue holds exactly the roster entries, each once.
    pub fn is_permutation_of(&self, roster: &[String]) -> bool {
        if self.queue.len() != roster.len() {
            return false;
        }
        let mut a: Vec<&String> = self.queue.iter().collect();
        let mut b: Vec<&String> = roster.iter().collect();
        a.sort();
        b.sort();
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sitters_come_from_the_front_and_go_to_the_back() {
        let roster = names(&["a", "b", "c", "d", "e"]);
        let (sitters, queue) = next_sit_outs(&roster, 2, &roster);
        assert_eq!(sitters, names(&["a", "b"]));
        assert_eq!(queue, names(&["c", "d", "e", "a", "b"]));
    }

    #[test]
    fn test_zero_sitters_leaves_queue_unchanged() {
        let roster = names(&["a", "b", "c", "d"]);
        let (sitters, queue) = next_sit_outs(&roster, 0, &roster);
        assert!(sitters.is_empty());
        assert_eq!(queue, roster);
    }

    #[test]
    fn test_short_queue_is_refilled_from_roster() {
        let roster = names(&["a", "b", "c"]);
        let (sitters, queue) = next_sit_outs(&names(&["c"]), 2, &roster);
        assert_eq!(sitters, names(&["a", "b"]));
        assert_eq!(queue, names(&["c", "a", "b"]));
    }

    #[test]
    fn test_every_player_sits_once_per_cycle() {
        let roster = names(&["a", "b", "c", "d", "e", "f", "g", "h", "i"]);
        let mut queue = SitOutQueue::new(&roster);
        let mut sat = Vec::new();
        for _ in 0..9 {
            let (sitters, next) = queue.peek(1, &roster);
            queue.commit(next);
            assert!(queue.is_permutation_of(&roster));
            sat.extend(sitters);
        }
        sat.sort();
        assert_eq!(sat, roster);
    }

    #[test]
    fn test_peek_does_not_mutate() {
        let roster = names(&["a", "b", "c", "d", "e"]);
        let queue = SitOutQueue::new(&roster);
        let _ = queue.peek(1, &roster);
        assert_eq!(queue.as_vec(), roster);
    }

    #[test]
    fn test_requeue_matches_rotation() {
        let roster = names(&["a", "b", "c", "d", "e", "f"]);
        let mut replayed = SitOutQueue::new(&roster);
        let mut rotated = SitOutQueue::new(&roster);
        for _ in 0..4 {
            let (sitters, next) = rotated.peek(2, &roster);
            rotated.commit(next);
            replayed.requeue(&sitters);
        }
        assert_eq!(replayed, rotated);
    }
}

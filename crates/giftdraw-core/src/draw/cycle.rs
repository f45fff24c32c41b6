// Whole-cycle helpers: shuffled reveal orders and chain verification.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::assignment::Assignment;

/// Build a uniformly random receiver order for a cycle that starts at `start`.
///
/// The other participants are shuffled and `start` is appended, so reading
/// the result in order gives every draw's receiver and the last one closes
/// the chain back onto the first drawer.
pub fn shuffled_cycle<R: Rng + ?Sized>(
    participants: &[String],
    start: &str,
    rng: &mut R,
) -> Vec<String> {
    let mut order: Vec<String> = participants
        .iter()
        .filter(|name| *name != start)
        .cloned()
        .collect();
    order.shuffle(rng);
    order.push(start.to_string());
    order
}

/// Check that `assignments` is one closed chain with no self-gifts.
///
/// Each receiver must be the next giver, the last receiver must be the first
/// giver, and no one may give twice.
pub fn is_single_cycle(assignments: &[Assignment]) -> bool {
    let (Some(first), Some(last)) = (assignments.first(), assignments.last()) else {
        return false;
    };

    if assignments.iter().any(|a| a.giver == a.receiver) {
        return false;
    }

    let linked = assignments
        .windows(2)
        .all(|pair| pair[0].receiver == pair[1].giver);
    if !linked || last.receiver != first.giver {
        return false;
    }

    let givers: HashSet<&str> = assignments.iter().map(|a| a.giver.as_str()).collect();
    givers.len() == assignments.len()
}

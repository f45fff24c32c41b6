// Shuffling-names preview shown while a draw is pending.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::draw::session::Session;

/// Names shown at once by default.
pub const DEFAULT_PREVIEW_SIZE: usize = 3;

/// Pick up to `size` legal candidates in random order for display.
///
/// Reads the session only. The result has no bearing on which receiver the
/// next committed draw selects.
pub fn spin_preview<R: Rng + ?Sized>(session: &Session, rng: &mut R, size: usize) -> Vec<String> {
    let mut names: Vec<String> = session
        .candidates()
        .into_iter()
        .map(str::to_owned)
        .collect();
    names.shuffle(rng);
    names.truncate(size);
    names
}

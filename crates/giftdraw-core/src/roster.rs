// Participant list parsing and pre-start validation.
//
// Front ends collect names as free text, one per line. This module turns
// that text into the clean, ordered list the engine expects and checks the
// first-drawer choice before a session is started.

use std::collections::HashSet;

use tracing::debug;

use crate::draw::session::MIN_PARTICIPANTS;
use crate::error::SetupError;

/// Parse one name per line.
///
/// Lines are trimmed, blank lines are dropped, and repeated names keep only
/// their first occurrence. Comparison is case-sensitive.
pub fn parse_participants(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for line in text.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if seen.insert(name) {
            names.push(name.to_string());
        } else {
            debug!("Dropping repeated participant '{}'", name);
        }
    }
    names
}

/// Check that `names` can start a draw with `first_drawer` going first.
pub fn validate_setup(names: &[String], first_drawer: &str) -> Result<(), SetupError> {
    if names.len() < MIN_PARTICIPANTS {
        return Err(SetupError::TooFewParticipants { count: names.len() });
    }
    if first_drawer.is_empty() || !names.iter().any(|n| n == first_drawer) {
        return Err(SetupError::InvalidFirstDrawer {
            name: first_drawer.to_string(),
        });
    }
    Ok(())
}

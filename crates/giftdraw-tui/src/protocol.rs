// Messages exchanged between the TUI and the app orchestrator.
//
// The TUI sends `UserCommand`s; the orchestrator answers with `UiUpdate`s.
// Neither side shares mutable state with the other.

use giftdraw_core::{Assignment, DrawStrategy, Phase, Session};

/// A request from the TUI to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Leave the input screen with these names, `first_drawer` going first.
    Start {
        names: Vec<String>,
        first_drawer: String,
    },
    /// Begin the next draw (committed after the spin delay).
    Draw,
    /// Throw away the current game and return to the input screen.
    Reset,
    Quit,
}

/// Everything the TUI needs to render the committed game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    pub phase: Phase,
    pub participants: Vec<String>,
    pub current_drawer: Option<String>,
    pub assignments: Vec<Assignment>,
    /// Participants nobody has drawn yet.
    pub remaining: usize,
    pub strategy: DrawStrategy,
}

impl Default for AppSnapshot {
    fn default() -> Self {
        AppSnapshot {
            phase: Phase::Input,
            participants: Vec::new(),
            current_drawer: None,
            assignments: Vec::new(),
            remaining: 0,
            strategy: DrawStrategy::default(),
        }
    }
}

impl AppSnapshot {
    /// Snapshot a running or finished session.
    pub fn from_session(session: &Session) -> Self {
        AppSnapshot {
            phase: session.phase(),
            participants: session.participants().to_vec(),
            current_drawer: session.current_drawer().map(str::to_owned),
            assignments: session.assignments().to_vec(),
            remaining: session.remaining_receivers().len(),
            strategy: session.strategy(),
        }
    }

    /// Snapshot of the input phase (no session).
    pub fn input(strategy: DrawStrategy) -> Self {
        AppSnapshot {
            strategy,
            ..AppSnapshot::default()
        }
    }
}

/// A state change pushed from the orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// Committed state changed (start, draw, reset).
    StateSnapshot(Box<AppSnapshot>),
    /// A draw was accepted and is spinning.
    DrawPending,
    /// Fresh shuffled names for the spinning display. Display only.
    Preview(Vec<String>),
    /// The names or first drawer could not start a draw.
    SetupRejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_mirrors_session() {
        let session = Session::start(vec!["A".into(), "B".into(), "C".into()], "C").unwrap();
        let snap = AppSnapshot::from_session(&session);
        assert_eq!(snap.phase, Phase::Drawing);
        assert_eq!(snap.current_drawer.as_deref(), Some("C"));
        assert_eq!(snap.remaining, 3);
        assert!(snap.assignments.is_empty());
        assert_eq!(snap.participants.len(), 3);
    }

    #[test]
    fn input_snapshot_keeps_strategy() {
        let snap = AppSnapshot::input(DrawStrategy::Cycle);
        assert_eq!(snap.phase, Phase::Input);
        assert_eq!(snap.strategy, DrawStrategy::Cycle);
        assert!(snap.participants.is_empty());
    }
}

// Error types for the draw engine and setup validation.

use thiserror::Error;

use crate::draw::session::Phase;

/// A broken engine contract.
///
/// Every variant means a session was built or driven incorrectly. None of
/// them is recoverable by retrying the same call; callers should surface
/// the error and abandon the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("draw requested while the session is {phase}")]
    NotDrawing { phase: Phase },

    #[error("a session is already {phase}; reset before starting another")]
    SessionInProgress { phase: Phase },

    #[error("no legal receiver for `{drawer}` with {remaining} receiver(s) remaining")]
    NoCandidates { drawer: String, remaining: usize },

    #[error("a draw needs at least {min} participants, got {count}", min = crate::MIN_PARTICIPANTS)]
    TooFewParticipants { count: usize },

    #[error("starting drawer `{name}` is not a participant")]
    UnknownStartingDrawer { name: String },

    #[error("participant `{name}` is listed more than once")]
    DuplicateParticipant { name: String },

    #[error("planned receiver `{receiver}` is not a legal candidate")]
    PlanMismatch { receiver: String },
}

/// Reasons a participant list cannot start a draw yet.
///
/// These are user-correctable: the front end reports them and lets the user
/// edit the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("please enter at least two names (got {count})")]
    TooFewParticipants { count: usize },

    #[error("please choose a valid first drawer")]
    InvalidFirstDrawer { name: String },
}

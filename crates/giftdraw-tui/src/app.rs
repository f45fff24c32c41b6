// Application state and orchestration logic.
//
// The event loop owns the game, receives user commands from the TUI, runs
// the deferred draw (spinning preview, then one committed engine draw) and
// pushes UI updates back to the TUI render loop.

use anyhow::Context;
use giftdraw_core::preview::spin_preview;
use giftdraw_core::roster::validate_setup;
use giftdraw_core::{Game, Phase};
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::protocol::{AppSnapshot, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// A draw that has been requested but not yet committed.
///
/// Holds no game data: dropping it abandons the draw without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDraw {
    /// When the engine draw is committed.
    pub deadline: Instant,
}

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub game: Game,
    pub rng: StdRng,
    pub pending: Option<PendingDraw>,
}

impl AppState {
    /// Create the app state, seeding the RNG from config when a seed is set.
    pub fn new(config: Config) -> Self {
        let rng = config.draw.rng();
        AppState {
            config,
            game: Game::new(),
            rng,
            pending: None,
        }
    }

    /// Snapshot of the committed game for the TUI.
    pub fn snapshot(&self) -> AppSnapshot {
        match self.game.session() {
            Some(session) => AppSnapshot::from_session(session),
            None => AppSnapshot::input(self.config.draw.strategy),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// ---------------------------------------------------------------------------
// Command handling
// ---------------------------------------------------------------------------

/// Apply one user command (other than Quit) to the state.
pub async fn handle_command(state: &mut AppState, cmd: UserCommand, ui_tx: &mpsc::Sender<UiUpdate>) {
    match cmd {
        UserCommand::Start {
            names,
            first_drawer,
        } => handle_start(state, names, first_drawer, ui_tx).await,
        UserCommand::Draw => handle_draw_request(state, ui_tx).await,
        UserCommand::Reset => {
            if state.pending.take().is_some() {
                info!("Pending draw abandoned by reset");
            }
            state.game.reset();
            send_snapshot(state, ui_tx).await;
        }
        UserCommand::Quit => {
            // The event loop exits on Quit before dispatching here.
            debug!("Quit reached handle_command; ignoring");
        }
    }
}

async fn handle_start(
    state: &mut AppState,
    names: Vec<String>,
    first_drawer: String,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    if state.game.phase() != Phase::Input {
        warn!("Start ignored in phase {}", state.game.phase());
        return;
    }

    if let Err(e) = validate_setup(&names, &first_drawer) {
        info!("Setup rejected: {}", e);
        let _ = ui_tx.send(UiUpdate::SetupRejected(e.to_string())).await;
        return;
    }

    let strategy = state.config.draw.strategy;
    if let Err(e) = state
        .game
        .start(names, &first_drawer, strategy, &mut state.rng)
    {
        warn!("Engine refused to start: {}", e);
        let _ = ui_tx.send(UiUpdate::SetupRejected(e.to_string())).await;
        return;
    }
    send_snapshot(state, ui_tx).await;
}

async fn handle_draw_request(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    if state.game.phase() != Phase::Drawing {
        debug!("Draw ignored in phase {}", state.game.phase());
        return;
    }
    if state.is_pending() {
        debug!("Draw ignored: one is already spinning");
        return;
    }

    state.pending = Some(PendingDraw {
        deadline: Instant::now() + state.config.animation.spin_duration(),
    });
    let _ = ui_tx.send(UiUpdate::DrawPending).await;
    send_preview(state, ui_tx).await;
}

/// Push a freshly shuffled preview of the pending draw's candidates.
pub async fn send_preview(state: &mut AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let Some(session) = state.game.session() else {
        return;
    };
    let names = spin_preview(session, &mut state.rng, state.config.animation.preview_size);
    let _ = ui_tx.send(UiUpdate::Preview(names)).await;
}

/// Commit the pending draw through the engine.
///
/// An engine error here means the session was driven into an impossible
/// state; it is returned so the event loop stops.
pub async fn commit_pending(
    state: &mut AppState,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> anyhow::Result<()> {
    if state.pending.take().is_none() {
        return Ok(());
    }

    let assignment = match state.game.draw(&mut state.rng) {
        Ok(a) => a,
        Err(e) => {
            error!("Draw commit failed: {}", e);
            return Err(e).context("draw engine invariant violated");
        }
    };
    info!("Drawn: {}", assignment);

    send_snapshot(state, ui_tx).await;
    Ok(())
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx
        .send(UiUpdate::StateSnapshot(Box::new(state.snapshot())))
        .await;
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the orchestrator until the TUI quits or the command channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    send_snapshot(&state, &ui_tx).await;

    let mut preview_tick = tokio::time::interval(state.config.animation.preview_interval());
    preview_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let deadline = state.pending.map(|p| p.deadline);

        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) | None => {
                        info!("Quit requested, leaving event loop");
                        break;
                    }
                    Some(cmd) => handle_command(&mut state, cmd, &ui_tx).await,
                }
            }

            // Spinning preview while a draw is pending
            _ = preview_tick.tick(), if deadline.is_some() => {
                send_preview(&mut state, &ui_tx).await;
            }

            // Commit at the deadline
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                commit_pending(&mut state, &ui_tx).await?;
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

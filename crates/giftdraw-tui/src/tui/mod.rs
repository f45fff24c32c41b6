// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the last committed snapshot plus
// screen-local state (names being typed, first-drawer choice, the spinning
// preview). The app orchestrator pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use giftdraw_core::roster::parse_participants;
use giftdraw_core::Phase;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::protocol::{AppSnapshot, UiUpdate, UserCommand};
use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which input-screen panel receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFocus {
    #[default]
    Names,
    FirstDrawer,
}

/// TUI-local state that mirrors the application state for rendering.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Last committed state from the orchestrator.
    pub snapshot: AppSnapshot,
    /// Raw participant text, one name per line.
    pub names_text: String,
    pub focus: InputFocus,
    /// Index into the parsed names for the first drawer.
    pub drawer_choice: Option<usize>,
    /// Whether a draw is spinning.
    pub drawing: bool,
    /// Names currently flashing in the spinner. Display only.
    pub preview: Vec<String>,
    /// Message for the status bar (setup problems).
    pub status_message: Option<String>,
    /// Scroll offset for the results list.
    pub results_scroll: usize,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

impl ViewState {
    pub fn phase(&self) -> Phase {
        self.snapshot.phase
    }

    /// Participant names as the engine will see them.
    pub fn parsed_names(&self) -> Vec<String> {
        parse_participants(&self.names_text)
    }

    /// The chosen first drawer, if the choice still points at a name.
    pub fn selected_first_drawer(&self) -> Option<String> {
        let idx = self.drawer_choice?;
        self.parsed_names().into_iter().nth(idx)
    }

    /// Apply a committed-state snapshot from the orchestrator.
    ///
    /// Returning to the input phase clears everything typed for the previous
    /// game. A new draw scrolls the results so it is on screen; otherwise the
    /// user's scroll position is kept.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        let back_to_input = snapshot.phase == Phase::Input && self.snapshot.phase != Phase::Input;
        if back_to_input {
            self.names_text.clear();
            self.drawer_choice = None;
            self.focus = InputFocus::Names;
        }
        if snapshot.phase == Phase::Input {
            self.results_scroll = 0;
        } else {
            self.status_message = None;
            if snapshot.assignments.len() > self.snapshot.assignments.len() {
                // The results widget clamps this to the last full page.
                self.results_scroll = snapshot.assignments.len().saturating_sub(1);
            }
        }
        self.snapshot = snapshot;
        self.drawing = false;
        self.preview.clear();
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => state.apply_snapshot(*snapshot),
        UiUpdate::DrawPending => {
            state.drawing = true;
        }
        UiUpdate::Preview(names) => {
            // Late previews after a commit are dropped.
            if state.drawing {
                state.preview = names;
            }
        }
        UiUpdate::SetupRejected(message) => {
            state.status_message = Some(message);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete screen for the current phase.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);

    match state.phase() {
        Phase::Input => {
            let (names_area, picker_area) = layout::split_input(layout.main_panel);
            widgets::name_input::render(frame, names_area, state);
            widgets::drawer_picker::render(frame, picker_area, state);
        }
        Phase::Drawing => {
            let (banner_area, results_area) = layout::split_drawing(layout.main_panel);
            widgets::draw_banner::render(frame, banner_area, state);
            widgets::results::render(frame, results_area, state);
        }
        Phase::Finished => {
            let (banner_area, results_area) = layout::split_drawing(layout.main_panel);
            widgets::draw_banner::render(frame, banner_area, state);
            widgets::results::render(frame, results_area, state);
        }
    }

    widgets::status_bar::render_help(frame, layout.help_bar, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area(), state);
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        // Orchestrator stopped (quit or fatal error)
                        debug!("UI channel closed");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            if cmd_tx.send(cmd).await.is_err() || quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events: the next tick redraws
                    }
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break Err(anyhow::Error::from(e).context("terminal input failed"));
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::from(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use giftdraw_core::{Assignment, DrawStrategy};

    fn drawing_snapshot() -> AppSnapshot {
        AppSnapshot {
            phase: Phase::Drawing,
            participants: vec!["A".into(), "B".into(), "C".into()],
            current_drawer: Some("B".into()),
            assignments: vec![Assignment::new("A", "B")],
            remaining: 2,
            strategy: DrawStrategy::Sequential,
        }
    }

    #[test]
    fn view_state_default_is_input() {
        let state = ViewState::default();
        assert_eq!(state.phase(), Phase::Input);
        assert!(state.names_text.is_empty());
        assert_eq!(state.focus, InputFocus::Names);
        assert!(state.drawer_choice.is_none());
        assert!(!state.drawing);
        assert!(state.preview.is_empty());
        assert!(!state.confirm_quit);
    }

    #[test]
    fn selected_first_drawer_follows_parsed_names() {
        let mut state = ViewState {
            names_text: "A\n\nB\nC\n".into(),
            drawer_choice: Some(1),
            ..ViewState::default()
        };
        assert_eq!(state.selected_first_drawer().as_deref(), Some("B"));
        state.names_text = "A\n".into();
        assert_eq!(state.selected_first_drawer(), None);
    }

    #[test]
    fn draw_pending_then_preview_then_commit() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::StateSnapshot(Box::new(drawing_snapshot())));

        apply_ui_update(&mut state, UiUpdate::DrawPending);
        assert!(state.drawing);
        apply_ui_update(&mut state, UiUpdate::Preview(vec!["C".into()]));
        assert_eq!(state.preview, vec!["C".to_string()]);

        let mut next = drawing_snapshot();
        next.assignments.push(Assignment::new("B", "C"));
        next.current_drawer = Some("C".into());
        apply_ui_update(&mut state, UiUpdate::StateSnapshot(Box::new(next)));
        assert!(!state.drawing);
        assert!(state.preview.is_empty());
        assert_eq!(state.snapshot.assignments.len(), 2);
    }

    #[test]
    fn preview_without_pending_draw_is_ignored() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::Preview(vec!["X".into()]));
        assert!(state.preview.is_empty());
    }

    #[test]
    fn setup_rejection_sets_status_message() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::SetupRejected("please enter at least two names".into()));
        assert_eq!(
            state.status_message.as_deref(),
            Some("please enter at least two names")
        );
        // Entering the drawing phase clears it.
        apply_ui_update(&mut state, UiUpdate::StateSnapshot(Box::new(drawing_snapshot())));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn reset_snapshot_clears_typed_input() {
        let mut state = ViewState {
            names_text: "A\nB\n".into(),
            drawer_choice: Some(0),
            focus: InputFocus::FirstDrawer,
            ..ViewState::default()
        };
        apply_ui_update(&mut state, UiUpdate::StateSnapshot(Box::new(drawing_snapshot())));
        // Names typed for the running game are kept while drawing.
        assert_eq!(state.names_text, "A\nB\n");

        apply_ui_update(
            &mut state,
            UiUpdate::StateSnapshot(Box::new(AppSnapshot::input(DrawStrategy::Sequential))),
        );
        assert!(state.names_text.is_empty());
        assert!(state.drawer_choice.is_none());
        assert_eq!(state.focus, InputFocus::Names);
    }

    fn long_drawing_snapshot(count: usize) -> AppSnapshot {
        let names: Vec<String> = (1..=count).map(|i| format!("P{i}")).collect();
        let assignments = names
            .iter()
            .zip(names.iter().skip(1))
            .map(|(g, r)| Assignment::new(g.clone(), r.clone()))
            .collect();
        AppSnapshot {
            phase: Phase::Drawing,
            current_drawer: names.last().cloned(),
            participants: names,
            assignments,
            remaining: 1,
            strategy: DrawStrategy::Sequential,
        }
    }

    fn screen_text(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|f| render_frame(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn new_draw_scrolls_latest_result_into_view() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::StateSnapshot(Box::new(long_drawing_snapshot(25))));
        state.results_scroll = 10;

        apply_ui_update(&mut state, UiUpdate::StateSnapshot(Box::new(long_drawing_snapshot(26))));
        assert_eq!(state.results_scroll, 24);
        let screen = screen_text(&state);
        assert!(screen.contains("#25 P25 -> P26"), "got {screen:?}");
    }

    #[test]
    fn snapshot_without_new_draw_keeps_scroll() {
        let mut state = ViewState::default();
        apply_ui_update(&mut state, UiUpdate::StateSnapshot(Box::new(long_drawing_snapshot(25))));
        state.results_scroll = 3;

        let mut finished = long_drawing_snapshot(25);
        finished.phase = Phase::Finished;
        finished.current_drawer = None;
        apply_ui_update(&mut state, UiUpdate::StateSnapshot(Box::new(finished)));
        assert_eq!(state.results_scroll, 3);

        apply_ui_update(
            &mut state,
            UiUpdate::StateSnapshot(Box::new(AppSnapshot::input(DrawStrategy::Sequential))),
        );
        assert_eq!(state.results_scroll, 0);
    }

    #[test]
    fn render_frame_every_phase_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();

        let mut state = ViewState {
            names_text: "Ming\nHua\nMei\n".into(),
            drawer_choice: Some(2),
            ..ViewState::default()
        };
        terminal.draw(|f| render_frame(f, &state)).unwrap();

        state.snapshot = drawing_snapshot();
        state.drawing = true;
        state.preview = vec!["A".into(), "C".into()];
        terminal.draw(|f| render_frame(f, &state)).unwrap();

        state.snapshot.phase = Phase::Finished;
        state.confirm_quit = true;
        terminal.draw(|f| render_frame(f, &state)).unwrap();
    }
}

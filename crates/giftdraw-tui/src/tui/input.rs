// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (typing names,
// choosing the first drawer, scrolling results).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use giftdraw_core::Phase;

use super::{InputFocus, ViewState};
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both press and release; only act on presses.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match view_state.phase() {
        Phase::Input => handle_input_screen(key_event, view_state),
        Phase::Drawing => handle_drawing_screen(key_event, view_state),
        Phase::Finished => handle_finished_screen(key_event, view_state),
    }
}

/// Quit confirmation: `y`/`q` confirm, `n`/Esc cancel, everything else blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Input screen
// ---------------------------------------------------------------------------

fn handle_input_screen(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.confirm_quit = true;
            None
        }
        KeyCode::Tab | KeyCode::BackTab => {
            toggle_focus(view_state);
            None
        }
        _ => match view_state.focus {
            InputFocus::Names => {
                edit_names(key_event, view_state);
                None
            }
            InputFocus::FirstDrawer => handle_drawer_picker(key_event, view_state),
        },
    }
}

fn toggle_focus(view_state: &mut ViewState) {
    view_state.focus = match view_state.focus {
        InputFocus::Names => {
            let count = view_state.parsed_names().len();
            view_state.drawer_choice = match view_state.drawer_choice {
                _ if count == 0 => None,
                Some(idx) => Some(idx.min(count - 1)),
                None => Some(0),
            };
            InputFocus::FirstDrawer
        }
        InputFocus::FirstDrawer => InputFocus::Names,
    };
}

fn edit_names(key_event: KeyEvent, view_state: &mut ViewState) {
    match key_event.code {
        KeyCode::Enter => view_state.names_text.push('\n'),
        KeyCode::Backspace => {
            view_state.names_text.pop();
        }
        KeyCode::Char(c)
            if !key_event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            view_state.names_text.push(c);
        }
        _ => {}
    }
}

fn handle_drawer_picker(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let count = view_state.parsed_names().len();
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            move_choice(view_state, count, -1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_choice(view_state, count, 1);
            None
        }
        KeyCode::Enter => Some(UserCommand::Start {
            names: view_state.parsed_names(),
            first_drawer: view_state.selected_first_drawer().unwrap_or_default(),
        }),
        _ => None,
    }
}

/// Move the first-drawer choice by `delta`, wrapping around the list.
fn move_choice(view_state: &mut ViewState, count: usize, delta: isize) {
    if count == 0 {
        view_state.drawer_choice = None;
        return;
    }
    let current = view_state.drawer_choice.map(|i| i.min(count - 1)).unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(count as isize);
    view_state.drawer_choice = Some(next as usize);
}

// ---------------------------------------------------------------------------
// Drawing and finished screens
// ---------------------------------------------------------------------------

fn handle_drawing_screen(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char(' ') | KeyCode::Enter => {
            if view_state.drawing {
                None
            } else {
                Some(UserCommand::Draw)
            }
        }
        KeyCode::Char('r') => Some(UserCommand::Reset),
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => {
            scroll_results(key_event.code, view_state);
            None
        }
    }
}

fn handle_finished_screen(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('r') | KeyCode::Char('n') | KeyCode::Enter => Some(UserCommand::Reset),
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => {
            scroll_results(key_event.code, view_state);
            None
        }
    }
}

fn scroll_results(code: KeyCode, view_state: &mut ViewState) {
    let max = view_state.snapshot.assignments.len().saturating_sub(1);
    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.results_scroll = view_state.results_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.results_scroll = (view_state.results_scroll + 1).min(max);
        }
        KeyCode::Home => view_state.results_scroll = 0,
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

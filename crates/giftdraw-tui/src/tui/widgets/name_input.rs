// Participant names editor: free text, one name per line.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::{InputFocus, ViewState};

const PLACEHOLDER: &str = "Type one name per line, e.g.\nMing\nHua\nMei";

/// Render the names editor. A trailing block cursor shows where typing goes
/// while the editor has focus.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.focus == InputFocus::Names;
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let title = format!("Participants ({})", state.parsed_names().len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);

    let paragraph = if state.names_text.is_empty() && !focused {
        Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(editor_text(state, focused))
    };

    // Keep the last lines visible once the list outgrows the panel.
    let inner_rows = area.height.saturating_sub(2) as usize;
    let total_rows = state.names_text.lines().count() + 1;
    let scroll = total_rows.saturating_sub(inner_rows) as u16;

    frame.render_widget(
        paragraph.block(block).wrap(Wrap { trim: false }).scroll((scroll, 0)),
        area,
    );
}

fn editor_text(state: &ViewState, focused: bool) -> String {
    if focused {
        format!("{}\u{2588}", state.names_text)
    } else {
        state.names_text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_only_when_focused() {
        let mut state = ViewState {
            names_text: "A\nB".into(),
            ..ViewState::default()
        };
        assert_eq!(editor_text(&state, true), "A\nB\u{2588}");
        state.focus = InputFocus::FirstDrawer;
        assert_eq!(editor_text(&state, false), "A\nB");
    }

    #[test]
    fn render_many_names_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(30, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState {
            names_text: (0..40).map(|i| format!("Person {i}\n")).collect(),
            ..ViewState::default()
        };
        terminal.draw(|f| render(f, f.area(), &state)).unwrap();
    }
}

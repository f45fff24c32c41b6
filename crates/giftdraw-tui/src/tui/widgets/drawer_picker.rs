// First-drawer picker: the parsed names with the current choice highlighted.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::tui::{InputFocus, ViewState};

/// Render the picker. Enter on this panel starts the draw.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let focused = state.focus == InputFocus::FirstDrawer;
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title("First Drawer");

    let names = state.parsed_names();
    if names.is_empty() {
        let paragraph = Paragraph::new("  No names yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = names.into_iter().map(ListItem::new).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(state.drawer_choice);
    frame.render_stateful_widget(list, area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(state: &ViewState) -> String {
        let backend = ratatui::backend::TestBackend::new(24, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, f.area(), state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn empty_list_shows_hint() {
        assert!(rendered(&ViewState::default()).contains("No names yet."));
    }

    #[test]
    fn selected_name_is_marked() {
        let state = ViewState {
            names_text: "Ming\nHua\n".into(),
            drawer_choice: Some(1),
            focus: InputFocus::FirstDrawer,
            ..ViewState::default()
        };
        let screen = rendered(&state);
        assert!(screen.contains("> Hua"), "got {screen:?}");
        assert!(screen.contains("Ming"));
    }
}

// Results list: committed draws in order, "giver -> receiver".

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use giftdraw_core::Assignment;

use crate::tui::ViewState;

/// Render the results list into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let assignments = &state.snapshot.assignments;
    let title = format!("Results ({}/{})", assignments.len(), state.snapshot.participants.len());

    if assignments.is_empty() {
        let paragraph = Paragraph::new("  No draws yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    // Visible row count: subtract 2 for borders
    let visible_rows = (area.height as usize).saturating_sub(2);
    let total = assignments.len();
    let scroll_offset = state.results_scroll.min(total.saturating_sub(visible_rows));

    let items: Vec<ListItem> = assignments
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_rows.max(1))
        .map(|(idx, a)| ListItem::new(result_line(idx + 1, a)))
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);

    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_rows)).position(scroll_offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// One draw as "#n giver -> receiver", numbered from one.
fn result_line(number: usize, assignment: &Assignment) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("#{number} "), Style::default().fg(Color::DarkGray)),
        Span::styled(
            assignment.giver.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" -> "),
        Span::styled(assignment.receiver.clone(), Style::default().fg(Color::Green)),
    ])
}

// Status bar (top) and help bar (bottom).

use giftdraw_core::Phase;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the one-row status bar: title, phase, progress, setup errors.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![
        Span::styled(
            " Gift Exchange Draw ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(status_text(state), Style::default().fg(Color::White)),
    ];

    if let Some(ref message) = state.status_message {
        spans.push(Span::styled(
            format!(" | {message}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Phase and progress text, e.g. "| drawing | 2/5 drawn | sequential".
pub fn status_text(state: &ViewState) -> String {
    let snap = &state.snapshot;
    match snap.phase {
        Phase::Input => format!("| input | {} name(s) entered", state.parsed_names().len()),
        Phase::Drawing | Phase::Finished => format!(
            "| {} | {}/{} drawn | {}",
            snap.phase,
            snap.assignments.len(),
            snap.participants.len(),
            snap.strategy
        ),
    }
}

/// Render the key hints for the current phase.
pub fn render_help(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn help_text(state: &ViewState) -> &'static str {
    match state.phase() {
        Phase::Input => " Tab:Switch panel | Enter:New line / Start | Up/Down:First drawer | Esc:Quit",
        Phase::Drawing if state.drawing => " Drawing... | r:Reset | q:Quit",
        Phase::Drawing => " Space/Enter:Draw | Up/Down:Scroll | r:Reset | q:Quit",
        Phase::Finished => " n/r:New game | Up/Down:Scroll | q:Quit",
    }
}

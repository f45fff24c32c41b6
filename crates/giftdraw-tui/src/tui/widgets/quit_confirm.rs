// Quit confirmation overlay.
//
// Drawn on top of the current screen while `ViewState::confirm_quit` is set.
// Warns when leaving would throw away an unfinished draw.

use giftdraw_core::Phase;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::centered_rect;
use crate::tui::ViewState;

const DIALOG_WIDTH: u16 = 36;
const DIALOG_HEIGHT: u16 = 6;

/// Render the quit dialog centered in `area`.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let lines = vec![
        Line::from(warning_text(state)),
        Line::from(vec![
            Span::raw("Leave giftdraw? ("),
            key("y", Color::Green),
            Span::raw("/"),
            key("n", Color::Red),
            Span::raw(")"),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Quit ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(Color::Black)),
        dialog_area,
    );
}

/// What quitting now would lose. Results are never saved.
fn warning_text(state: &ViewState) -> String {
    let snap = &state.snapshot;
    match snap.phase {
        Phase::Drawing => format!(
            "{} of {} drawn; the rest is lost.",
            snap.assignments.len(),
            snap.participants.len()
        ),
        Phase::Finished => "Results are not saved.".to_string(),
        Phase::Input => "Typed names are not saved.".to_string(),
    }
}

// Draw banner: whose turn it is, the spinning names, or the final tally.

use giftdraw_core::Phase;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the banner above the results list.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(banner_lines(state))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Draw"));
    frame.render_widget(paragraph, area);
}

fn banner_lines(state: &ViewState) -> Vec<Line<'static>> {
    let snap = &state.snapshot;
    let drawer = snap.current_drawer.clone().unwrap_or_default();
    let highlight = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    match snap.phase {
        Phase::Finished => vec![
            Line::from(Span::styled(
                format!("All {} gifts assigned!", snap.assignments.len()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from("Press n to start a new draw."),
        ],
        Phase::Drawing if state.drawing => vec![
            Line::from(vec![
                Span::styled(drawer, highlight),
                Span::raw(" is drawing..."),
            ]),
            Line::from(Span::styled(
                state.preview.join("   "),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )),
        ],
        Phase::Drawing => vec![
            Line::from(vec![
                Span::raw("Now drawing: "),
                Span::styled(drawer, highlight),
            ]),
            Line::from(format!(
                "{} still waiting for a gift | press Space to draw",
                snap.remaining
            )),
        ],
        Phase::Input => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::AppSnapshot;
    use giftdraw_core::Assignment;

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn drawing_state() -> ViewState {
        ViewState {
            snapshot: AppSnapshot {
                phase: Phase::Drawing,
                participants: vec!["A".into(), "B".into(), "C".into()],
                current_drawer: Some("B".into()),
                assignments: vec![Assignment::new("A", "B")],
                remaining: 2,
                ..AppSnapshot::default()
            },
            ..ViewState::default()
        }
    }

    #[test]
    fn idle_banner_names_the_drawer() {
        let lines = text(&banner_lines(&drawing_state()));
        assert_eq!(lines[0], "Now drawing: B");
        assert!(lines[1].starts_with("2 still waiting"));
    }

    #[test]
    fn spinning_banner_shows_preview() {
        let mut state = drawing_state();
        state.drawing = true;
        state.preview = vec!["C".into(), "A".into()];
        let lines = text(&banner_lines(&state));
        assert_eq!(lines, vec!["B is drawing...", "C   A"]);
    }

    #[test]
    fn finished_banner_counts_gifts() {
        let mut state = drawing_state();
        state.snapshot.phase = Phase::Finished;
        state.snapshot.assignments.push(Assignment::new("B", "C"));
        state.snapshot.assignments.push(Assignment::new("C", "A"));
        let lines = text(&banner_lines(&state));
        assert_eq!(lines[0], "All 3 gifts assigned!");
    }
}

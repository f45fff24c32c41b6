// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Main Panel                                        |
// |   input:    names (60%) | first drawer (40%)      |
// |   drawing:  banner (5 rows) / results (fill)      |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Resolved screen areas shared by every phase.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: title, phase, progress.
    pub status_bar: Rect,
    /// Everything between the bars; split per phase.
    pub main_panel: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the screen layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(6),    // main panel
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        main_panel: vertical[1],
        help_bar: vertical[2],
    }
}

/// Input screen: names editor on the left, first-drawer picker on the right.
pub fn split_input(main: Rect) -> (Rect, Rect) {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main);
    (horizontal[0], horizontal[1])
}

/// Drawing and finished screens: banner on top, results underneath.
pub fn split_drawing(main: Rect) -> (Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(main);
    (vertical[0], vertical[1])
}

/// Compute a centered rectangle of the given size within `area`, clamped to
/// the available space.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_are_one_row_each() {
        let layout = build_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.main_panel.height, 22);
        assert_eq!(layout.help_bar.y, 23);
    }

    #[test]
    fn input_split_covers_main_width() {
        let main = Rect::new(0, 1, 100, 20);
        let (names, picker) = split_input(main);
        assert_eq!(names.width, 60);
        assert_eq!(picker.width, 40);
        assert_eq!(picker.x, 60);
    }

    #[test]
    fn drawing_split_gives_banner_five_rows() {
        let (banner, results) = split_drawing(Rect::new(0, 1, 80, 22));
        assert_eq!(banner.height, 5);
        assert_eq!(results.height, 17);
        assert_eq!(results.y, 6);
    }

    #[test]
    fn centered_rect_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 80, 24);
        let r = centered_rect(30, 6, area);
        assert_eq!((r.width, r.height), (30, 6));
        assert_eq!(r.x, 25);
        assert_eq!(r.y, 9);

        let tiny = centered_rect(30, 6, Rect::new(0, 0, 10, 3));
        assert!(tiny.width <= 10 && tiny.height <= 3);
    }
}

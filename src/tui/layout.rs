//! Layout definitions for the TUI
//!
//! Tabs across the top, the active screen, then the command line and the
//! status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout regions for the TUI
pub struct AppLayout {
    pub tabs: Rect,
    pub main: Rect,
    pub command_line: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs
                Constraint::Min(5),    // Screen
                Constraint::Length(1), // Command line
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            tabs: chunks[0],
            main: chunks[1],
            command_line: chunks[2],
            status_bar: chunks[3],
        }
    }
}

/// Display on top, history on the left, key hints on the right
pub struct CalculatorLayout {
    pub display: Rect,
    pub history: Rect,
    pub hints: Rect,
}

impl CalculatorLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(3)])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(vertical[1]);

        Self {
            display: vertical[0],
            history: horizontal[0],
            hints: horizontal[1],
        }
    }
}

/// Create a centered rect for overlays
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Bottom-right corner box for toasts, clipped to `r`
pub fn toast_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + r.width - width,
        r.y + r.height - height,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout_stacks_regions() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.tabs.height, 3);
        assert_eq!(layout.status_bar.y, 23);
        assert_eq!(layout.command_line.y, 22);
        assert_eq!(layout.main.height, 24 - 3 - 2);
    }

    #[test]
    fn test_toast_rect_is_clipped() {
        let area = Rect::new(0, 0, 20, 4);
        let toast = toast_rect(40, 5, area);
        assert_eq!(toast, Rect::new(0, 0, 20, 4));

        let toast = toast_rect(10, 3, Rect::new(5, 5, 50, 20));
        assert_eq!(toast, Rect::new(45, 22, 10, 3));
    }
}

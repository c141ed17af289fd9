//! Help overlay showing all keybindings
//!
//! Renders a centered modal overlay with keyboard shortcuts.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::Palette;

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();

    // Calculate centered overlay area
    let overlay_width = 50;
    let overlay_height = 28;
    let overlay_area = centered_rect(overlay_width, overlay_height, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    // Build help content
    let lines = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            palette.header_style(),
        )),
        Line::from(""),
        section("Search"),
        help_line(palette, "/ or s", "Search a city"),
        help_line(palette, "Tab", "Suggest matching cities"),
        help_line(palette, "↑/↓", "Pick a suggestion"),
        help_line(palette, "Enter", "Load city / suggestion"),
        help_line(palette, "Esc", "Cancel input"),
        Line::from(""),
        section("Dashboard"),
        help_line(palette, "↑/k, ↓/j", "Move through favorites"),
        help_line(palette, "Enter", "Load highlighted favorite"),
        help_line(palette, "←/h, →/l", "Change day in hourly chart"),
        help_line(palette, "a", "Add a favorite"),
        help_line(palette, "r", "Reload current city"),
        help_line(palette, "c", "Clear dashboard"),
        Line::from(""),
        section("Other"),
        help_line(palette, "u", "Toggle metric/imperial"),
        help_line(palette, "t", "Toggle light/dark theme"),
        help_line(palette, "?", "Toggle this help"),
        help_line(palette, "q", "Quit application"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            palette.dim_style(),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.header));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

/// Creates a help line with key and description
fn help_line(palette: &Palette, key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(palette.selected)),
        Span::raw(description.to_string()),
    ])
}

/// Rect of the given size centered in `area`, shrunk to fit if needed
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_help_overlay_renders() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render(frame, &Palette::for_theme(Theme::Dark));
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();

        assert!(content.contains("Help"), "Should render help title");
        assert!(content.contains("Search a city"), "Should show search keys");
        assert!(
            content.contains("Toggle metric/imperial"),
            "Should show preference keys"
        );
    }

    #[test]
    fn test_help_overlay_small_terminal() {
        let backend = TestBackend::new(30, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, &Palette::for_theme(Theme::Light)))
            .unwrap();
    }

    #[test]
    fn test_centered_rect_shrinks_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_rect(50, 28, area), area);
    }

    #[test]
    fn test_centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 28, area);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.height, 28);
        assert_eq!(rect.x, 25);
        assert_eq!(rect.y, 6);
    }
}

//! UI rendering module for citycast
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod dashboard;
pub mod help_overlay;
pub mod sidebar;
pub mod theme;
pub mod widgets;

use chrono::NaiveDateTime;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, AppState, StatusKind};
use theme::Palette;

/// Width of the sidebar column
const SIDEBAR_WIDTH: u16 = 30;

/// Renders the whole screen. `now` drives the header clock.
pub fn render(frame: &mut Frame, app: &App, now: NaiveDateTime) {
    let palette = Palette::for_theme(app.session.theme);
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status line
        ])
        .split(area);

    render_header(frame, rows[0], now, &palette);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(rows[1]);

    sidebar::render(frame, columns[0], app, &palette);
    dashboard::render(frame, columns[1], &app.session, &palette);

    render_status(frame, rows[2], app, &palette);

    if app.show_help {
        help_overlay::render(frame, &palette);
    }
}

fn render_header(frame: &mut Frame, area: Rect, now: NaiveDateTime, palette: &Palette) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(" 🌦 citycast", palette.header_style())),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{} ", now.format("%a %d %b %H:%M:%S")),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right),
        halves[1],
    );
}

fn render_status(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let line = if app.is_busy() {
        Line::from(Span::styled(
            " Loading weather data...",
            Style::default().fg(palette.header),
        ))
    } else if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => palette.text,
            StatusKind::Error => palette.error,
        };
        Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color),
        ))
    } else {
        let hint = match app.state {
            AppState::Dashboard => " / search  a add favorite  c clear  u units  t theme  ? help  q quit",
            AppState::Searching => " Enter load  Tab suggestions  Esc cancel",
            AppState::AddingFavorite => " Enter add  Esc cancel",
        };
        Line::from(Span::styled(hint, palette.dim_style()))
    };

    frame.render_widget(Paragraph::new(line), area);
}

//! Sidebar: search box, suggestions, favorites and preferences

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, AppState};
use crate::data::Units;
use crate::session::Theme;

use super::theme::Palette;

/// Renders the sidebar into `area`
pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let suggestion_height = if app.suggestions.is_empty() {
        0
    } else {
        app.suggestions.len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                 // Input box
            Constraint::Length(suggestion_height), // Suggestions
            Constraint::Min(3),                    // Favorites
            Constraint::Length(4),                 // Preferences
        ])
        .split(area);

    render_input(frame, chunks[0], app, palette);
    if suggestion_height > 0 {
        render_suggestions(frame, chunks[1], app, palette);
    }
    render_favorites(frame, chunks[2], app, palette);
    render_preferences(frame, chunks[3], app, palette);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let (title, line) = match app.state {
        AppState::Searching => (
            " Search city ",
            Line::from(vec![
                Span::styled(app.input.clone(), palette.text_style()),
                Span::styled("█", Style::default().fg(palette.selected)),
            ]),
        ),
        AppState::AddingFavorite => (
            " Add favorite ",
            Line::from(vec![
                Span::styled(app.input.clone(), palette.text_style()),
                Span::styled("█", Style::default().fg(palette.selected)),
            ]),
        ),
        AppState::Dashboard => (
            " Search city ",
            Line::from(Span::styled("Press / to search", palette.dim_style())),
        ),
    };

    let border = if app.state == AppState::Dashboard {
        palette.dim_style()
    } else {
        Style::default().fg(palette.selected)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_suggestions(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let lines: Vec<Line> = app
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, location)| {
            if app.suggestion_index == Some(i) {
                Line::from(Span::styled(
                    format!("▸ {}", location.display_name),
                    palette.selected_style(),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", location.display_name),
                    palette.text_style(),
                ))
            }
        })
        .collect();

    let block = Block::default()
        .title(" Suggestions (↑/↓) ")
        .borders(Borders::ALL)
        .border_style(palette.dim_style());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_favorites(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let lines: Vec<Line> = app
        .session
        .favorites()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i == app.favorite_index && app.state == AppState::Dashboard {
                Line::from(Span::styled(format!("▸ {}", name), palette.selected_style()))
            } else {
                Line::from(Span::styled(format!("  {}", name), palette.text_style()))
            }
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(
            " ⭐ Favorites ",
            Style::default()
                .fg(palette.header)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(palette.dim_style());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_preferences(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let units = match app.session.units {
        Units::Metric => "Metric (°C, km/h)",
        Units::Imperial => "Imperial (°F, mph)",
    };
    let theme = match app.session.theme {
        Theme::Light => "Light",
        Theme::Dark => "Dark",
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Units  ", palette.dim_style()),
            Span::styled(units, palette.text_style()),
        ]),
        Line::from(vec![
            Span::styled("Theme  ", palette.dim_style()),
            Span::styled(theme, palette.text_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Preferences ")
        .borders(Borders::ALL)
        .border_style(palette.dim_style());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

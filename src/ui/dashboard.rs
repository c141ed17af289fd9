//! Main forecast view
//!
//! Renders the KPI row, the 7-day cards, the selected day's hourly chart and
//! the hourly table. With no city loaded it shows a prompt instead.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::data::{hourly_rows, or_unavailable, DayCard, HourlyPoint, Units, UNAVAILABLE};
use crate::report::{current_conditions, kpis, Kpi};
use crate::session::Session;

use super::theme::{temperature_color, Palette};
use super::widgets::HourlySparkline;

/// Shown in place of the dashboard when no city is loaded
pub const EMPTY_PROMPT: &str = "Search a city to see its weather.";

/// Shown in the chart when the selected day has no hourly entries
pub const NO_HOURLY_DATA: &str = "No hourly data available for this day.";

/// Rows shown in the hourly table
pub const HOURLY_TABLE_ROWS: usize = 48;

/// Renders the dashboard for `session` into `area`
pub fn render(frame: &mut Frame, area: Rect, session: &Session, palette: &Palette) {
    let Some(location) = session.location() else {
        render_empty(frame, area, palette);
        return;
    };

    let title = match current_conditions(session) {
        Some(conditions) => format!(" {}  {} ", location.display_name, conditions),
        None => format!(" {} ", location.display_name),
    };
    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.header))
        .title(Span::styled(
            title,
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // KPIs
            Constraint::Length(5), // Day cards
            Constraint::Length(6), // Selected day chart
            Constraint::Min(3),    // Hourly table
        ])
        .split(inner);

    render_kpis(frame, chunks[0], session, palette);
    render_day_cards(frame, chunks[1], session, palette);
    render_day_chart(frame, chunks[2], session, palette);
    render_hourly_table(frame, chunks[3], session, palette);
}

fn render_empty(frame: &mut Frame, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.dim_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(2),
            Constraint::Percentage(45),
        ])
        .split(inner);

    let lines = vec![
        Line::from(Span::styled(EMPTY_PROMPT, palette.header_style())),
        Line::from(Span::styled(
            "Press / to type a name, or Enter on a favorite",
            palette.dim_style(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[1],
    );
}

fn render_kpis(frame: &mut Frame, area: Rect, session: &Session, palette: &Palette) {
    let kpis = kpis(session);
    if kpis.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = kpis
        .iter()
        .map(|_| Constraint::Ratio(1, kpis.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (kpi, column) in kpis.iter().zip(columns.iter()) {
        frame.render_widget(Paragraph::new(kpi_lines(kpi, palette)), *column);
    }
}

fn kpi_lines(kpi: &Kpi, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(kpi.label, palette.dim_style())),
        Line::from(Span::styled(
            kpi.value.clone(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(detail) = &kpi.detail {
        lines.push(Line::from(Span::styled(detail.clone(), palette.dim_style())));
    }
    lines
}

fn render_day_cards(frame: &mut Frame, area: Rect, session: &Session, palette: &Palette) {
    let cards = session.day_cards();
    let block = Block::default()
        .title(Span::styled(" 7-Day Forecast (←/→) ", palette.header_style()))
        .borders(Borders::TOP);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if cards.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (i, (card, column)) in cards.iter().zip(columns.iter()).enumerate() {
        let selected = i == session.selected_day();
        frame.render_widget(
            Paragraph::new(day_card_lines(card, session.units, selected, palette)),
            *column,
        );
    }
}

fn day_card_lines(
    card: &DayCard,
    units: Units,
    selected: bool,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let label_style = if selected {
        palette.selected_style()
    } else {
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD)
    };
    let marker = if selected { "▸" } else { " " };

    vec![
        Line::from(Span::styled(format!("{}{}", marker, card.label), label_style)),
        Line::from(Span::styled(
            format!(" {} {}", card.weather.icon, card.weather.label),
            palette.text_style(),
        )),
        Line::from(vec![
            Span::raw(" "),
            card_temperature(card.temperature_max, units, palette),
            Span::styled(" / ", palette.dim_style()),
            card_temperature(card.temperature_min, units, palette),
        ]),
    ]
}

fn card_temperature(celsius: Option<f64>, units: Units, palette: &Palette) -> Span<'static> {
    Span::styled(
        or_unavailable(celsius, |t| format!("{:.0}°", units.temperature(t))),
        value_color(celsius, palette),
    )
}

/// Temperature color for a reading, dimmed when it is missing
fn value_color(celsius: Option<f64>, palette: &Palette) -> Style {
    Style::default().fg(celsius.map(temperature_color).unwrap_or(palette.dim))
}

fn render_day_chart(frame: &mut Frame, area: Rect, session: &Session, palette: &Palette) {
    let label = session
        .selected_date()
        .map(|d| d.format("%a %d %b").to_string())
        .unwrap_or_default();
    let block = Block::default()
        .title(Span::styled(
            format!(" Hourly Weather: {} ", label),
            palette.header_style(),
        ))
        .borders(Borders::TOP);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let hours = session.selected_day_hours();
    if hours.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                NO_HOURLY_DATA,
                Style::default().fg(palette.error),
            )),
            inner,
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let units = session.units;
    let temperature: Vec<Option<f64>> = hours
        .iter()
        .map(|h| h.temperature.map(|t| units.temperature(t)))
        .collect();
    let feels_like: Vec<Option<f64>> = hours
        .iter()
        .map(|h| h.apparent_temperature.map(|t| units.temperature(t)))
        .collect();
    let humidity: Vec<Option<f64>> = hours.iter().map(|h| h.relative_humidity).collect();
    let wind: Vec<Option<f64>> = hours
        .iter()
        .map(|h| h.wind_speed.map(|s| units.speed(s)))
        .collect();

    // Temperature and feels-like share one scale so they can be compared
    let (low, high) = temperature
        .iter()
        .chain(feels_like.iter())
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });

    let series = [
        (
            "Temp",
            HourlySparkline::new(&temperature)
                .range(low, high)
                .style(Style::default().fg(palette.temperature)),
            summary(&temperature, units.temperature_label()),
        ),
        (
            "Feels",
            HourlySparkline::new(&feels_like)
                .range(low, high)
                .style(Style::default().fg(palette.feels_like)),
            summary(&feels_like, units.temperature_label()),
        ),
        (
            "Humid",
            HourlySparkline::new(&humidity)
                .range(0.0, 100.0)
                .style(Style::default().fg(palette.header)),
            summary(&humidity, "%"),
        ),
        (
            "Wind",
            HourlySparkline::new(&wind).style(Style::default().fg(palette.wind)),
            summary(&wind, units.speed_label()),
        ),
    ];

    for ((name, sparkline, range), row) in series.into_iter().zip(rows.iter()) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(7),
                Constraint::Length(hours.len() as u16 + 1),
                Constraint::Min(0),
            ])
            .split(*row);
        frame.render_widget(
            Paragraph::new(Span::styled(name, palette.dim_style())),
            columns[0],
        );
        frame.render_widget(sparkline, columns[1]);
        frame.render_widget(
            Paragraph::new(Span::styled(range, palette.dim_style())),
            columns[2],
        );
    }
}

/// "min-max unit" label for a chart row, ignoring missing hours
fn summary(values: &[Option<f64>], unit: &str) -> String {
    let (low, high) = values
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if low > high {
        return UNAVAILABLE.to_string();
    }
    format!("{:.0}-{:.0} {}", low, high, unit)
}

fn render_hourly_table(frame: &mut Frame, area: Rect, session: &Session, palette: &Palette) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Hourly Data (next {} h) ", HOURLY_TABLE_ROWS),
            palette.header_style(),
        ))
        .borders(Borders::TOP);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(bundle) = session.forecast() else {
        return;
    };
    let units = session.units;

    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{:<17}{:>10}{:>10}{:>10}{:>12}",
            "Time", "Temp", "Feels", "Humidity", "Wind"
        ),
        palette.dim_style().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(
        hourly_rows(&bundle.hourly, HOURLY_TABLE_ROWS)
            .iter()
            .map(|point| hourly_line(point, units, palette)),
    );

    frame.render_widget(Paragraph::new(lines), inner);
}

fn hourly_line(point: &HourlyPoint, units: Units, palette: &Palette) -> Line<'static> {
    let short_temperature =
        |t: f64| format!("{:.1}{}", units.temperature(t), units.temperature_label());
    Line::from(vec![
        Span::styled(
            format!("{:<17}", point.time.format("%a %d %H:%M")),
            palette.text_style(),
        ),
        Span::styled(
            format!("{:>10}", or_unavailable(point.temperature, short_temperature)),
            value_color(point.temperature, palette),
        ),
        Span::styled(
            format!(
                "{:>10}",
                or_unavailable(point.apparent_temperature, short_temperature)
            ),
            palette.text_style(),
        ),
        Span::styled(
            format!(
                "{:>10}",
                or_unavailable(point.relative_humidity, |h| format!("{:.0}%", h))
            ),
            palette.text_style(),
        ),
        Span::styled(
            format!(
                "{:>12}",
                or_unavailable(point.wind_speed, |s| units.format_speed(s))
            ),
            Style::default().fg(palette.wind),
        ),
    ])
}

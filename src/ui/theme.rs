//! Color palettes for the light and dark themes

use ratatui::style::{Color, Modifier, Style};

use crate::session::Theme;

/// Colors used across the dashboard for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Primary text
    pub text: Color,
    /// Secondary/dimmed text
    pub dim: Color,
    /// Section headers and borders
    pub header: Color,
    /// Highlighted selection
    pub selected: Color,
    /// Temperature series and values
    pub temperature: Color,
    /// Feels-like series
    pub feels_like: Color,
    /// Wind values
    pub wind: Color,
    /// Error messages
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                text: Color::Black,
                dim: Color::DarkGray,
                header: Color::Blue,
                selected: Color::Magenta,
                temperature: Color::Red,
                feels_like: Color::Rgb(205, 127, 50),
                wind: Color::Blue,
                error: Color::Red,
            },
            Theme::Dark => Palette {
                text: Color::White,
                dim: Color::Gray,
                header: Color::Cyan,
                selected: Color::Yellow,
                temperature: Color::LightRed,
                feels_like: Color::LightYellow,
                wind: Color::LightCyan,
                error: Color::LightRed,
            },
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected)
            .add_modifier(Modifier::BOLD)
    }
}

/// Color for a temperature value in Celsius
pub fn temperature_color(celsius: f64) -> Color {
    if celsius >= 35.0 {
        Color::Red
    } else if celsius >= 25.0 {
        Color::Yellow
    } else if celsius >= 10.0 {
        Color::Green
    } else {
        Color::Cyan
    }
}

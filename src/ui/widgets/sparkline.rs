//! Hourly sparkline widget for inline visualization

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Block characters for different levels (8 levels)
const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block per hour, scaled between the smallest and largest value.
///
/// Values may be negative (temperatures below zero). When every value is the
/// same the line is drawn at mid height. Missing hours are left blank.
pub struct HourlySparkline<'a> {
    values: &'a [Option<f64>],
    min: f64,
    max: f64,
    /// Index drawn with `marker_style`
    marker: Option<usize>,
    style: Style,
    marker_style: Style,
}

impl<'a> HourlySparkline<'a> {
    pub fn new(values: &'a [Option<f64>]) -> Self {
        let min = values.iter().flatten().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().flatten().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            values,
            min,
            max,
            marker: None,
            style: Style::default().fg(Color::Cyan),
            marker_style: Style::default().fg(Color::Yellow),
        }
    }

    /// Scales against a fixed range instead of the values' own extremes
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn marker(mut self, index: usize) -> Self {
        self.marker = Some(index);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn marker_style(mut self, style: Style) -> Self {
        self.marker_style = style;
        self
    }

    fn value_to_block(&self, value: f64) -> char {
        let span = self.max - self.min;
        if !span.is_finite() || span <= f64::EPSILON {
            return BLOCKS[3];
        }
        let normalized = ((value - self.min) / span).clamp(0.0, 1.0);
        let index = ((normalized * 7.0).round() as usize).min(7);
        BLOCKS[index]
    }
}

impl<'a> Widget for HourlySparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = area.width as usize;

        for (i, value) in self.values.iter().take(width).enumerate() {
            let Some(value) = value else {
                continue;
            };
            let block = self.value_to_block(*value);
            let x = area.x + i as u16;

            let style = if self.marker == Some(i) {
                self.marker_style
            } else {
                self.style
            };

            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(block).set_style(style);
            }
        }
    }
}

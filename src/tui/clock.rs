//! Live clock shown between the title and the input section.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::colors::CYAN;

/// Display-only clock. The event loop ticks it once per second; it never
/// touches the task store.
pub struct Clock {
    now: DateTime<Local>,
}

impl Clock {
    pub fn new() -> Self {
        Clock { now: Local::now() }
    }

    /// Refresh the displayed time.
    pub fn tick(&mut self) {
        self.now = Local::now();
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                format_clock_time(&self.now),
                Style::default().fg(CYAN).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format_clock_date(&self.now),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let clock = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(clock, area);
    }
}

/// Hours, minutes, and seconds for the big clock line.
pub fn format_clock_time(now: &DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Weekday and calendar date for the line under the clock.
pub fn format_clock_date(now: &DateTime<Local>) -> String {
    now.format("%a, %b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_clock_date, format_clock_time};
    use chrono::{Local, TimeZone};

    #[test]
    fn clock_lines_use_fixed_layouts() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 5).unwrap();
        assert_eq!(format_clock_time(&now), "09:30:05");
        assert_eq!(format_clock_date(&now), "Wed, May 1, 2024");
    }
}

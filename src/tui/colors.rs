//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Headline, clock, active tab, and active input border.
pub const CYAN: Color = Color::Rgb(34, 211, 238);
/// Schedule line under each task.
pub const PALE_CYAN: Color = Color::Rgb(103, 232, 249);
/// Empty remaining-view message.
pub const GREEN: Color = Color::Rgb(74, 222, 128);

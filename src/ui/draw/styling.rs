//! Styling utilities and color schemes
//!
//! This module contains color helpers and style constants used throughout the UI.

use crate::display::{color_index, Elapsed};
use crate::types::NoticeLevel;
use ratatui::style::Color;

/// Tag colors for model names
const TAG_PALETTE: [Color; 15] = [
    Color::Rgb(255, 191, 0),   // amber
    Color::Blue,               // blue
    Color::Cyan,               // cyan
    Color::Green,              // green
    Color::Gray,               // grey
    Color::Rgb(63, 81, 181),   // indigo
    Color::LightBlue,          // light blue
    Color::Rgb(205, 220, 57),  // lime
    Color::Rgb(255, 152, 0),   // orange
    Color::LightMagenta,       // pink
    Color::Magenta,            // purple
    Color::Red,                // red
    Color::Rgb(0, 150, 136),   // teal
    Color::Rgb(156, 39, 176),  // violet
    Color::Yellow,             // yellow
];

/// Stable color for a model name
pub fn model_color(name: &str) -> Color {
    TAG_PALETTE[color_index(name, TAG_PALETTE.len())]
}

pub fn elapsed_color(elapsed: Elapsed) -> Color {
    match elapsed {
        Elapsed::Fast => Color::Green,
        Elapsed::Slow => Color::Rgb(255, 152, 0),
        Elapsed::VerySlow => Color::Red,
    }
}

pub fn stream_color(is_stream: bool) -> Color {
    if is_stream {
        Color::Blue
    } else {
        Color::Magenta
    }
}

pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    }
}

/// Background shared by modals
pub const MODAL_BG: Color = Color::Rgb(30, 30, 30);

/// Dimmed text for hints and placeholders
pub const HINT: Color = Color::Rgb(150, 150, 150);

pub const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

//! src/view/theme.rs
//! ============================================================================
//! # Catppuccin Mocha Theme Color Palette
//!
//! Colors are from the official Catppuccin palette:
//! https://github.com/catppuccin/catppuccin

use ratatui::style::{Color, Modifier, Style};
use tracing::{debug, instrument};

use crate::model::entries::{FileType, UsageLevel};

/// Initialize theme colors - logs color palette information
#[instrument(level = "debug")]
pub fn init_theme() {
    debug!("Initializing Catppuccin Mocha theme");
    debug!("Background: {:?}", BACKGROUND);
    debug!("Foreground: {:?}", FOREGROUND);
}

pub const BACKGROUND: Color = Color::Rgb(30, 30, 46); // Base
pub const CURRENT_LINE: Color = Color::Rgb(69, 71, 90); // Surface1
pub const FOREGROUND: Color = Color::Rgb(205, 214, 244); // Text
pub const COMMENT: Color = Color::Rgb(127, 132, 156); // Overlay1
pub const CYAN: Color = Color::Rgb(137, 220, 235); // Sky
pub const GREEN: Color = Color::Rgb(166, 227, 161); // Green
pub const ORANGE: Color = Color::Rgb(250, 179, 135); // Peach
pub const PINK: Color = Color::Rgb(245, 194, 231); // Pink
pub const PURPLE: Color = Color::Rgb(203, 166, 247); // Mauve
pub const RED: Color = Color::Rgb(243, 139, 168); // Red
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // Yellow

pub fn base_style() -> Style {
    Style::default().bg(BACKGROUND).fg(FOREGROUND)
}

pub fn border_style() -> Style {
    Style::default().fg(COMMENT)
}

pub fn title_style() -> Style {
    Style::default().fg(PURPLE).add_modifier(Modifier::BOLD)
}

pub fn header_style() -> Style {
    Style::default().fg(YELLOW).add_modifier(Modifier::BOLD)
}

pub fn muted_style() -> Style {
    Style::default().fg(COMMENT)
}

pub fn match_style() -> Style {
    Style::default()
        .fg(BACKGROUND)
        .bg(YELLOW)
        .add_modifier(Modifier::BOLD)
}

pub fn error_style() -> Style {
    Style::default().fg(RED).add_modifier(Modifier::BOLD)
}

pub fn file_type_style(file_type: FileType) -> Style {
    match file_type {
        FileType::Directory => Style::default().fg(CYAN),
        FileType::Symlink => Style::default().fg(PINK),
        FileType::File => Style::default().fg(FOREGROUND),
        FileType::Unknown => muted_style(),
    }
}

pub fn usage_style(level: UsageLevel) -> Style {
    let color = match level {
        UsageLevel::Normal => GREEN,
        UsageLevel::Moderate => YELLOW,
        UsageLevel::High => ORANGE,
        UsageLevel::Critical => RED,
    };
    Style::default().fg(color)
}

//! Color and text styling for the list and detail views.
//!
//! Statuses and models get distinct colors; everything collapses to the
//! terminal's default style when colors are disabled.

use crate::model::FinalStatus;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors unconditionally on or off.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

// ===== Styles =====

/// Style palette shared by all widgets in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styles {
    colors: bool,
}

impl Styles {
    /// Palette for the given color configuration.
    pub fn new(config: ColorConfig) -> Self {
        Self {
            colors: config.colors_enabled(),
        }
    }

    fn fg(&self, color: Color) -> Style {
        if self.colors {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    /// Style for a final status: accepted green, rejected red, quit gray.
    pub fn status(&self, status: FinalStatus) -> Style {
        match status {
            FinalStatus::Accepted => self.fg(Color::Green),
            FinalStatus::Rejected => self.fg(Color::Red),
            FinalStatus::Quit => self.fg(Color::DarkGray),
        }
    }

    /// Style for a model tag, by family name.
    pub fn model(&self, model: &str) -> Style {
        let lower = model.to_ascii_lowercase();
        if lower.contains("opus") {
            self.fg(Color::Magenta)
        } else if lower.contains("sonnet") {
            self.fg(Color::Blue)
        } else if lower.contains("haiku") {
            self.fg(Color::Cyan)
        } else {
            Style::default()
        }
    }

    /// Column headers and section titles.
    pub fn header(&self) -> Style {
        self.fg(Color::Gray).add_modifier(Modifier::BOLD)
    }

    /// Highlighted table row. Reversed video without colors.
    pub fn selected_row(&self) -> Style {
        if self.colors {
            Style::default()
                .fg(Color::White)
                .bg(Color::Indexed(57))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::REVERSED)
        }
    }

    /// Secondary text (hints, counts, empty states).
    pub fn muted(&self) -> Style {
        self.fg(Color::DarkGray)
    }

    /// Error messages.
    pub fn error(&self) -> Style {
        self.fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    /// Generated commands and other code-like content.
    pub fn code(&self) -> Style {
        self.fg(Color::Yellow)
    }

    /// Keyboard keys in hints and help.
    pub fn key(&self) -> Style {
        self.fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    /// Border of focused widgets (prompt, help).
    pub fn accent(&self) -> Style {
        self.fg(Color::Cyan)
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

/// Status with its marker: `✓ accepted`, `✗ rejected`, `- quit`.
pub fn status_label(status: FinalStatus) -> String {
    let marker = match status {
        FinalStatus::Accepted => '✓',
        FinalStatus::Rejected => '✗',
        FinalStatus::Quit => '-',
    };
    format!("{marker} {status}")
}

// ===== Tests =====

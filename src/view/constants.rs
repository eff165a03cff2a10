//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

use std::time::Duration;

/// Height of the header line (title and server).
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the filter bar in lines (border + content).
pub const FILTER_BAR_HEIGHT: u16 = 3;

/// Height of the prompt widget in lines (border + input line).
pub const PROMPT_HEIGHT: u16 = 3;

/// Height of the detail tab bar in lines (border + titles).
pub const TAB_BAR_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
///
/// Single line for status text and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Fixed column widths of the log table (Status, Model, Time).
pub const STATUS_COLUMN_WIDTH: u16 = 12;
/// Model column width.
pub const MODEL_COLUMN_WIDTH: u16 = 10;
/// Time column width; fits `YYYY-MM-DD HH:MM:SS`.
pub const TIME_COLUMN_WIDTH: u16 = 20;

/// Lines of iteration history shown before eliding the rest.
pub const MAX_HISTORY_LINES: usize = 5;

/// How long the event loop waits for input before servicing fetches and
/// the search debounce.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

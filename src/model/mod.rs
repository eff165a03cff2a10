//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod filter;
pub mod identifiers;
pub mod key_action;
pub mod log;
pub mod prompt;
pub mod timestamp;

// Re-export for convenience
pub use error::AppError;
pub use filter::{
    date_part, is_valid_date_bound, normalize_date_bound, DateBound, FilterKey, FilterParams,
    SortField, SortOrder, DEFAULT_SORT,
};
pub use identifiers::{InvalidLogId, LogId};
pub use key_action::KeyAction;
pub use log::{
    ContextSources, FinalStatus, Iteration, LogListResponse, LogSummary, Metadata, ModelInput,
    ModelOutput, SessionLog, TmuxInfo, UnknownStatus,
};
pub use prompt::{extract_build_tools, extract_labeled_section};
pub use timestamp::{format_absolute, format_time_ago, TimeDisplay};

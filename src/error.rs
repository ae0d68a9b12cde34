//! Boundary errors. Everything here is detected before the engine runs;
//! once inputs are parsed the reconstruction itself cannot fail.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// A timestamp that is not a valid RFC 3339 instant.
    #[error("invalid timestamp in `{field}`: '{value}' ({reason})")]
    InvalidTimestamp {
        field: String,
        value: String,
        reason: String,
    },

    #[error("unknown IANA timezone '{0}'")]
    UnknownTimezone(String),

    #[error("day_names must list exactly 7 non-empty weekday names (got {0})")]
    InvalidDayNames(usize),
}

impl TimelineError {
    /// Short machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            TimelineError::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
            TimelineError::UnknownTimezone(_) => "UNKNOWN_TIMEZONE",
            TimelineError::InvalidDayNames(_) => "INVALID_DAY_NAMES",
        }
    }
}

pub type Result<T> = std::result::Result<T, TimelineError>;

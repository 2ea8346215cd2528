use thiserror::Error;

/// Errors surfaced by [`crate::DateCache`] construction and formatting.
///
/// Nothing is retried or swallowed internally; a failed render never
/// populates the cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// The format string contains an unsupported or forbidden field, or
    /// fails to parse.
    #[error("invalid format pattern: {0}")]
    InvalidPattern(String),

    /// The instant lies outside the representable calendar range.
    #[error("instant {0} ms is outside the representable range")]
    OutOfRange(i64),

    /// The zone identifier is not an IANA zone name or a fixed offset.
    #[error("unknown time zone: {0}")]
    ZoneUnknown(String),
}

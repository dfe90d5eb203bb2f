/// Result type for race setup.
pub type SlopeResult<T> = Result<T, SlopeError>;

/// Errors raised while setting up a race.
///
/// Ticking a valid race never fails; crashes and finishes are reported
/// through [`crate::RaceStatus`].
#[derive(Debug, thiserror::Error)]
pub enum SlopeError {
    /// A configuration value is out of range.
    #[error("invalid {field}: {reason}")]
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl SlopeError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

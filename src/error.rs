//! Crate error type.

/// Errors surfaced by chain construction and filter configuration.
///
/// Comparison and filtering themselves never fail: only building chains,
/// classifier tables and rule sets can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required argument was missing or malformed (empty parameter name,
    /// unterminated line-pattern placeholder, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A value was rejected by the validation pattern registered for its
    /// parameter name.
    #[error("value {value:?} is not valid for parameter {name:?}")]
    InvalidValue { name: String, value: String },

    /// The rule filter has been sealed and no longer accepts mutations.
    #[error("rule filter is read-only")]
    ReadOnly,

    /// A user-supplied pattern failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Error types for the sounding-bufr crate.
use thiserror::Error;

use crate::keys::Variable;

/// Error type for the crate.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum BufrError {
    /// A variable was reported with two different units in the same message.
    #[error("{variable}: {expected} and {found} are not the same unit")]
    UnitChanged {
        /// The variable with inconsistent units.
        variable: Variable,
        /// The unit recorded first.
        expected: String,
        /// The unit that showed up later.
        found: String,
    },
    /// There is no registered conversion from the recorded unit to the canonical one.
    #[error("{variable}: unit {expected} was expected, but got {found}, conversion not possible")]
    UnexpectedUnit {
        /// The variable that could not be converted.
        variable: Variable,
        /// The canonical unit.
        expected: String,
        /// The unit recorded in the message, or "none".
        found: String,
    },
    /// The message format identifier is not one of the known sounding templates.
    #[error("the bufr message format {0} is not implemented")]
    UnrecognizedMessageFormat(u32),
    /// No message format identifier was found, so the sounding direction is unknown.
    #[error("no bufr message format identifier available")]
    MissingMessageFormat,
}

/// Shorthand for results.
pub type Result<T> = ::std::result::Result<T, BufrError>;

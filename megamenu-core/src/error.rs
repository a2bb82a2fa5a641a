//! Error types of the runtime.
//!
//! Nothing here ever reaches the host page: the controller logs these and
//! degrades to defaults.

use thiserror::Error;

/// Errors raised while reading the menu configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A numeric attribute could not be parsed.
    #[error("Invalid number for data-{key}: {value:?}")]
    InvalidNumber {
        /// Attribute key without the `data-` prefix.
        key: String,
        /// The raw attribute value.
        value: String,
    },

    /// A numeric attribute was negative or not finite.
    #[error("Value out of range for data-{key}: {value}")]
    OutOfRange {
        /// Attribute key without the `data-` prefix.
        key: String,
        /// The parsed value.
        value: f64,
    },

    /// Unknown activator name.
    #[error("Unknown activator: {0:?}")]
    InvalidActivator(String),
}

//! Error types for architecture resolution.

use crate::known::TargetKind;

/// Errors raised while validating a set of requested architectures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArchError {
    /// More identifiers were requested than a build can use.
    #[error("received more than two architectures ({})", .requested.join(", "))]
    TooMany {
        /// Every requested identifier, in request order.
        requested: Vec<String>,
    },

    /// Two different identifiers of the same kind were requested.
    #[error("received more than one {kind} architecture ({})", .conflicting.join(", "))]
    Conflicting {
        /// The kind both identifiers belong to.
        kind: TargetKind,
        /// The conflicting identifiers, sorted alphabetically.
        conflicting: Vec<String>,
    },

    /// The identifier is in neither the CPU nor the GPU table.
    #[error("unknown architecture '{name}'")]
    Unknown {
        /// The offending identifier.
        name: String,
    },
}

/// Result type for architecture operations.
pub type Result<T> = std::result::Result<T, ArchError>;

// error.rs — Error types for label construction.

use thiserror::Error;

/// Errors that can occur while constructing labels.
///
/// These are programmer errors and fail fast at the construction site;
/// they are never produced by the combination operators, which are total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    /// A label was constructed with an empty source set without declaring it.
    #[error("capabilities require at least one source; use `Capabilities::unsourced()` for values with no tracked provenance")]
    EmptySources,

    /// A composite tool source was constructed with an empty tool name.
    #[error("tool source requires a non-empty tool name")]
    EmptyToolName,

    /// A metadata value cannot be represented with the structural
    /// equality/hash contract the label requires.
    #[error("metadata value cannot be represented: {reason}")]
    Metadata { reason: String },
}

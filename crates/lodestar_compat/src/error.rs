//! Error types for schema rewriting.

use lodestar_schema::DefaultValueError;

/// A schema that cannot be rewritten at all.
///
/// Unsupported constructs are never errors; they are narrowed to strings.
/// These variants cover input trees that cannot be traversed.
#[derive(Debug, thiserror::Error)]
pub enum CompatError {
    /// A computed default value failed to evaluate.
    #[error("failed to evaluate default value: {0}")]
    DefaultValue(#[from] DefaultValueError),

    /// A union with fewer than two variants.
    #[error("union must have at least two variants, found {found}")]
    DegenerateUnion {
        /// Number of variants present.
        found: usize,
    },
}

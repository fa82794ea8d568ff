//! Error types for schema construction and import.

/// A computed default value could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("default value unavailable: {0}")]
pub struct DefaultValueError(String);

impl DefaultValueError {
    /// Creates an error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Errors converting a JSON Schema document into a schema tree.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The document (or a subschema) is neither an object nor a boolean.
    #[error("expected a schema object at '{path}', found {found}")]
    NotASchema {
        /// JSON pointer of the offending value.
        path: String,
        /// JSON type that was found.
        found: &'static str,
    },

    /// A keyword holds a value of the wrong JSON type.
    #[error("invalid '{keyword}' at '{path}': {reason}")]
    InvalidKeyword {
        /// JSON pointer of the schema holding the keyword.
        path: String,
        /// The keyword name.
        keyword: &'static str,
        /// What was wrong.
        reason: String,
    },

    /// A `$ref` points outside the document or to a missing definition.
    #[error("unresolvable $ref '{reference}' at '{path}'")]
    UnresolvedReference {
        /// JSON pointer of the schema holding the reference.
        path: String,
        /// The reference string.
        reference: String,
    },

    /// The schema could not be serialized to JSON.
    #[error("failed to serialize schema: {0}")]
    Serialization(#[from] serde_json::Error),
}

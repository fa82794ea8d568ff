//! Error types for extraction.

use lodestar_models::llm::GenerationError;

/// Errors building or formatting a [`PromptTemplate`](crate::PromptTemplate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// The template text does not contain a declared variable.
    #[error("template does not reference variable `{{{name}}}`")]
    UnusedVariable {
        /// The declared variable.
        name: String,
    },

    /// No value was supplied for a declared variable.
    #[error("no value for template variable `{name}`")]
    MissingValue {
        /// The declared variable.
        name: String,
    },
}

/// Errors from an extractor.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// A prompt template was invalid.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The model request failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}

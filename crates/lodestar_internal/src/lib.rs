//! # Lodestar Internal Library
//!
//! Re-exports the core Lodestar crates for convenience.

/// Schema trees, checks and JSON Schema import.
pub use lodestar_schema;

/// Model descriptors and the LLM provider interface.
pub use lodestar_models;

/// Tool parameter metadata.
pub use lodestar_tools;

/// Provider schema compatibility layers.
pub use lodestar_compat;

/// LLM-backed document metadata extraction.
pub use lodestar_extract;

/// Logging setup.
pub use lodestar_core;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use lodestar_compat::providers::{OpenAiCompat, OpenAiReasoningCompat, PassthroughCompat};
    pub use lodestar_compat::{
        CompatError, CompatOutput, CompatRegistry, SchemaCompatLayer, UnionPolicy,
    };
    pub use lodestar_core::{TracingConfig, TracingFormat};
    pub use lodestar_extract::{DocumentNode, ExtractError, ExtractedTitle, TitleExtractor};
    pub use lodestar_models::llm::{
        GenerationError, GenerationRequest, GenerationResponse, Llm, LlmProvider, ToolDefinition,
    };
    pub use lodestar_models::{ModelDescriptor, ModelRegistry};
    pub use lodestar_schema::{SchemaKind, SchemaNode, TargetDialect};
    pub use lodestar_tools::{FunctionMetadata, ParameterInfo};
}

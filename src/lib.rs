//! Provider-compatible tool and structured-output schemas for LLM
//! applications.
//!
//! Describe tool arguments and output shapes once as a
//! [`SchemaNode`](prelude::SchemaNode) tree, then let a
//! [`CompatRegistry`](prelude::CompatRegistry) rewrite it into what the
//! target model accepts.

pub use lodestar_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use lodestar_internal::prelude::*;
}

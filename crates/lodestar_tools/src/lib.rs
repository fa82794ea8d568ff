//! Tool parameter metadata for Lodestar.
//!
//! Tools describe their arguments with [`FunctionMetadata`], which assembles
//! an object [`SchemaNode`](lodestar_schema::SchemaNode) from individual
//! [`ParameterInfo`]s and turns it into a
//! [`ToolDefinition`](lodestar_models::llm::ToolDefinition). The definition
//! holds the authored schema; a compatibility layer rewrites it for the
//! target model before the request is sent.

pub mod schema;

pub use schema::{FunctionMetadata, ParameterInfo};

//! Model descriptors and the LLM provider interface for Lodestar.
//!
//! Schema rewriting branches on a [`ModelDescriptor`]: which provider serves
//! the model, the model id, and whether it supports structured outputs.
//! Handles obtained from the [`ModelRegistry`] carry their descriptor so a
//! caller can pick a schema layer before sending a request.
//!
//! # Example
//!
//! ```ignore
//! use lodestar_models::ModelRegistry;
//! use lodestar_models::llm::GenerationRequest;
//!
//! let mut registry = ModelRegistry::new();
//! registry.register_llm_provider("openai", Arc::new(my_provider));
//!
//! let llm = registry.llm("openai/gpt-4o")?;
//! assert_eq!(llm.descriptor().model_id, "gpt-4o");
//!
//! let response = llm.generate(GenerationRequest::new("Hello!")).await?;
//! ```

pub mod descriptor;
pub mod error;
pub mod llm;
mod registry;

pub use descriptor::ModelDescriptor;
pub use error::CreateModelError;
pub use registry::ModelRegistry;

//! LLM generation capabilities.
//!
//! This module provides the provider trait, the model handle and the
//! request/response types used by tool calling and structured outputs.

mod error;
mod model;
mod provider;
mod types;

pub use error::GenerationError;
pub use model::Llm;
pub use provider::LlmProvider;
pub use types::{
    AssistantBlock, GenerationRequest, GenerationResponse, Message, ToolCall, ToolChoice,
    ToolDefinition, ToolFunction, Usage,
};

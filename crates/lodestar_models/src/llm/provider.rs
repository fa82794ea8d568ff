//! The [`LlmProvider`] trait for LLM model providers.

use super::error::GenerationError;
use super::types::{GenerationRequest, GenerationResponse};
use async_trait::async_trait;

/// Trait implemented by LLM providers for text generation.
///
/// Lodestar ships no transport; hosts implement this trait over their own
/// client and register it with a [`ModelRegistry`](crate::ModelRegistry).
#[async_trait]
pub trait LlmProvider: Send + Sync + 'static {
    /// Sends a generation request to the provider.
    ///
    /// # Arguments
    ///
    /// * `model` - The model name on which to perform generation
    /// * `request` - The generation request
    async fn generate(
        &self,
        model: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;

    /// Whether `model` accepts strict structured-output schemas.
    ///
    /// Used to fill [`ModelDescriptor::supports_structured_outputs`](crate::ModelDescriptor)
    /// for handles created by the registry.
    fn supports_structured_outputs(&self, _model: &str) -> bool {
        false
    }
}

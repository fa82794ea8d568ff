//! LLM handle for generation requests.

use super::error::GenerationError;
use super::provider::LlmProvider;
use super::types::{GenerationRequest, GenerationResponse};
use crate::descriptor::ModelDescriptor;
use std::sync::Arc;

/// An LLM handle for making generation requests.
///
/// Created via [`ModelRegistry::llm()`](crate::ModelRegistry::llm), or
/// directly with [`Llm::new`] when no registry is involved.
#[derive(Clone)]
pub struct Llm {
    provider: Arc<dyn LlmProvider>,
    descriptor: ModelDescriptor,
}

impl core::fmt::Debug for Llm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Llm")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl Llm {
    /// Creates a handle for `model_id` served by `provider`.
    ///
    /// Structured-output support is taken from
    /// [`LlmProvider::supports_structured_outputs`].
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        provider_name: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        let model_id = model_id.into();
        let supported = provider.supports_structured_outputs(&model_id);
        let descriptor =
            ModelDescriptor::new(provider_name, model_id).with_structured_outputs(supported);
        Self {
            provider,
            descriptor,
        }
    }

    /// Sends a generation request to the model.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] if the request fails.
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.provider
            .generate(&self.descriptor.model_id, request)
            .await
    }

    /// Returns the identity and capabilities of the model.
    #[must_use]
    pub fn descriptor(&self) -> &ModelDescriptor {
        &self.descriptor
    }

    /// Returns the model name (without provider prefix).
    #[must_use]
    pub fn model_name(&self) -> &str {
        &self.descriptor.model_id
    }
}

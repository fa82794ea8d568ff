//! Identity and capability record of a model.

use crate::error::CreateModelError;
use serde::{Deserialize, Serialize};

/// Which model a request targets and what it can do.
///
/// Descriptors are plain values supplied by the caller. Nothing in Lodestar
/// mutates one after construction.
///
/// ```
/// use lodestar_models::ModelDescriptor;
///
/// let model = ModelDescriptor::parse("openai/o3-mini").unwrap();
/// assert_eq!(model.provider, "openai");
/// assert_eq!(model.model_id, "o3-mini");
/// assert!(!model.supports_structured_outputs);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Provider name (e.g. `"openai"`).
    pub provider: String,
    /// Model identifier without the provider prefix (e.g. `"gpt-4o-mini"`).
    pub model_id: String,
    /// Whether the model accepts strict structured-output schemas.
    #[serde(default)]
    pub supports_structured_outputs: bool,
}

impl ModelDescriptor {
    /// Creates a descriptor without structured-output support.
    #[must_use]
    pub fn new(provider: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model_id: model_id.into(),
            supports_structured_outputs: false,
        }
    }

    /// Sets structured-output support.
    #[must_use]
    pub fn with_structured_outputs(mut self, supported: bool) -> Self {
        self.supports_structured_outputs = supported;
        self
    }

    /// Parses a `"provider/model"` identifier.
    ///
    /// Only the first `/` separates the provider, so model ids may contain
    /// slashes themselves.
    ///
    /// # Errors
    ///
    /// Returns [`CreateModelError::InvalidModelId`] when there is no `/` or
    /// either side is empty.
    pub fn parse(id: &str) -> Result<Self, CreateModelError> {
        match id.split_once('/') {
            Some((provider, model)) if !provider.is_empty() && !model.is_empty() => {
                Ok(Self::new(provider, model))
            }
            _ => Err(CreateModelError::InvalidModelId(id.to_string())),
        }
    }
}

impl core::fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.provider, self.model_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_first_slash() {
        let model = ModelDescriptor::parse("openrouter/openai/gpt-4o").unwrap();
        assert_eq!(model.provider, "openrouter");
        assert_eq!(model.model_id, "openai/gpt-4o");
        assert_eq!(model.to_string(), "openrouter/openai/gpt-4o");
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        for id in ["gpt-4o", "/gpt-4o", "openai/", ""] {
            assert!(
                matches!(
                    ModelDescriptor::parse(id),
                    Err(CreateModelError::InvalidModelId(_))
                ),
                "{id} should be rejected"
            );
        }
    }

    #[test]
    fn structured_outputs_flag() {
        let model = ModelDescriptor::new("openai", "gpt-4o").with_structured_outputs(true);
        assert!(model.supports_structured_outputs);
    }
}

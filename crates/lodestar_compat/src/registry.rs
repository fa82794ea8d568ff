//! Layer selection.

use crate::error::CompatError;
use crate::layer::SchemaCompatLayer;
use crate::providers::{OpenAiCompat, OpenAiReasoningCompat, PassthroughCompat};
use lodestar_models::ModelDescriptor;
use lodestar_models::llm::{GenerationRequest, ToolDefinition};
use lodestar_schema::{SchemaNode, TargetDialect};

/// Result of rewriting a schema through a registry.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatOutput {
    /// Name of the layer that produced `schema`.
    pub layer: &'static str,
    /// Dialect `schema` should be rendered in.
    pub target: TargetDialect,
    /// The rewritten tree.
    pub schema: SchemaNode,
}

/// Ordered set of layers with a fallback.
///
/// [`select`](Self::select) returns the first layer whose
/// [`should_apply`](SchemaCompatLayer::should_apply) holds, in registration
/// order, and the fallback otherwise.
///
/// ```
/// use lodestar_compat::CompatRegistry;
/// use lodestar_models::ModelDescriptor;
///
/// let registry = CompatRegistry::with_defaults();
/// let model = ModelDescriptor::new("openai", "o3-mini");
/// assert_eq!(registry.select(&model).name(), "openai-reasoning");
///
/// let other = ModelDescriptor::new("anthropic", "claude-sonnet-4");
/// assert_eq!(registry.select(&other).name(), "passthrough");
/// ```
pub struct CompatRegistry {
    layers: Vec<Box<dyn SchemaCompatLayer>>,
    fallback: Box<dyn SchemaCompatLayer>,
}

impl core::fmt::Debug for CompatRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CompatRegistry")
            .field("layers", &self.layer_names())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl Default for CompatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CompatRegistry {
    /// Creates a registry with no layers and a pass-through fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            fallback: Box::new(PassthroughCompat),
        }
    }

    /// Creates a registry with the built-in `OpenAI` layers.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .with_layer(OpenAiReasoningCompat)
            .with_layer(OpenAiCompat)
    }

    /// Appends a layer with lower priority than those already registered.
    #[must_use]
    pub fn with_layer(mut self, layer: impl SchemaCompatLayer + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Replaces the fallback layer.
    #[must_use]
    pub fn with_fallback(mut self, layer: impl SchemaCompatLayer + 'static) -> Self {
        self.fallback = Box::new(layer);
        self
    }

    /// Names of the registered layers in priority order, without the fallback.
    #[must_use]
    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }

    /// Returns the layer to use for `model`.
    #[must_use]
    pub fn select(&self, model: &ModelDescriptor) -> &dyn SchemaCompatLayer {
        let layer = self
            .layers
            .iter()
            .find(|layer| layer.should_apply(model))
            .unwrap_or(&self.fallback)
            .as_ref();
        tracing::debug!(layer = layer.name(), model = %model, "selected schema compat layer");
        layer
    }

    /// Rewrites `root` with the layer selected for `model`.
    ///
    /// # Errors
    ///
    /// Propagates the layer's [`CompatError`].
    pub fn apply(
        &self,
        model: &ModelDescriptor,
        root: &SchemaNode,
    ) -> Result<CompatOutput, CompatError> {
        let layer = self.select(model);
        Ok(CompatOutput {
            layer: layer.name(),
            target: layer.schema_target(),
            schema: layer.transform(model, root)?,
        })
    }

    /// Rewrites a tool's parameters for `model` and records the dialect.
    ///
    /// # Errors
    ///
    /// Propagates the layer's [`CompatError`].
    pub fn apply_tool(
        &self,
        model: &ModelDescriptor,
        mut tool: ToolDefinition,
    ) -> Result<ToolDefinition, CompatError> {
        let output = self.apply(model, &tool.parameters)?;
        tool.parameters = output.schema;
        tool.dialect = Some(output.target);
        Ok(tool)
    }

    /// Rewrites every tool and the output schema of a request for `model`.
    ///
    /// # Errors
    ///
    /// Propagates the first [`CompatError`].
    pub fn apply_request(
        &self,
        model: &ModelDescriptor,
        mut request: GenerationRequest,
    ) -> Result<GenerationRequest, CompatError> {
        if let Some(tools) = request.tools.take() {
            request.tools = Some(
                tools
                    .into_iter()
                    .map(|tool| self.apply_tool(model, tool))
                    .collect::<Result<_, _>>()?,
            );
        }

        if let Some(schema) = &request.output_schema {
            let output = self.apply(model, schema)?;
            request.output_schema = Some(output.schema);
            request.output_dialect = Some(output.target);
        }

        Ok(request)
    }
}

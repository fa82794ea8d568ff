//! Schema types for tool parameter metadata.
//!
//! Provides [`ParameterInfo`] for individual parameter schemas and
//! [`FunctionMetadata`] for building complete tool definitions whose
//! arguments are an object [`SchemaNode`].

use lodestar_models::llm::ToolDefinition;
use lodestar_schema::{ImportError, SchemaNode, import};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Schema information for a single tool parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name.
    pub name: String,
    /// Parameter description (typically from doc comments).
    pub description: Option<String>,
    /// Schema for this parameter's type.
    pub schema: SchemaNode,
    /// Whether this parameter is required.
    pub required: bool,
    /// Custom name for the schema property (overrides `name`).
    pub schema_name: Option<String>,
    /// Default value for optional parameters.
    pub default_value: Option<serde_json::Value>,
}

impl ParameterInfo {
    /// Creates a new required parameter with the given name and schema.
    pub fn new(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self {
            name: name.into(),
            description: None,
            schema,
            required: true,
            schema_name: None,
            default_value: None,
        }
    }

    /// Creates a required parameter whose schema is derived from `T`.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] if the derived schema cannot be imported.
    pub fn of<T: JsonSchema>(name: impl Into<String>) -> Result<Self, ImportError> {
        Ok(Self::new(name, import::schema_for::<T>()?))
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the parameter as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets a default value; a parameter with a default is never required.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets the property name used in the schema.
    #[must_use]
    pub fn with_schema_name(mut self, schema_name: impl Into<String>) -> Self {
        self.schema_name = Some(schema_name.into());
        self
    }

    fn property_name(&self) -> &str {
        self.schema_name.as_ref().unwrap_or(&self.name)
    }

    fn property_schema(&self) -> SchemaNode {
        let mut node = self.schema.clone();
        if let Some(description) = &self.description {
            node.description = Some(description.clone());
        }

        let omittable = !self.required || self.default_value.is_some();
        if omittable && !node.is_optional() {
            node = node.optional();
        }

        match &self.default_value {
            Some(default) => node.with_default(default.clone()),
            None => node,
        }
    }
}

/// Metadata describing a tool function's name, description, and parameters.
///
/// Used to build [`ToolDefinition`] instances.
///
/// ```
/// use lodestar_schema::SchemaNode;
/// use lodestar_tools::{FunctionMetadata, ParameterInfo};
///
/// let metadata = FunctionMetadata::new("search")
///     .with_description("Search for documents matching a query.")
///     .add_parameter(ParameterInfo::new("query", SchemaNode::string()))
///     .add_parameter(ParameterInfo::new("limit", SchemaNode::integer()).with_default(10));
///
/// let object = metadata.schema().as_object().unwrap();
/// assert!(object.required.contains("query"));
/// assert!(!object.required.contains("limit"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    /// Function name.
    pub name: String,
    /// Function description.
    pub description: Option<String>,
    /// LLM-visible parameters.
    pub parameters: Vec<ParameterInfo>,
    /// Object schema derived from `parameters`. Use [`Self::schema()`] to read.
    schema: SchemaNode,
}

impl FunctionMetadata {
    /// Creates new metadata with the given function name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: Vec::new(),
            schema: SchemaNode::object(),
        }
    }

    /// Sets the function description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a parameter and rebuilds the schema.
    #[must_use]
    pub fn add_parameter(mut self, param: ParameterInfo) -> Self {
        self.parameters.push(param);
        self.rebuild_schema();
        self
    }

    /// Returns the object schema for the function's parameters.
    #[must_use]
    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    /// Converts this metadata into a [`ToolDefinition`] with authored
    /// (not yet provider-compatible) parameters.
    pub fn to_tool_definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            self.name.clone(),
            self.description.clone().unwrap_or_default(),
            self.schema.clone(),
        )
    }

    fn rebuild_schema(&mut self) {
        self.schema = self
            .parameters
            .iter()
            .fold(SchemaNode::object(), |object, param| {
                object.field(param.property_name(), param.property_schema())
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestar_schema::{NodeKind, SchemaKind};
    use serde_json::json;

    #[test]
    fn required_and_optional_parameters() {
        let metadata = FunctionMetadata::new("forecast")
            .add_parameter(ParameterInfo::new("city", SchemaNode::string()))
            .add_parameter(ParameterInfo::new("days", SchemaNode::integer()).optional());

        let object = metadata.schema().as_object().unwrap();
        let required: Vec<_> = object.required.iter().map(String::as_str).collect();
        assert_eq!(required, ["city"]);
        assert_eq!(object.fields["days"].node_kind(), NodeKind::Optional);
    }

    #[test]
    fn default_wraps_optional() {
        let metadata = FunctionMetadata::new("search").add_parameter(
            ParameterInfo::new("limit", SchemaNode::integer())
                .with_description("Max results")
                .with_default(10),
        );

        let limit = &metadata.schema().as_object().unwrap().fields["limit"];
        let SchemaKind::Default { inner, value } = &limit.kind else {
            panic!("expected default, got {limit:?}");
        };
        assert_eq!(value.resolve().unwrap(), json!(10));
        let SchemaKind::Optional { inner } = &inner.kind else {
            panic!("expected optional");
        };
        assert_eq!(inner.description.as_deref(), Some("Max results"));
        assert!(metadata.schema().as_object().unwrap().required.is_empty());
    }

    #[test]
    fn schema_name_overrides_name() {
        let metadata = FunctionMetadata::new("lookup").add_parameter(
            ParameterInfo::new("kind", SchemaNode::string()).with_schema_name("type"),
        );
        let object = metadata.schema().as_object().unwrap();
        assert!(object.fields.contains_key("type"));
        assert!(object.required.contains("type"));
    }

    #[test]
    fn parameter_from_derived_type() {
        let param = ParameterInfo::of::<Vec<String>>("tags").unwrap();
        assert_eq!(param.schema.node_kind(), NodeKind::Array);
    }

    #[test]
    fn tool_definition_is_undialected() {
        let definition = FunctionMetadata::new("noop")
            .with_description("Does nothing")
            .to_tool_definition();
        assert_eq!(definition.name, "noop");
        assert_eq!(definition.description, "Does nothing");
        assert_eq!(definition.dialect, None);
        assert_eq!(definition.parameters, SchemaNode::object());
    }
}

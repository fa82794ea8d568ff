//! Layer selection and request rewriting through [`CompatRegistry`].

use lodestar_compat::notes::narrowed_sentence;
use lodestar_compat::{CompatError, CompatRegistry, SchemaCompatLayer, UnionPolicy};
use lodestar_models::ModelDescriptor;
use lodestar_models::llm::{GenerationRequest, ToolDefinition};
use lodestar_schema::{DefaultValueError, NodeKind, SchemaKind, SchemaNode, TargetDialect};

/// Layer for a hypothetical provider that cannot express unions.
struct NoUnionCompat;

impl SchemaCompatLayer for NoUnionCompat {
    fn name(&self) -> &'static str {
        "no-union"
    }

    fn schema_target(&self) -> TargetDialect {
        TargetDialect::JsonSchema7
    }

    fn should_apply(&self, model: &ModelDescriptor) -> bool {
        model.provider == "acme"
    }

    fn union_policy(&self) -> UnionPolicy {
        UnionPolicy::CastToString
    }
}

fn weather_tool() -> ToolDefinition {
    ToolDefinition::new(
        "get_weather",
        "Current weather for a city",
        SchemaNode::object()
            .field("city", SchemaNode::string().describe("city name"))
            .field("units", SchemaNode::enumeration(["c", "f"]).optional()),
    )
}

#[test]
fn default_layers_are_listed_in_priority_order() {
    let registry = CompatRegistry::with_defaults();
    assert_eq!(registry.layer_names(), ["openai-reasoning", "openai"]);
}

#[test]
fn selects_by_model_family() {
    let registry = CompatRegistry::with_defaults();
    let cases = [
        (ModelDescriptor::new("openai", "o3-mini"), "openai-reasoning"),
        (
            ModelDescriptor::new("openai", "gpt-4o").with_structured_outputs(true),
            "openai-reasoning",
        ),
        (ModelDescriptor::new("openai", "gpt-4o-mini"), "openai"),
        (ModelDescriptor::new("openrouter", "openai/gpt-4"), "openai"),
        (ModelDescriptor::new("anthropic", "claude-sonnet-4"), "passthrough"),
    ];

    for (model, expected) in cases {
        assert_eq!(registry.select(&model).name(), expected, "{model}");
    }
}

#[test]
fn earlier_registration_wins() {
    let model = ModelDescriptor::new("acme", "gpt-like");
    let registry = CompatRegistry::new()
        .with_layer(NoUnionCompat)
        .with_layer(lodestar_compat::providers::PassthroughCompat);
    assert_eq!(registry.select(&model).name(), "no-union");
}

#[test]
fn fallback_can_be_replaced() {
    let registry = CompatRegistry::new().with_fallback(NoUnionCompat);
    let model = ModelDescriptor::new("anthropic", "claude-sonnet-4");
    assert_eq!(registry.select(&model).name(), "no-union");
    assert!(registry.layer_names().is_empty());
}

#[test]
fn unmatched_model_passes_schema_through() {
    let schema = SchemaNode::object().field("data", SchemaNode::any().optional());
    let model = ModelDescriptor::new("anthropic", "claude-sonnet-4");

    let out = CompatRegistry::with_defaults().apply(&model, &schema).unwrap();

    assert_eq!(out.layer, "passthrough");
    assert_eq!(out.target, TargetDialect::JsonSchema7);
    assert_eq!(out.schema, schema);
}

#[test]
fn cast_to_string_policy_narrows_unions() {
    let registry = CompatRegistry::new().with_layer(NoUnionCompat);
    let model = ModelDescriptor::new("acme", "m1");
    let schema = SchemaNode::union(vec![
        SchemaNode::string().describe("a name"),
        SchemaNode::number(),
    ])
    .describe("identifier");

    let out = registry.apply(&model, &schema).unwrap();

    assert_eq!(out.schema.node_kind(), NodeKind::String);
    let description = out.schema.description.unwrap();
    assert!(description.starts_with("identifier\n"), "{description}");
    assert!(description.contains(&narrowed_sentence("union")), "{description}");
    assert!(description.ends_with("<0>: a name"), "{description}");
}

#[test]
fn cast_to_string_union_still_evaluates_defaults() {
    let registry = CompatRegistry::new().with_layer(NoUnionCompat);
    let model = ModelDescriptor::new("acme", "m1");
    let schema = SchemaNode::union(vec![
        SchemaNode::string().with_default_fn(|| Err(DefaultValueError::new("no locale"))),
        SchemaNode::number(),
    ]);

    let err = registry.apply(&model, &schema).unwrap_err();

    assert!(matches!(err, CompatError::DefaultValue(_)));
}

#[test]
fn apply_tool_records_dialect() {
    let model = ModelDescriptor::new("openai", "o4-mini");

    let tool = CompatRegistry::with_defaults()
        .apply_tool(&model, weather_tool())
        .unwrap();

    assert_eq!(tool.name, "get_weather");
    assert_eq!(tool.dialect, Some(TargetDialect::OpenApi3));
    let object = tool.parameters.as_object().unwrap();
    assert!(object.fields["units"].nullable);
    assert_eq!(object.fields["units"].node_kind(), NodeKind::Enum);
    assert!(!object.required.contains("units"));
}

#[test]
fn legacy_tool_optional_enum_becomes_nullable_string() {
    let model = ModelDescriptor::new("openai", "gpt-4");

    let tool = CompatRegistry::with_defaults()
        .apply_tool(&model, weather_tool())
        .unwrap();

    assert_eq!(tool.dialect, Some(TargetDialect::JsonSchema7));
    let units = &tool.parameters.as_object().unwrap().fields["units"];
    assert!(units.nullable);
    assert_eq!(units.kind, SchemaKind::String { checks: vec![] });
}

#[test]
fn apply_request_rewrites_tools_and_output_schema() {
    let model = ModelDescriptor::new("openai", "o3");
    let request = GenerationRequest::new("What's the weather in Paris?")
        .tool(weather_tool())
        .output_schema(SchemaNode::object().field("summary", SchemaNode::any()));

    let request = CompatRegistry::with_defaults()
        .apply_request(&model, request)
        .unwrap();

    let tools = request.tools.unwrap();
    assert_eq!(tools[0].dialect, Some(TargetDialect::OpenApi3));
    assert_eq!(request.output_dialect, Some(TargetDialect::OpenApi3));
    let output_schema = request.output_schema.unwrap();
    let summary = &output_schema.as_object().unwrap().fields["summary"];
    assert_eq!(summary.node_kind(), NodeKind::String);
}

#[test]
fn apply_request_without_schemas_is_unchanged() {
    let model = ModelDescriptor::new("openai", "gpt-4");
    let request = GenerationRequest::new("hello");

    let out = CompatRegistry::with_defaults()
        .apply_request(&model, request.clone())
        .unwrap();

    assert_eq!(out, request);
}

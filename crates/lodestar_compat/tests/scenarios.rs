//! End-to-end rewrites of concrete schemas.

use lodestar_compat::providers::{OpenAiCompat, OpenAiReasoningCompat};
use lodestar_compat::{CompatError, SchemaCompatLayer};
use lodestar_models::ModelDescriptor;
use lodestar_schema::{
    DefaultValueError, NodeKind, ObjectSchema, SchemaKind, SchemaNode, StringCheck, UnknownKeys,
};
use serde_json::json;

const ANY_SENTENCE: &str = r#"Argument was an "any" type, but you (the LLM) do not support "any", so it was cast to a "string" type"#;

fn structured() -> ModelDescriptor {
    ModelDescriptor::new("openai", "gpt-4o").with_structured_outputs(true)
}

fn nullable(mut node: SchemaNode) -> SchemaNode {
    node.nullable = true;
    node
}

#[test]
fn optional_field_becomes_nullable_and_not_required() {
    let mut object = ObjectSchema::default();
    object
        .fields
        .insert("foo".into(), SchemaNode::string().optional());
    object.required.insert("foo".into());
    let input = SchemaNode::new(SchemaKind::Object(object));

    let out = OpenAiReasoningCompat.transform(&structured(), &input).unwrap();

    let object = out.as_object().unwrap();
    assert_eq!(object.fields["foo"], nullable(SchemaNode::string()));
    assert!(object.required.is_empty());
}

#[test]
fn any_is_cast_to_string_with_sentence() {
    let model = ModelDescriptor::new("openai", "o3-mini");
    let out = OpenAiReasoningCompat
        .transform(&model, &SchemaNode::any().describe("data"))
        .unwrap();
    assert_eq!(
        out,
        SchemaNode::string().describe(format!("data\n{ANY_SENTENCE}"))
    );
}

#[test]
fn any_without_description_has_only_sentence() {
    let out = OpenAiReasoningCompat
        .transform(&structured(), &SchemaNode::any())
        .unwrap();
    assert_eq!(out.description.as_deref(), Some(ANY_SENTENCE));
}

#[test]
fn regex_stripped_for_gpt_4o_mini() {
    let model = ModelDescriptor::new("openai", "gpt-4o-mini");
    let input = SchemaNode::string().regex("^[A-Z]{3}$").describe("code");

    let out = OpenAiCompat.transform(&model, &input).unwrap();

    assert_eq!(out.kind, SchemaKind::String { checks: vec![] });
    assert_eq!(out.description.as_deref(), Some("code\nregex: /^[A-Z]{3}$/"));
}

#[test]
fn default_value_noted_under_every_layer() {
    let input = SchemaNode::number().with_default(5);
    let models: [(ModelDescriptor, &dyn SchemaCompatLayer); 2] = [
        (structured(), &OpenAiReasoningCompat),
        (ModelDescriptor::new("openai", "gpt-4o-mini"), &OpenAiCompat),
    ];

    for (model, layer) in models {
        let out = layer.transform(&model, &input).unwrap();
        assert_eq!(out.node_kind(), NodeKind::Number, "{}", layer.name());
        assert!(
            out.description
                .as_deref()
                .is_some_and(|d| d.contains("default value: 5")),
            "{}: {:?}",
            layer.name(),
            out.description
        );
    }
}

#[test]
fn reasoning_id_selects_only_the_reasoning_layer() {
    let model = ModelDescriptor::new("openai", "o3-mini");
    assert!(OpenAiReasoningCompat.should_apply(&model));
    assert!(!OpenAiCompat.should_apply(&model));
}

#[test]
fn default_descriptions_are_appended_in_order() {
    let input = SchemaNode::string()
        .describe("unit")
        .with_default("celsius")
        .describe("temperature unit");

    let out = OpenAiReasoningCompat.transform(&structured(), &input).unwrap();

    assert_eq!(
        out.description.as_deref(),
        Some("unit\ntemperature unit\ndefault value: \"celsius\"")
    );
}

#[test]
fn defaulted_field_stays_required() {
    let input = SchemaNode::object()
        .field("retries", SchemaNode::integer().with_default(3))
        .field("label", SchemaNode::string().optional().with_default("none"));

    let out = OpenAiReasoningCompat.transform(&structured(), &input).unwrap();
    let object = out.as_object().unwrap();

    let required: Vec<_> = object.required.iter().map(String::as_str).collect();
    assert_eq!(required, ["retries"]);
    assert!(!object.fields["retries"].nullable);
    assert!(object.fields["label"].nullable);
}

#[test]
fn failing_computed_default_is_fatal() {
    let input = SchemaNode::object().field(
        "created_at",
        SchemaNode::string().with_default_fn(|| Err(DefaultValueError::new("clock unavailable"))),
    );

    let err = OpenAiReasoningCompat
        .transform(&structured(), &input)
        .unwrap_err();
    assert!(matches!(err, CompatError::DefaultValue(_)));
}

#[test]
fn failing_default_inside_narrowed_subtree_is_fatal() {
    let bad = SchemaNode::number().with_default_fn(|| Err(DefaultValueError::new("boom")));
    let input = SchemaNode::tuple(vec![bad, SchemaNode::string()]);

    for model in [structured(), ModelDescriptor::new("openai", "o3-mini")] {
        let err = OpenAiReasoningCompat.transform(&model, &input).unwrap_err();
        assert!(matches!(err, CompatError::DefaultValue(_)));
    }

    let err = OpenAiCompat
        .transform(&ModelDescriptor::new("openai", "gpt-4"), &input)
        .unwrap_err();
    assert!(matches!(err, CompatError::DefaultValue(_)));
}

#[test]
fn computed_default_is_evaluated() {
    let input = SchemaNode::integer().with_default_fn(|| Ok(json!(42)));
    let out = OpenAiReasoningCompat.transform(&structured(), &input).unwrap();
    assert_eq!(out.description.as_deref(), Some("default value: 42"));
}

#[test]
fn single_variant_union_is_rejected() {
    let input = SchemaNode::union(vec![SchemaNode::string()]);
    let err = OpenAiCompat
        .transform(&ModelDescriptor::new("openai", "gpt-4"), &input)
        .unwrap_err();
    assert!(matches!(err, CompatError::DegenerateUnion { found: 1 }));
}

#[test]
fn unions_are_preserved_with_rewritten_variants() {
    let input = SchemaNode::union(vec![
        SchemaNode::string().with_check(StringCheck::Email),
        SchemaNode::any(),
    ]);

    let out = OpenAiReasoningCompat.transform(&structured(), &input).unwrap();

    let SchemaKind::Union { variants } = &out.kind else {
        panic!("expected union, got {out:?}");
    };
    assert_eq!(variants[0], SchemaNode::string().describe("email: true"));
    assert_eq!(variants[1], SchemaNode::string().describe(ANY_SENTENCE));
}

#[test]
fn unsupported_kind_keeps_nested_descriptions() {
    let input = SchemaNode::object().field(
        "window",
        SchemaNode::tuple(vec![
            SchemaNode::date().describe("start"),
            SchemaNode::date().describe("end"),
        ])
        .describe("reporting window"),
    );

    let out = OpenAiCompat
        .transform(&ModelDescriptor::new("openai", "gpt-4"), &input)
        .unwrap();

    let window = &out.as_object().unwrap().fields["window"];
    assert_eq!(window.node_kind(), NodeKind::String);
    assert_eq!(
        window.description.as_deref(),
        Some(concat!(
            "reporting window\n",
            "Argument was a \"tuple\" type, but you (the LLM) do not support \"tuple\", so it was cast to a \"string\" type\n",
            "original type: [date, date]\n",
            "[0]: start\n",
            "[1]: end",
        ))
    );
}

#[test]
fn unknown_constructs_degrade_under_every_layer() {
    let input = SchemaNode::unsupported("intersection").describe("merged settings");

    let layers: [&dyn SchemaCompatLayer; 2] = [&OpenAiReasoningCompat, &OpenAiCompat];
    for layer in layers {
        let out = layer
            .transform(&ModelDescriptor::new("openai", "gpt-4"), &input)
            .unwrap();
        assert_eq!(
            out,
            SchemaNode::string().describe(
                "merged settings\nArgument was an \"intersection\" type, but you (the LLM) do not support \"intersection\", so it was cast to a \"string\" type"
            )
        );
    }
}

#[test]
fn object_metadata_is_preserved() {
    let input = SchemaNode::object()
        .field("b", SchemaNode::boolean())
        .field("a", SchemaNode::enumeration(["x", "y"]))
        .field("c", SchemaNode::literal(3))
        .unknown_keys(UnknownKeys::Strict)
        .describe("settings");

    let out = OpenAiReasoningCompat.transform(&structured(), &input).unwrap();
    assert_eq!(out, input);
}

use crate::detect;
use crate::layer::SchemaCompatLayer;
use lodestar_models::ModelDescriptor;
use lodestar_schema::{NodeKind, NumberCheckKind, StringCheckKind, TargetDialect};

/// Inner kinds an optional may wrap under [`OpenAiCompat`].
const OPTIONAL_INNER_KINDS: &[NodeKind] = &[
    NodeKind::Object,
    NodeKind::Array,
    NodeKind::Union,
    NodeKind::String,
    NodeKind::Never,
    NodeKind::Undefined,
    NodeKind::Tuple,
];

/// Layer for `OpenAI` models without structured-output support.
///
/// Function calling on these models accepts most of JSON Schema draft 7, so
/// numeric bounds and dates are kept. Emoji checks are rejected everywhere
/// and regex patterns on `gpt-4o-mini`. Optionals of other inner kinds are
/// narrowed to nullable strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiCompat;

impl SchemaCompatLayer for OpenAiCompat {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn schema_target(&self) -> TargetDialect {
        TargetDialect::JsonSchema7
    }

    fn should_apply(&self, model: &ModelDescriptor) -> bool {
        !model.supports_structured_outputs
            && !detect::is_openai_reasoning_model(&model.model_id)
            && detect::mentions_openai(model)
    }

    fn degraded_string_checks(&self, model: &ModelDescriptor) -> Vec<StringCheckKind> {
        let mut kinds = vec![StringCheckKind::Emoji];
        if detect::is_gpt_4o_mini(&model.model_id) {
            kinds.push(StringCheckKind::Regex);
        }
        kinds
    }

    fn degraded_number_checks(&self, _model: &ModelDescriptor) -> Vec<NumberCheckKind> {
        Vec::new()
    }

    fn degrades_dates(&self, _model: &ModelDescriptor) -> bool {
        false
    }

    fn supports_kind(&self, kind: NodeKind) -> bool {
        !matches!(
            kind,
            NodeKind::Never | NodeKind::Undefined | NodeKind::Tuple | NodeKind::Unsupported
        )
    }

    fn optional_inner_kinds(&self) -> Option<&'static [NodeKind]> {
        Some(OPTIONAL_INNER_KINDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestar_schema::{SchemaKind, SchemaNode, StringCheck};

    #[test]
    fn applicability() {
        let layer = OpenAiCompat;
        assert!(layer.should_apply(&ModelDescriptor::new("openai", "gpt-3.5-turbo")));
        assert!(!layer.should_apply(
            &ModelDescriptor::new("openai", "gpt-4o").with_structured_outputs(true)
        ));
        assert!(!layer.should_apply(&ModelDescriptor::new("openai", "o3-mini")));
        assert!(!layer.should_apply(&ModelDescriptor::new("mistral", "mistral-large")));
    }

    #[test]
    fn regex_kept_outside_mini_family() {
        let model = ModelDescriptor::new("openai", "gpt-4o");
        let schema = SchemaNode::string().regex("^[a-z]+$").describe("slug");
        let out = OpenAiCompat.transform(&model, &schema).unwrap();
        assert_eq!(out, schema);
    }

    #[test]
    fn emoji_degraded_for_every_model() {
        let model = ModelDescriptor::new("openai", "gpt-4-turbo");
        let schema = SchemaNode::string()
            .with_check(StringCheck::Emoji)
            .max_length(1);
        let out = OpenAiCompat.transform(&model, &schema).unwrap();
        assert_eq!(
            out.kind,
            SchemaKind::String {
                checks: vec![StringCheck::MaxLength { value: 1 }]
            }
        );
        assert_eq!(out.description.as_deref(), Some("emoji: true"));
    }

    #[test]
    fn optional_number_becomes_nullable_string() {
        let model = ModelDescriptor::new("openai", "gpt-4-turbo");
        let schema = SchemaNode::object().field(
            "limit",
            SchemaNode::integer().min(1.0).describe("page size").optional(),
        );

        let out = OpenAiCompat.transform(&model, &schema).unwrap();
        let object = out.as_object().unwrap();
        let limit = &object.fields["limit"];
        assert!(object.required.is_empty());
        assert!(limit.nullable);
        assert_eq!(limit.node_kind(), NodeKind::String);
        assert_eq!(
            limit.description.as_deref(),
            Some(concat!(
                "page size\n",
                "Argument was an optional \"number\" type, but you (the LLM) do not support optional \"number\", so it was cast to a nullable \"string\" type\n",
                "original type: number (integer: true, minimum: 1)",
            ))
        );
    }

    #[test]
    fn optional_string_unwraps() {
        let model = ModelDescriptor::new("openai", "gpt-4-turbo");
        let out = OpenAiCompat
            .transform(&model, &SchemaNode::string().optional())
            .unwrap();
        let mut expected = SchemaNode::string();
        expected.nullable = true;
        assert_eq!(out, expected);
    }

    #[test]
    fn dates_and_bounds_kept() {
        let model = ModelDescriptor::new("openai", "gpt-4-turbo");
        let schema = SchemaNode::object()
            .field("when", SchemaNode::date())
            .field("count", SchemaNode::integer().min(0.0).max(5.0));
        assert_eq!(OpenAiCompat.transform(&model, &schema).unwrap(), schema);
    }
}

use crate::detect;
use crate::layer::SchemaCompatLayer;
use lodestar_models::ModelDescriptor;
use lodestar_schema::{NodeKind, TargetDialect};

/// Layer for `OpenAI` models that take strict structured-output schemas,
/// including the reasoning tier.
///
/// Strict mode needs every field present, so optionals become nullable
/// required fields. Numeric bounds, string formats, array lengths and dates
/// are moved into descriptions, and `any`, tuples, `never` and `undefined`
/// are narrowed to strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiReasoningCompat;

impl SchemaCompatLayer for OpenAiReasoningCompat {
    fn name(&self) -> &'static str {
        "openai-reasoning"
    }

    fn schema_target(&self) -> TargetDialect {
        TargetDialect::OpenApi3
    }

    fn should_apply(&self, model: &ModelDescriptor) -> bool {
        (model.supports_structured_outputs || detect::is_openai_reasoning_model(&model.model_id))
            && detect::mentions_openai(model)
    }

    fn supports_kind(&self, kind: NodeKind) -> bool {
        !matches!(
            kind,
            NodeKind::Never | NodeKind::Undefined | NodeKind::Tuple | NodeKind::Unsupported
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestar_schema::{DateCheck, NumberCheck, SchemaKind, SchemaNode};

    fn model() -> ModelDescriptor {
        ModelDescriptor::new("openai", "gpt-4o").with_structured_outputs(true)
    }

    #[test]
    fn applicability() {
        let layer = OpenAiReasoningCompat;
        assert!(layer.should_apply(&model()));
        assert!(layer.should_apply(&ModelDescriptor::new("openai", "o4-mini")));
        assert!(layer.should_apply(&ModelDescriptor::new("openrouter", "openai/o3")));
        assert!(!layer.should_apply(&ModelDescriptor::new("openai", "gpt-3.5-turbo")));
        assert!(
            !layer.should_apply(
                &ModelDescriptor::new("anthropic", "claude").with_structured_outputs(true)
            )
        );
    }

    #[test]
    fn optional_inside_array_becomes_nullable() {
        let schema = SchemaNode::array(SchemaNode::number().optional().describe("score"));
        let out = OpenAiReasoningCompat.transform(&model(), &schema).unwrap();
        let SchemaKind::Array { element, .. } = &out.kind else {
            panic!("expected array");
        };
        assert!(element.nullable);
        assert_eq!(element.node_kind(), NodeKind::Number);
        assert_eq!(element.description.as_deref(), Some("score"));
    }

    #[test]
    fn number_bounds_move_to_description() {
        let schema = SchemaNode::integer().min(1.0).max(10.0).describe("rating");
        let out = OpenAiReasoningCompat.transform(&model(), &schema).unwrap();
        assert_eq!(out.kind, SchemaKind::Number { checks: vec![NumberCheck::Int] });
        assert_eq!(out.description.as_deref(), Some("rating\nminimum: 1\nmaximum: 10"));
    }

    #[test]
    fn dates_become_strings() {
        let schema = SchemaNode::date()
            .with_check(DateCheck::Min("2024-01-01T00:00:00Z".into()))
            .describe("start");
        let out = OpenAiReasoningCompat.transform(&model(), &schema).unwrap();
        assert_eq!(
            out,
            SchemaNode::string()
                .describe("start\ndate format: date-time\nmin date: 2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn tuples_are_narrowed_whole() {
        let schema = SchemaNode::tuple(vec![
            SchemaNode::number().describe("lat"),
            SchemaNode::number().describe("lng"),
        ])
        .describe("position");
        let out = OpenAiReasoningCompat.transform(&model(), &schema).unwrap();
        assert_eq!(out.node_kind(), NodeKind::String);
        assert_eq!(
            out.description.as_deref(),
            Some(concat!(
                "position\n",
                "Argument was a \"tuple\" type, but you (the LLM) do not support \"tuple\", so it was cast to a \"string\" type\n",
                "original type: [number, number]\n",
                "[0]: lat\n",
                "[1]: lng",
            ))
        );
    }
}

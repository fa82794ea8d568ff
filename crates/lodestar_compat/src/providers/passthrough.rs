use crate::error::CompatError;
use crate::layer::SchemaCompatLayer;
use lodestar_models::ModelDescriptor;
use lodestar_schema::{SchemaNode, TargetDialect};

/// Identity layer used when no provider-specific layer applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCompat;

impl SchemaCompatLayer for PassthroughCompat {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn schema_target(&self) -> TargetDialect {
        TargetDialect::JsonSchema7
    }

    fn should_apply(&self, _model: &ModelDescriptor) -> bool {
        true
    }

    fn process(
        &self,
        _model: &ModelDescriptor,
        node: &SchemaNode,
    ) -> Result<SchemaNode, CompatError> {
        Ok(node.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_input_unchanged() {
        let model = ModelDescriptor::new("anthropic", "claude-sonnet-4");
        let schema = SchemaNode::object()
            .field("data", SchemaNode::any())
            .field("pair", SchemaNode::tuple(vec![SchemaNode::string(), SchemaNode::number()]));
        assert!(PassthroughCompat.should_apply(&model));
        assert_eq!(PassthroughCompat.transform(&model, &schema).unwrap(), schema);
    }
}

//! A tool schema travels from authoring to a provider request.

use async_trait::async_trait;
use lodestar_internal::prelude::*;
use std::sync::Arc;

/// Echoes the rewritten tool schema back as text.
struct InspectingProvider;

#[async_trait]
impl LlmProvider for InspectingProvider {
    async fn generate(
        &self,
        _model: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let dialects: Vec<String> = request
            .tools
            .unwrap_or_default()
            .iter()
            .map(|tool| format!("{}:{:?}", tool.name, tool.dialect))
            .collect();
        Ok(GenerationResponse::from_text(dialects.join(",")))
    }

    fn supports_structured_outputs(&self, model: &str) -> bool {
        model.starts_with("gpt-4o") && !model.starts_with("gpt-4o-mini")
    }
}

fn search_tool() -> ToolDefinition {
    FunctionMetadata::new("search")
        .with_description("Search the knowledge base")
        .add_parameter(
            ParameterInfo::new("query", SchemaNode::string().regex("^[a-z ]+$"))
                .with_description("search terms"),
        )
        .add_parameter(
            ParameterInfo::new("limit", SchemaNode::integer().min(1.0))
                .optional()
                .with_default(10),
        )
        .to_tool_definition()
}

fn registry() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry.register_llm_provider("openai", Arc::new(InspectingProvider));
    registry
}

#[tokio::test]
async fn structured_output_model_gets_openapi_tools() {
    let llm = registry().llm("openai/gpt-4o").unwrap();
    let request = GenerationRequest::new("find rust docs").tool(search_tool());

    let request = CompatRegistry::with_defaults()
        .apply_request(llm.descriptor(), request)
        .unwrap();

    let tool = &request.tools.as_ref().unwrap()[0];
    let object = tool.parameters.as_object().unwrap();
    let required: Vec<_> = object.required.iter().map(String::as_str).collect();
    assert_eq!(required, ["query"]);
    assert!(object.fields["limit"].nullable);
    assert!(
        object.fields["query"]
            .description
            .as_deref()
            .is_some_and(|d| d.contains("regex: /^[a-z ]+$/"))
    );

    let response = llm.generate(request).await.unwrap();
    assert_eq!(response.text().as_deref(), Some("search:Some(OpenApi3)"));
}

#[tokio::test]
async fn legacy_model_gets_json_schema_tools() {
    let llm = registry().llm("openai/gpt-4o-mini").unwrap();
    assert!(!llm.descriptor().supports_structured_outputs);

    let request = CompatRegistry::with_defaults()
        .apply_request(llm.descriptor(), GenerationRequest::new("q").tool(search_tool()))
        .unwrap();

    let response = llm.generate(request).await.unwrap();
    assert_eq!(response.text().as_deref(), Some("search:Some(JsonSchema7)"));
}

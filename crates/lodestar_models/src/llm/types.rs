//! Core types for LLM generation requests and responses.

use lodestar_schema::{SchemaNode, TargetDialect};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────
// Request / Response
// ─────────────────────

/// A generation request to a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// System prompt for the model.
    pub system: Option<String>,
    /// The messages to send to the model.
    pub messages: Vec<Message>,
    /// Available tools the model can call.
    pub tools: Option<Vec<ToolDefinition>>,
    /// How the model should choose tools.
    pub tool_choice: Option<ToolChoice>,
    /// Schema the model output must conform to, if any.
    pub output_schema: Option<SchemaNode>,
    /// Dialect `output_schema` was rewritten for, once a compatibility layer
    /// has processed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dialect: Option<TargetDialect>,
}

impl GenerationRequest {
    /// Creates a new generation request with a user message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lodestar_models::llm::GenerationRequest;
    ///
    /// let request = GenerationRequest::new("What's the weather like?");
    /// assert_eq!(request.messages.len(), 1);
    /// ```
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            system: None,
            messages: vec![Message::user(message)],
            tools: None,
            tool_choice: None,
            output_schema: None,
            output_dialect: None,
        }
    }

    /// Creates a new generation request with a system prompt and user message.
    #[must_use]
    pub fn with_system(system: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(message).system(system)
    }

    /// Sets the system prompt for the model.
    #[must_use]
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Adds a single tool to the request.
    ///
    /// This can be called multiple times to add multiple tools.
    #[must_use]
    pub fn tool(mut self, tool: ToolDefinition) -> Self {
        self.tools.get_or_insert_with(Vec::new).push(tool);
        self
    }

    /// Sets all available tools, replacing any previously added tools.
    #[must_use]
    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Sets how the model should choose tools.
    #[must_use]
    pub fn tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    /// Requests structured output conforming to `schema`.
    #[must_use]
    pub fn output_schema(mut self, schema: SchemaNode) -> Self {
        self.output_schema = Some(schema);
        self.output_dialect = None;
        self
    }
}

/// A generation response from a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated content blocks.
    pub content: Vec<AssistantBlock>,
    /// Token usage information.
    #[serde(default)]
    pub usage: Usage,
}

impl GenerationResponse {
    /// Creates a response holding a single text block.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![AssistantBlock::Text(text.into())],
            usage: Usage::default(),
        }
    }

    /// Returns all text content blocks concatenated into a single string.
    ///
    /// Returns `None` when the response holds no text block at all (for
    /// example, only tool calls), which is distinct from an empty text.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let mut blocks = self
            .content
            .iter()
            .filter_map(|block| match block {
                AssistantBlock::Text(text) => Some(text.as_str()),
                AssistantBlock::ToolCall(_) => None,
            })
            .peekable();
        blocks.peek()?;
        Some(blocks.collect())
    }
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the input.
    pub input_tokens: Option<u64>,
    /// Number of tokens in the output.
    pub output_tokens: Option<u64>,
}

// ─────────────────────
// Messages
// ─────────────────────

/// An input (user) or output (assistant) message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// A message from the user.
    User {
        /// The message text.
        content: String,
    },
    /// A message from the assistant.
    Assistant {
        /// The content blocks of the assistant message.
        content: Vec<AssistantBlock>,
    },
}

impl Message {
    /// Creates a user message with text content.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::User {
            content: text.into(),
        }
    }

    /// Creates an assistant message with text content.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant {
            content: vec![AssistantBlock::Text(text.into())],
        }
    }
}

/// Content that can appear in an assistant message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AssistantBlock {
    /// Plain text content.
    Text(String),
    /// A tool call request from the model.
    ToolCall(ToolCall),
}

// ─────────────────────
// Tool Calling
// ─────────────────────

/// Definition of a tool that can be called by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool (e.g., `get_weather`, `search_database`).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// Schema of the tool's arguments, normally an object node.
    pub parameters: SchemaNode,
    /// Dialect the parameters were rewritten for.
    ///
    /// `None` means the parameters are still in their authored form and have
    /// not passed through a compatibility layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<TargetDialect>,
}

impl ToolDefinition {
    /// Creates a definition with authored parameters.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: SchemaNode,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            dialect: None,
        }
    }
}

/// Controls how the model should select tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoice {
    /// Model decides whether to call tools or respond with text.
    Auto,
    /// Model must call at least one tool.
    Required,
    /// Model must call this specific tool.
    Specific(String),
    /// Model must not call any tools.
    None,
}

/// A tool call request from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call.
    pub id: String,
    /// The function to call.
    pub function: ToolFunction,
}

/// A tool function to be called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFunction {
    /// The name of the function to call.
    pub name: String,
    /// The arguments to pass to the function.
    pub arguments: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_concatenates_text_blocks() {
        let response = GenerationResponse {
            content: vec![
                AssistantBlock::Text("Quarterly ".into()),
                AssistantBlock::Text("report".into()),
            ],
            usage: Usage::default(),
        };
        assert_eq!(response.text().as_deref(), Some("Quarterly report"));
    }

    #[test]
    fn text_is_none_without_text_blocks() {
        let response = GenerationResponse {
            content: vec![AssistantBlock::ToolCall(ToolCall {
                id: "call_1".into(),
                function: ToolFunction {
                    name: "lookup".into(),
                    arguments: Value::Null,
                },
            })],
            usage: Usage::default(),
        };
        assert_eq!(response.text(), None);
        assert_eq!(GenerationResponse::from_text("").text().as_deref(), Some(""));
    }

    #[test]
    fn request_builder() {
        let request = GenerationRequest::with_system("Be terse", "Hi")
            .tool(ToolDefinition::new("noop", "Does nothing", SchemaNode::object()))
            .tool_choice(ToolChoice::Required);
        assert_eq!(request.system.as_deref(), Some("Be terse"));
        assert_eq!(request.tools.as_ref().map(Vec::len), Some(1));
        assert_eq!(request.tool_choice, Some(ToolChoice::Required));
    }
}

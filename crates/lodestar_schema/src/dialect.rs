//! Target JSON Schema dialects.

use serde::{Deserialize, Serialize};

/// The keyword subset a downstream serializer may emit for a transformed tree.
///
/// The dialect never changes the shape of a [`SchemaNode`](crate::SchemaNode);
/// it only selects rendering rules such as how nullability is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetDialect {
    /// `OpenAPI` 3.0 schema object subset.
    OpenApi3,
    /// JSON Schema draft 7.
    #[default]
    JsonSchema7,
}

/// How a nullable node is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullableStyle {
    /// `"nullable": true` next to the type.
    Keyword,
    /// `"type": [T, "null"]`.
    TypeArray,
}

impl TargetDialect {
    /// Returns how nullability is expressed in this dialect.
    #[must_use]
    pub fn nullable_style(self) -> NullableStyle {
        match self {
            Self::OpenApi3 => NullableStyle::Keyword,
            Self::JsonSchema7 => NullableStyle::TypeArray,
        }
    }
}

impl core::fmt::Display for TargetDialect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OpenApi3 => f.write_str("openApi3"),
            Self::JsonSchema7 => f.write_str("jsonSchema7"),
        }
    }
}

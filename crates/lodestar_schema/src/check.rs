//! Constraint checks attached to leaf schema nodes.
//!
//! Each check type has a field-less `*Kind` companion so provider layers can
//! express allow-lists ("degrade these kinds") without caring about values.

use serde::{Deserialize, Serialize};

// ─────────────────────
// String
// ─────────────────────

/// A constraint on a string value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StringCheck {
    /// Value must be a single emoji.
    Emoji,
    /// Value must be an email address.
    Email,
    /// Value must be a URL.
    Url,
    /// Value must be a UUID.
    Uuid,
    /// Value must be a CUID.
    Cuid,
    /// Value must match a regular expression.
    Regex {
        /// Expression source, without delimiters.
        pattern: String,
        /// Expression flags (e.g. `"i"`).
        #[serde(default)]
        flags: String,
    },
    /// Minimum length in characters.
    MinLength {
        /// Inclusive lower bound.
        value: u64,
    },
    /// Maximum length in characters.
    MaxLength {
        /// Inclusive upper bound.
        value: u64,
    },
    /// Exact length in characters.
    Length {
        /// Required length.
        value: u64,
    },
    /// Named JSON Schema format (e.g. `"hostname"`).
    Format {
        /// Format name.
        format: String,
    },
    /// Value must be one of a fixed set of strings.
    OneOf {
        /// Accepted values.
        values: Vec<String>,
    },
}

impl StringCheck {
    /// Returns the kind of this check.
    #[must_use]
    pub fn kind(&self) -> StringCheckKind {
        match self {
            Self::Emoji => StringCheckKind::Emoji,
            Self::Email => StringCheckKind::Email,
            Self::Url => StringCheckKind::Url,
            Self::Uuid => StringCheckKind::Uuid,
            Self::Cuid => StringCheckKind::Cuid,
            Self::Regex { .. } => StringCheckKind::Regex,
            Self::MinLength { .. } => StringCheckKind::MinLength,
            Self::MaxLength { .. } => StringCheckKind::MaxLength,
            Self::Length { .. } => StringCheckKind::Length,
            Self::Format { .. } => StringCheckKind::Format,
            Self::OneOf { .. } => StringCheckKind::OneOf,
        }
    }
}

/// Discriminant of a [`StringCheck`].
#[expect(missing_docs, reason = "variants mirror StringCheck")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringCheckKind {
    Emoji,
    Email,
    Url,
    Uuid,
    Cuid,
    Regex,
    MinLength,
    MaxLength,
    Length,
    Format,
    OneOf,
}

impl StringCheckKind {
    /// Every string check kind.
    pub const ALL: &'static [Self] = &[
        Self::Emoji,
        Self::Email,
        Self::Url,
        Self::Uuid,
        Self::Cuid,
        Self::Regex,
        Self::MinLength,
        Self::MaxLength,
        Self::Length,
        Self::Format,
        Self::OneOf,
    ];
}

// ─────────────────────
// Number
// ─────────────────────

/// A constraint on a numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NumberCheck {
    /// Lower bound.
    Min {
        /// Bound value.
        value: f64,
        /// Whether the bound itself is accepted.
        inclusive: bool,
    },
    /// Upper bound.
    Max {
        /// Bound value.
        value: f64,
        /// Whether the bound itself is accepted.
        inclusive: bool,
    },
    /// Value must be a multiple of this step.
    MultipleOf {
        /// Step.
        value: f64,
    },
    /// Value must be an integer.
    Int,
    /// Value must be finite.
    Finite,
}

impl NumberCheck {
    /// Returns the kind of this check.
    #[must_use]
    pub fn kind(&self) -> NumberCheckKind {
        match self {
            Self::Min { .. } => NumberCheckKind::Min,
            Self::Max { .. } => NumberCheckKind::Max,
            Self::MultipleOf { .. } => NumberCheckKind::MultipleOf,
            Self::Int => NumberCheckKind::Int,
            Self::Finite => NumberCheckKind::Finite,
        }
    }
}

/// Discriminant of a [`NumberCheck`].
#[expect(missing_docs, reason = "variants mirror NumberCheck")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberCheckKind {
    Min,
    Max,
    MultipleOf,
    Int,
    Finite,
}

// ─────────────────────
// Array
// ─────────────────────

/// A constraint on array length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArrayCheck {
    /// Minimum number of items.
    MinItems(u64),
    /// Maximum number of items.
    MaxItems(u64),
    /// Exact number of items.
    ExactItems(u64),
}

impl ArrayCheck {
    /// Returns the kind of this check.
    #[must_use]
    pub fn kind(&self) -> ArrayCheckKind {
        match self {
            Self::MinItems(_) => ArrayCheckKind::MinItems,
            Self::MaxItems(_) => ArrayCheckKind::MaxItems,
            Self::ExactItems(_) => ArrayCheckKind::ExactItems,
        }
    }
}

/// Discriminant of an [`ArrayCheck`].
#[expect(missing_docs, reason = "variants mirror ArrayCheck")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayCheckKind {
    MinItems,
    MaxItems,
    ExactItems,
}

impl ArrayCheckKind {
    /// Every array check kind.
    pub const ALL: &'static [Self] = &[Self::MinItems, Self::MaxItems, Self::ExactItems];
}

// ─────────────────────
// Date
// ─────────────────────

/// A bound on a date value, as an ISO-8601 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DateCheck {
    /// Earliest accepted date.
    Min(String),
    /// Latest accepted date.
    Max(String),
}

// ─────────────────────
// Display
// ─────────────────────
//
// Each check renders as a `name: value` note. These notes are what a model
// sees when a constraint cannot be enforced by the target dialect.

impl core::fmt::Display for StringCheck {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Emoji => f.write_str("emoji: true"),
            Self::Email => f.write_str("email: true"),
            Self::Url => f.write_str("url: true"),
            Self::Uuid => f.write_str("uuid: true"),
            Self::Cuid => f.write_str("cuid: true"),
            Self::Regex { pattern, flags } => write!(f, "regex: /{pattern}/{flags}"),
            Self::MinLength { value } => write!(f, "min length: {value}"),
            Self::MaxLength { value } => write!(f, "max length: {value}"),
            Self::Length { value } => write!(f, "exact length: {value}"),
            Self::Format { format } => write!(f, "format: {format}"),
            Self::OneOf { values } => write!(f, "one of: {}", values.join(", ")),
        }
    }
}

impl core::fmt::Display for NumberCheck {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Min {
                value,
                inclusive: true,
            } => write!(f, "minimum: {value}"),
            Self::Min {
                value,
                inclusive: false,
            } => write!(f, "exclusive minimum: {value}"),
            Self::Max {
                value,
                inclusive: true,
            } => write!(f, "maximum: {value}"),
            Self::Max {
                value,
                inclusive: false,
            } => write!(f, "exclusive maximum: {value}"),
            Self::MultipleOf { value } => write!(f, "multiple of: {value}"),
            Self::Int => f.write_str("integer: true"),
            Self::Finite => f.write_str("finite: true"),
        }
    }
}

impl core::fmt::Display for ArrayCheck {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MinItems(n) => write!(f, "min items: {n}"),
            Self::MaxItems(n) => write!(f, "max items: {n}"),
            Self::ExactItems(n) => write!(f, "exact items: {n}"),
        }
    }
}

impl core::fmt::Display for DateCheck {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Min(date) => write!(f, "min date: {date}"),
            Self::Max(date) => write!(f, "max date: {date}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks_render_as_notes() {
        let regex = StringCheck::Regex {
            pattern: "^[A-Z]{3}$".into(),
            flags: "i".into(),
        };
        assert_eq!(regex.to_string(), "regex: /^[A-Z]{3}$/i");
        assert_eq!(
            NumberCheck::Min {
                value: 0.0,
                inclusive: false
            }
            .to_string(),
            "exclusive minimum: 0"
        );
        assert_eq!(NumberCheck::MultipleOf { value: 2.5 }.to_string(), "multiple of: 2.5");
        assert_eq!(ArrayCheck::MaxItems(4).to_string(), "max items: 4");
        assert_eq!(
            DateCheck::Min("2024-01-01T00:00:00Z".into()).to_string(),
            "min date: 2024-01-01T00:00:00Z"
        );
    }

    #[test]
    fn string_check_kinds() {
        let check = StringCheck::Regex {
            pattern: "^a$".into(),
            flags: String::new(),
        };
        assert_eq!(check.kind(), StringCheckKind::Regex);
        assert_eq!(StringCheck::OneOf { values: vec![] }.kind(), StringCheckKind::OneOf);
        assert_eq!(StringCheckKind::ALL.len(), 11);
    }

    #[test]
    fn number_check_kinds() {
        let min = NumberCheck::Min {
            value: 1.0,
            inclusive: true,
        };
        assert_eq!(min.kind(), NumberCheckKind::Min);
        assert_eq!(NumberCheck::Int.kind(), NumberCheckKind::Int);
    }

    #[test]
    fn string_check_serializes_tagged() {
        let json = serde_json::to_value(StringCheck::MinLength { value: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "min_length", "value": 3}));
    }
}

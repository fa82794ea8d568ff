//! The schema tree.
//!
//! A [`SchemaNode`] is an immutable description of one type construct. Nodes
//! compose recursively and are cheap to clone; transformations always build
//! new trees instead of mutating shared ones.

use crate::check::{ArrayCheck, DateCheck, NumberCheck, StringCheck};
use crate::error::DefaultValueError;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

// ─────────────────────
// SchemaNode
// ─────────────────────

/// One node of a schema tree.
///
/// ```
/// use lodestar_schema::SchemaNode;
///
/// let schema = SchemaNode::object()
///     .field("city", SchemaNode::string().describe("City name"))
///     .field("days", SchemaNode::integer().optional());
///
/// let object = schema.as_object().unwrap();
/// assert!(object.required.contains("city"));
/// assert!(!object.required.contains("days"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// What this node describes.
    #[serde(flatten)]
    pub kind: SchemaKind,
    /// Free-form text shown to the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether `null` is accepted in addition to the node's type.
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub nullable: bool,
}

/// The type construct a [`SchemaNode`] describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaKind {
    /// A record with named fields.
    Object(ObjectSchema),
    /// A homogeneous list.
    Array {
        /// Item schema.
        element: Box<SchemaNode>,
        /// Length constraints.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        checks: Vec<ArrayCheck>,
    },
    /// A fixed-length, positionally typed list.
    Tuple {
        /// Item schemas in order.
        elements: Vec<SchemaNode>,
    },
    /// A value matching any of several schemas.
    Union {
        /// Alternatives in order.
        variants: Vec<SchemaNode>,
    },
    /// A value that may be absent.
    Optional {
        /// Schema of the value when present.
        inner: Box<SchemaNode>,
    },
    /// A value with a fallback used when absent.
    Default {
        /// Schema of the value.
        inner: Box<SchemaNode>,
        /// The fallback.
        value: DefaultValue,
    },
    /// A string.
    String {
        /// Constraints on the string.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        checks: Vec<StringCheck>,
    },
    /// A number.
    Number {
        /// Constraints on the number.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        checks: Vec<NumberCheck>,
    },
    /// A boolean.
    Boolean,
    /// A calendar date and time.
    Date {
        /// Bounds on the date.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        checks: Vec<DateCheck>,
    },
    /// One of a fixed list of scalar values.
    Enum {
        /// Accepted values.
        values: Vec<Value>,
    },
    /// Exactly one scalar value.
    Literal {
        /// The accepted value.
        value: Value,
    },
    /// Any value at all.
    Any,
    /// No value is accepted.
    Never,
    /// The value must be absent.
    Undefined,
    /// A construct this model has no representation for.
    Unsupported {
        /// Name of the original construct (e.g. `"intersection"`).
        kind_name: String,
    },
}

/// Field-less discriminant of [`SchemaKind`].
#[expect(missing_docs, reason = "variants mirror SchemaKind")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Object,
    Array,
    Tuple,
    Union,
    Optional,
    Default,
    String,
    Number,
    Boolean,
    Date,
    Enum,
    Literal,
    Any,
    Never,
    Undefined,
    Unsupported,
}

impl NodeKind {
    /// Stable lowercase name used in descriptions and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::Tuple => "tuple",
            Self::Union => "union",
            Self::Optional => "optional",
            Self::Default => "default",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Enum => "enum",
            Self::Literal => "literal",
            Self::Any => "any",
            Self::Never => "never",
            Self::Undefined => "undefined",
            Self::Unsupported => "unsupported",
        }
    }
}

impl core::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ─────────────────────
// Object
// ─────────────────────

/// Fields of an object node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Fields in declaration order.
    pub fields: IndexMap<String, SchemaNode>,
    /// Names of fields that must be present.
    #[serde(default)]
    pub required: IndexSet<String>,
    /// Handling of keys not listed in `fields`.
    #[serde(default)]
    pub unknown_keys: UnknownKeys,
}

/// Policy for object keys that are not declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeys {
    /// Unknown keys are dropped.
    #[default]
    Strip,
    /// Unknown keys are rejected.
    Strict,
    /// Unknown keys are kept.
    Passthrough,
}

// ─────────────────────
// Default values
// ─────────────────────

/// The fallback of a [`SchemaKind::Default`] node.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// A literal value.
    Static(Value),
    /// A value produced on demand.
    #[serde(skip)]
    Computed(DefaultFactory),
}

/// Produces a default value on demand.
type DefaultFn = dyn Fn() -> Result<Value, DefaultValueError> + Send + Sync;

/// Shared handle to a default value producer.
#[derive(Clone)]
pub struct DefaultFactory(Arc<DefaultFn>);

impl DefaultFactory {
    /// Wraps a producer function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Result<Value, DefaultValueError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }
}

impl DefaultValue {
    /// Returns the default value, evaluating it if it is computed.
    ///
    /// # Errors
    ///
    /// Returns the producer's error when a computed default cannot be evaluated.
    pub fn resolve(&self) -> Result<Value, DefaultValueError> {
        match self {
            Self::Static(value) => Ok(value.clone()),
            Self::Computed(factory) => (factory.0)(),
        }
    }
}

impl core::fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl PartialEq for DefaultValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Static(a), Self::Static(b)) => a == b,
            (Self::Computed(a), Self::Computed(b)) => Arc::ptr_eq(&a.0, &b.0),
            _ => false,
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        Self::Static(value)
    }
}

// ─────────────────────
// Checks
// ─────────────────────

/// Any leaf constraint, for [`SchemaNode::with_check`].
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// A string constraint.
    String(StringCheck),
    /// A number constraint.
    Number(NumberCheck),
    /// An array constraint.
    Array(ArrayCheck),
    /// A date constraint.
    Date(DateCheck),
}

impl From<StringCheck> for Check {
    fn from(check: StringCheck) -> Self {
        Self::String(check)
    }
}

impl From<NumberCheck> for Check {
    fn from(check: NumberCheck) -> Self {
        Self::Number(check)
    }
}

impl From<ArrayCheck> for Check {
    fn from(check: ArrayCheck) -> Self {
        Self::Array(check)
    }
}

impl From<DateCheck> for Check {
    fn from(check: DateCheck) -> Self {
        Self::Date(check)
    }
}

// ─────────────────────
// Construction
// ─────────────────────

impl From<SchemaKind> for SchemaNode {
    fn from(kind: SchemaKind) -> Self {
        Self::new(kind)
    }
}

impl SchemaNode {
    /// Creates an undescribed, non-nullable node.
    #[must_use]
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
            nullable: false,
        }
    }

    /// Creates an object node with no fields.
    #[must_use]
    pub fn object() -> Self {
        Self::new(SchemaKind::Object(ObjectSchema::default()))
    }

    /// Creates an array node.
    #[must_use]
    pub fn array(element: SchemaNode) -> Self {
        Self::new(SchemaKind::Array {
            element: Box::new(element),
            checks: Vec::new(),
        })
    }

    /// Creates a tuple node.
    #[must_use]
    pub fn tuple(elements: Vec<SchemaNode>) -> Self {
        Self::new(SchemaKind::Tuple { elements })
    }

    /// Creates a union node.
    #[must_use]
    pub fn union(variants: Vec<SchemaNode>) -> Self {
        Self::new(SchemaKind::Union { variants })
    }

    /// Creates an unconstrained string node.
    #[must_use]
    pub fn string() -> Self {
        Self::new(SchemaKind::String { checks: Vec::new() })
    }

    /// Creates an unconstrained number node.
    #[must_use]
    pub fn number() -> Self {
        Self::new(SchemaKind::Number { checks: Vec::new() })
    }

    /// Creates a number node restricted to integers.
    #[must_use]
    pub fn integer() -> Self {
        Self::new(SchemaKind::Number {
            checks: vec![NumberCheck::Int],
        })
    }

    /// Creates a boolean node.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    /// Creates an unbounded date node.
    #[must_use]
    pub fn date() -> Self {
        Self::new(SchemaKind::Date { checks: Vec::new() })
    }

    /// Creates an enum node.
    #[must_use]
    pub fn enumeration<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(SchemaKind::Enum {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Creates a literal node.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::new(SchemaKind::Literal {
            value: value.into(),
        })
    }

    /// Creates a node accepting any value.
    #[must_use]
    pub fn any() -> Self {
        Self::new(SchemaKind::Any)
    }

    /// Creates a node accepting no value.
    #[must_use]
    pub fn never() -> Self {
        Self::new(SchemaKind::Never)
    }

    /// Creates a node requiring absence.
    #[must_use]
    pub fn undefined() -> Self {
        Self::new(SchemaKind::Undefined)
    }

    /// Creates a placeholder for a construct without a representation.
    #[must_use]
    pub fn unsupported(kind_name: impl Into<String>) -> Self {
        Self::new(SchemaKind::Unsupported {
            kind_name: kind_name.into(),
        })
    }

    /// Sets the description, replacing any previous one.
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Wraps this node in [`SchemaKind::Optional`].
    #[must_use]
    pub fn optional(self) -> Self {
        Self::new(SchemaKind::Optional {
            inner: Box::new(self),
        })
    }

    /// Wraps this node in [`SchemaKind::Default`] with a literal fallback.
    #[must_use]
    pub fn with_default(self, value: impl Into<Value>) -> Self {
        Self::new(SchemaKind::Default {
            inner: Box::new(self),
            value: DefaultValue::Static(value.into()),
        })
    }

    /// Wraps this node in [`SchemaKind::Default`] with a computed fallback.
    #[must_use]
    pub fn with_default_fn<F>(self, f: F) -> Self
    where
        F: Fn() -> Result<Value, DefaultValueError> + Send + Sync + 'static,
    {
        Self::new(SchemaKind::Default {
            inner: Box::new(self),
            value: DefaultValue::Computed(DefaultFactory::new(f)),
        })
    }

    /// Adds a field to an object node.
    ///
    /// The field is required unless `node` is optional. Ignored when `self`
    /// is not an object.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, node: SchemaNode) -> Self {
        if let SchemaKind::Object(object) = &mut self.kind {
            let name = name.into();
            if node.is_optional() {
                object.required.shift_remove(&name);
            } else {
                object.required.insert(name.clone());
            }
            object.fields.insert(name, node);
        }
        self
    }

    /// Sets the unknown-key policy of an object node. Ignored for other kinds.
    #[must_use]
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        if let SchemaKind::Object(object) = &mut self.kind {
            object.unknown_keys = policy;
        }
        self
    }

    /// Adds a constraint.
    ///
    /// Ignored when the check does not match the node's kind (e.g. a string
    /// check on a number node).
    #[must_use]
    pub fn with_check(mut self, check: impl Into<Check>) -> Self {
        match (&mut self.kind, check.into()) {
            (SchemaKind::String { checks }, Check::String(check)) => checks.push(check),
            (SchemaKind::Number { checks }, Check::Number(check)) => checks.push(check),
            (SchemaKind::Array { checks, .. }, Check::Array(check)) => checks.push(check),
            (SchemaKind::Date { checks }, Check::Date(check)) => checks.push(check),
            _ => {}
        }
        self
    }

    /// Adds a regex check to a string node.
    #[must_use]
    pub fn regex(self, pattern: impl Into<String>) -> Self {
        self.with_check(StringCheck::Regex {
            pattern: pattern.into(),
            flags: String::new(),
        })
    }

    /// Adds a minimum length check to a string node.
    #[must_use]
    pub fn min_length(self, value: u64) -> Self {
        self.with_check(StringCheck::MinLength { value })
    }

    /// Adds a maximum length check to a string node.
    #[must_use]
    pub fn max_length(self, value: u64) -> Self {
        self.with_check(StringCheck::MaxLength { value })
    }

    /// Adds an inclusive lower bound to a number node.
    #[must_use]
    pub fn min(self, value: f64) -> Self {
        self.with_check(NumberCheck::Min {
            value,
            inclusive: true,
        })
    }

    /// Adds an inclusive upper bound to a number node.
    #[must_use]
    pub fn max(self, value: f64) -> Self {
        self.with_check(NumberCheck::Max {
            value,
            inclusive: true,
        })
    }

    /// Adds a minimum item count to an array node.
    #[must_use]
    pub fn min_items(self, value: u64) -> Self {
        self.with_check(ArrayCheck::MinItems(value))
    }

    /// Adds a maximum item count to an array node.
    #[must_use]
    pub fn max_items(self, value: u64) -> Self {
        self.with_check(ArrayCheck::MaxItems(value))
    }
}

// ─────────────────────
// Inspection & traversal
// ─────────────────────

impl SchemaNode {
    /// Returns the node's discriminant.
    #[must_use]
    pub fn node_kind(&self) -> NodeKind {
        match &self.kind {
            SchemaKind::Object(_) => NodeKind::Object,
            SchemaKind::Array { .. } => NodeKind::Array,
            SchemaKind::Tuple { .. } => NodeKind::Tuple,
            SchemaKind::Union { .. } => NodeKind::Union,
            SchemaKind::Optional { .. } => NodeKind::Optional,
            SchemaKind::Default { .. } => NodeKind::Default,
            SchemaKind::String { .. } => NodeKind::String,
            SchemaKind::Number { .. } => NodeKind::Number,
            SchemaKind::Boolean => NodeKind::Boolean,
            SchemaKind::Date { .. } => NodeKind::Date,
            SchemaKind::Enum { .. } => NodeKind::Enum,
            SchemaKind::Literal { .. } => NodeKind::Literal,
            SchemaKind::Any => NodeKind::Any,
            SchemaKind::Never => NodeKind::Never,
            SchemaKind::Undefined => NodeKind::Undefined,
            SchemaKind::Unsupported { .. } => NodeKind::Unsupported,
        }
    }

    /// Returns the name of the construct, using the original name for
    /// [`SchemaKind::Unsupported`] nodes.
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            SchemaKind::Unsupported { kind_name } => kind_name,
            _ => self.node_kind().name(),
        }
    }

    /// Returns the object fields if this is an object node.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match &self.kind {
            SchemaKind::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Whether the value may be omitted: an optional node, or a default
    /// wrapping one.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        match &self.kind {
            SchemaKind::Optional { .. } => true,
            SchemaKind::Default { inner, .. } => inner.is_optional(),
            _ => false,
        }
    }

    /// Returns the direct children in declaration order.
    #[must_use]
    pub fn children(&self) -> Vec<&SchemaNode> {
        match &self.kind {
            SchemaKind::Object(object) => object.fields.values().collect(),
            SchemaKind::Array { element, .. } => vec![element.as_ref()],
            SchemaKind::Tuple { elements } => elements.iter().collect(),
            SchemaKind::Union { variants } => variants.iter().collect(),
            SchemaKind::Optional { inner } | SchemaKind::Default { inner, .. } => {
                vec![inner.as_ref()]
            }
            SchemaKind::String { .. }
            | SchemaKind::Number { .. }
            | SchemaKind::Boolean
            | SchemaKind::Date { .. }
            | SchemaKind::Enum { .. }
            | SchemaKind::Literal { .. }
            | SchemaKind::Any
            | SchemaKind::Never
            | SchemaKind::Undefined
            | SchemaKind::Unsupported { .. } => Vec::new(),
        }
    }

    /// Rebuilds this node with every direct child replaced by `f(child)`.
    ///
    /// The first error returned by `f` aborts the rebuild.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `f`.
    pub fn try_map_children<E, F>(&self, mut f: F) -> Result<SchemaNode, E>
    where
        F: FnMut(&SchemaNode) -> Result<SchemaNode, E>,
    {
        let kind = match &self.kind {
            SchemaKind::Object(object) => {
                let mut fields = IndexMap::with_capacity(object.fields.len());
                for (name, node) in &object.fields {
                    fields.insert(name.clone(), f(node)?);
                }
                SchemaKind::Object(ObjectSchema {
                    fields,
                    required: object.required.clone(),
                    unknown_keys: object.unknown_keys,
                })
            }
            SchemaKind::Array { element, checks } => SchemaKind::Array {
                element: Box::new(f(element)?),
                checks: checks.clone(),
            },
            SchemaKind::Tuple { elements } => SchemaKind::Tuple {
                elements: elements.iter().map(&mut f).collect::<Result<_, _>>()?,
            },
            SchemaKind::Union { variants } => SchemaKind::Union {
                variants: variants.iter().map(&mut f).collect::<Result<_, _>>()?,
            },
            SchemaKind::Optional { inner } => SchemaKind::Optional {
                inner: Box::new(f(inner)?),
            },
            SchemaKind::Default { inner, value } => SchemaKind::Default {
                inner: Box::new(f(inner)?),
                value: value.clone(),
            },
            leaf => leaf.clone(),
        };

        Ok(SchemaNode {
            kind,
            description: self.description.clone(),
            nullable: self.nullable,
        })
    }

    /// Rebuilds this node with every direct child replaced by `f(child)`.
    #[must_use]
    pub fn map_children<F>(&self, mut f: F) -> SchemaNode
    where
        F: FnMut(&SchemaNode) -> SchemaNode,
    {
        let result: Result<SchemaNode, core::convert::Infallible> =
            self.try_map_children(|child| Ok(f(child)));
        match result {
            Ok(node) => node,
            Err(never) => match never {},
        }
    }

    /// Visits this node and all of its descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a SchemaNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Returns the kinds of all strict descendants in pre-order.
    #[must_use]
    pub fn descendant_kinds(&self) -> Vec<NodeKind> {
        let mut kinds = Vec::new();
        for child in self.children() {
            child.walk(&mut |node| kinds.push(node.node_kind()));
        }
        kinds
    }

    /// Whether this node or any descendant is of the given kind.
    #[must_use]
    pub fn contains_kind(&self, kind: NodeKind) -> bool {
        self.node_kind() == kind || self.descendant_kinds().contains(&kind)
    }
}

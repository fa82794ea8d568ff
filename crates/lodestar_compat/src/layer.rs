//! The [`SchemaCompatLayer`] trait.
//!
//! A layer rewrites a schema tree into the subset one provider accepts. The
//! trait's default methods are the base rewrite: an exhaustive dispatch over
//! node kinds plus one handler per kind. Provider layers override the policy
//! knobs (which checks to degrade, which kinds are allowed) and, rarely, a
//! handler.
//!
//! Degrading a construct never drops its meaning: whatever cannot be
//! expressed is appended to the node's description as text the model can
//! still follow.

use crate::error::CompatError;
use crate::notes;
use lodestar_models::ModelDescriptor;
use lodestar_schema::{
    ArrayCheck, ArrayCheckKind, DateCheck, DefaultValue, NodeKind, NumberCheck, NumberCheckKind,
    ObjectSchema, SchemaKind, SchemaNode, StringCheck, StringCheckKind, TargetDialect,
};

/// Note appended when a date is represented as a string.
pub const DATE_FORMAT_NOTE: &str = "date format: date-time";

/// How a layer treats union nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnionPolicy {
    /// Keep the union and rewrite each variant.
    #[default]
    Preserve,
    /// Narrow the whole union to a string, describing its variants.
    CastToString,
}

/// Provider-specific schema rewrite rules.
///
/// Layers are stateless; `transform` is a pure function of the model
/// descriptor and the input tree and may be called concurrently.
///
/// # Example
///
/// ```
/// use lodestar_compat::{SchemaCompatLayer, providers::OpenAiReasoningCompat};
/// use lodestar_models::ModelDescriptor;
/// use lodestar_schema::SchemaNode;
///
/// let model = ModelDescriptor::new("openai", "o3-mini");
/// let layer = OpenAiReasoningCompat;
/// assert!(layer.should_apply(&model));
///
/// let out = layer.transform(&model, &SchemaNode::any().describe("data")).unwrap();
/// assert_eq!(out, SchemaNode::string().describe(
///     "data\nArgument was an \"any\" type, but you (the LLM) do not support \"any\", so it was cast to a \"string\" type"
/// ));
/// ```
pub trait SchemaCompatLayer: Send + Sync {
    /// Stable name used in logs and registry output.
    fn name(&self) -> &'static str;

    /// Dialect the rewritten tree is meant to be rendered in.
    fn schema_target(&self) -> TargetDialect;

    /// Whether this layer is the right rule set for `model`.
    ///
    /// Implementations are heuristics over the descriptor; see
    /// [`detect`](crate::detect).
    fn should_apply(&self, model: &ModelDescriptor) -> bool;

    // ─────────────────────
    // Policy knobs
    // ─────────────────────

    /// String check kinds moved into the description.
    fn degraded_string_checks(&self, _model: &ModelDescriptor) -> Vec<StringCheckKind> {
        StringCheckKind::ALL
            .iter()
            .copied()
            .filter(|kind| *kind != StringCheckKind::OneOf)
            .collect()
    }

    /// Number check kinds moved into the description.
    fn degraded_number_checks(&self, _model: &ModelDescriptor) -> Vec<NumberCheckKind> {
        vec![
            NumberCheckKind::Min,
            NumberCheckKind::Max,
            NumberCheckKind::MultipleOf,
        ]
    }

    /// Array check kinds moved into the description.
    fn degraded_array_checks(&self, _model: &ModelDescriptor) -> Vec<ArrayCheckKind> {
        ArrayCheckKind::ALL.to_vec()
    }

    /// Whether dates become strings with a format note.
    fn degrades_dates(&self, _model: &ModelDescriptor) -> bool {
        true
    }

    /// Whether nodes of `kind` may appear in the output. Unsupported kinds
    /// are narrowed to strings.
    fn supports_kind(&self, kind: NodeKind) -> bool {
        kind != NodeKind::Unsupported
    }

    /// Inner kinds an optional may wrap, or `None` for no restriction.
    fn optional_inner_kinds(&self) -> Option<&'static [NodeKind]> {
        None
    }

    /// How unions are handled.
    fn union_policy(&self) -> UnionPolicy {
        UnionPolicy::Preserve
    }

    // ─────────────────────
    // Traversal
    // ─────────────────────

    /// Rewrites `root` for `model`.
    ///
    /// # Errors
    ///
    /// Returns a [`CompatError`] when a computed default fails to evaluate or
    /// a union has fewer than two variants. Unsupported constructs are not
    /// errors.
    fn transform(
        &self,
        model: &ModelDescriptor,
        root: &SchemaNode,
    ) -> Result<SchemaNode, CompatError> {
        let span = tracing::debug_span!("schema_compat", layer = self.name(), model = %model);
        let _enter = span.enter();
        self.process(model, root)
    }

    /// Rewrites one node, dispatching on its kind.
    ///
    /// # Errors
    ///
    /// See [`transform`](Self::transform).
    fn process(
        &self,
        model: &ModelDescriptor,
        node: &SchemaNode,
    ) -> Result<SchemaNode, CompatError> {
        if let SchemaKind::Union { variants } = &node.kind
            && variants.len() < 2
        {
            return Err(CompatError::DegenerateUnion {
                found: variants.len(),
            });
        }

        if !self.supports_kind(node.node_kind()) {
            return self.handle_unsupported(model, node);
        }

        match &node.kind {
            SchemaKind::Object(object) => self.handle_object(model, node, object),
            SchemaKind::Array { element, checks } => {
                self.handle_array(model, node, element, checks)
            }
            SchemaKind::Tuple { elements } => self.handle_tuple(model, node, elements),
            SchemaKind::Union { variants } => self.handle_union(model, node, variants),
            SchemaKind::Optional { inner } => self.handle_optional(model, node, inner),
            SchemaKind::Default { inner, value } => {
                self.handle_default(model, node, inner, value)
            }
            SchemaKind::String { checks } => self.handle_string(model, node, checks),
            SchemaKind::Number { checks } => self.handle_number(model, node, checks),
            SchemaKind::Date { checks } => self.handle_date(model, node, checks),
            SchemaKind::Any => self.handle_any(model, node),
            SchemaKind::Unsupported { .. } => self.handle_unsupported(model, node),
            SchemaKind::Boolean
            | SchemaKind::Enum { .. }
            | SchemaKind::Literal { .. }
            | SchemaKind::Never
            | SchemaKind::Undefined => Ok(node.clone()),
        }
    }

    // ─────────────────────
    // Handlers
    // ─────────────────────

    /// Rewrites every field. Fields that may be omitted leave the required
    /// set, since their rewritten form is nullable instead.
    ///
    /// # Errors
    ///
    /// Propagates errors from the fields.
    fn handle_object(
        &self,
        model: &ModelDescriptor,
        node: &SchemaNode,
        object: &ObjectSchema,
    ) -> Result<SchemaNode, CompatError> {
        let fields = object
            .fields
            .iter()
            .map(|(name, field)| Ok((name.clone(), self.process(model, field)?)))
            .collect::<Result<_, CompatError>>()?;

        let required = object
            .required
            .iter()
            .filter(|name| object.fields.get(*name).is_none_or(|f| !f.is_optional()))
            .cloned()
            .collect();

        Ok(rebuild(
            node,
            SchemaKind::Object(ObjectSchema {
                fields,
                required,
                unknown_keys: object.unknown_keys,
            }),
        ))
    }

    /// Rewrites the element and degrades array checks.
    ///
    /// # Errors
    ///
    /// Propagates errors from the element.
    fn handle_array(
        &self,
        model: &ModelDescriptor,
        node: &SchemaNode,
        element: &SchemaNode,
        checks: &[ArrayCheck],
    ) -> Result<SchemaNode, CompatError> {
        let degraded = self.degraded_array_checks(model);
        let (stripped, kept): (Vec<_>, Vec<_>) = checks
            .iter()
            .copied()
            .partition(|check| degraded.contains(&check.kind()));

        let mut out = rebuild(
            node,
            SchemaKind::Array {
                element: Box::new(self.process(model, element)?),
                checks: kept,
            },
        );
        note_stripped(self.name(), &mut out, &stripped);
        Ok(out)
    }

    /// Rewrites every element, keeping the tuple shape.
    ///
    /// # Errors
    ///
    /// Propagates errors from the elements.
    fn handle_tuple(
        &self,
        model: &ModelDescriptor,
        node: &SchemaNode,
        elements: &[SchemaNode],
    ) -> Result<SchemaNode, CompatError> {
        let elements = elements
            .iter()
            .map(|element| self.process(model, element))
            .collect::<Result<_, _>>()?;
        Ok(rebuild(node, SchemaKind::Tuple { elements }))
    }

    /// Applies [`union_policy`](Self::union_policy).
    ///
    /// # Errors
    ///
    /// Propagates errors from the variants.
    fn handle_union(
        &self,
        model: &ModelDescriptor,
        node: &SchemaNode,
        variants: &[SchemaNode],
    ) -> Result<SchemaNode, CompatError> {
        match self.union_policy() {
            UnionPolicy::CastToString => self.handle_unsupported(model, node),
            UnionPolicy::Preserve => {
                let variants = variants
                    .iter()
                    .map(|variant| self.process(model, variant))
                    .collect::<Result<_, _>>()?;
                Ok(rebuild(node, SchemaKind::Union { variants }))
            }
        }
    }

    /// Unwraps the optional into a nullable rewrite of its inner node.
    ///
    /// When [`optional_inner_kinds`](Self::optional_inner_kinds) excludes
    /// the inner kind, the result is a nullable string describing the inner
    /// node instead.
    ///
    /// # Errors
    ///
    /// Propagates errors from the inner node.
    fn handle_optional(
        &self,
        model: &ModelDescriptor,
        node: &SchemaNode,
        inner: &SchemaNode,
    ) -> Result<SchemaNode, CompatError> {
        let processed = self.process(model, inner)?;

        let allowed = self
            .optional_inner_kinds()
            .is_none_or(|kinds| kinds.contains(&inner.node_kind()));

        let mut out = if allowed {
            processed
        } else {
            tracing::debug!(
                layer = self.name(),
                kind = inner.kind_name(),
                "narrowed optional to nullable string"
            );
            let lines = core::iter::once(notes::optional_narrowed_sentence(inner.kind_name()))
                .chain(notes::shape_notes(inner));
            SchemaNode {
                kind: SchemaKind::String { checks: Vec::new() },
                description: notes::append(processed.description.as_deref(), lines),
                nullable: true,
            }
        };

        out.nullable = true;
        out.description = notes::append(out.description.as_deref(), node.description.clone());
        Ok(out)
    }

    /// Replaces the default wrapper by its rewritten inner node, noting the
    /// default value in the description.
    ///
    /// # Errors
    ///
    /// Returns [`CompatError::DefaultValue`] when a computed default fails,
    /// and propagates errors from the inner node.
    fn handle_default(
        &self,
        model: &ModelDescriptor,
        node: &SchemaNode,
        inner: &SchemaNode,
        value: &DefaultValue,
    ) -> Result<SchemaNode, CompatError> {
        let value = value.resolve()?;
        let mut out = self.process(model, inner)?;

        tracing::debug!(
            layer = self.name(),
            default = %value,
            "moved default value to description"
        );
        let lines = node
            .description
            .clone()
            .into_iter()
            .chain(core::iter::once(format!("default value: {value}")));
        out.description = notes::append(out.description.as_deref(), lines);
        out.nullable |= node.nullable;
        Ok(out)
    }

    /// Degrades the string checks listed by
    /// [`degraded_string_checks`](Self::degraded_string_checks).
    ///
    /// # Errors
    ///
    /// Infallible in the base implementation.
    fn handle_string(
        &self,
        model: &ModelDescriptor,
        node: &SchemaNode,
        checks: &[StringCheck],
    ) -> Result<SchemaNode, CompatError> {
        let degraded = self.degraded_string_checks(model);
        let (stripped, kept): (Vec<_>, Vec<_>) = checks
            .iter()
            .cloned()
            .partition(|check| degraded.contains(&check.kind()));

        let mut out = rebuild(node, SchemaKind::String { checks: kept });
        note_stripped(self.name(), &mut out, &stripped);
        Ok(out)
    }

    /// Degrades the number checks listed by
    /// [`degraded_number_checks`](Self::degraded_number_checks).
    ///
    /// # Errors
    ///
    /// Infallible in the base implementation.
    fn handle_number(
        &self,
        model: &ModelDescriptor,
        node: &SchemaNode,
        checks: &[NumberCheck],
    ) -> Result<SchemaNode, CompatError> {
        let degraded = self.degraded_number_checks(model);
        let (stripped, kept): (Vec<_>, Vec<_>) = checks
            .iter()
            .cloned()
            .partition(|check| degraded.contains(&check.kind()));

        let mut out = rebuild(node, SchemaKind::Number { checks: kept });
        note_stripped(self.name(), &mut out, &stripped);
        Ok(out)
    }

    /// Turns a date into a string noting the expected format and bounds,
    /// unless [`degrades_dates`](Self::degrades_dates) is false.
    ///
    /// # Errors
    ///
    /// Infallible in the base implementation.
    fn handle_date(
        &self,
        model: &ModelDescriptor,
        node: &SchemaNode,
        checks: &[DateCheck],
    ) -> Result<SchemaNode, CompatError> {
        if !self.degrades_dates(model) {
            return Ok(node.clone());
        }

        tracing::debug!(layer = self.name(), "narrowed date to string");
        let lines = core::iter::once(DATE_FORMAT_NOTE.to_string())
            .chain(checks.iter().map(ToString::to_string));
        Ok(SchemaNode {
            kind: SchemaKind::String { checks: Vec::new() },
            description: notes::append(node.description.as_deref(), lines),
            nullable: node.nullable,
        })
    }

    /// Narrows an unconstrained value to a string.
    ///
    /// # Errors
    ///
    /// Infallible in the base implementation.
    fn handle_any(
        &self,
        _model: &ModelDescriptor,
        node: &SchemaNode,
    ) -> Result<SchemaNode, CompatError> {
        tracing::debug!(layer = self.name(), "narrowed any to string");
        Ok(SchemaNode {
            kind: SchemaKind::String { checks: Vec::new() },
            description: notes::append(
                node.description.as_deref(),
                [notes::narrowed_sentence(NodeKind::Any.name())],
            ),
            nullable: node.nullable,
        })
    }

    /// Narrows any construct to a string, describing its kind, shape and
    /// nested descriptions. Children are not rewritten separately, but every
    /// default value in the subtree is still evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`CompatError::DefaultValue`] when a computed default anywhere
    /// in the subtree fails.
    fn handle_unsupported(
        &self,
        _model: &ModelDescriptor,
        node: &SchemaNode,
    ) -> Result<SchemaNode, CompatError> {
        resolve_defaults(node)?;
        tracing::debug!(
            layer = self.name(),
            kind = node.kind_name(),
            "narrowed unsupported type to string"
        );
        let lines = core::iter::once(notes::narrowed_sentence(node.kind_name()))
            .chain(notes::shape_notes(node));
        Ok(SchemaNode {
            kind: SchemaKind::String { checks: Vec::new() },
            description: notes::append(node.description.as_deref(), lines),
            nullable: node.nullable,
        })
    }
}

/// Builds a node of `kind` carrying `node`'s description and nullability.
fn rebuild(node: &SchemaNode, kind: SchemaKind) -> SchemaNode {
    SchemaNode {
        kind,
        description: node.description.clone(),
        nullable: node.nullable,
    }
}

/// Evaluates every default value under `node`, returning the first failure.
fn resolve_defaults(node: &SchemaNode) -> Result<(), CompatError> {
    let mut failure = None;
    node.walk(&mut |child| {
        if failure.is_none()
            && let SchemaKind::Default { value, .. } = &child.kind
            && let Err(err) = value.resolve()
        {
            failure = Some(err);
        }
    });
    failure.map_or(Ok(()), |err| Err(err.into()))
}

/// Appends one note per stripped check.
fn note_stripped<C: ToString>(layer: &'static str, out: &mut SchemaNode, stripped: &[C]) {
    if stripped.is_empty() {
        return;
    }
    tracing::debug!(layer, count = stripped.len(), "moved checks to description");
    out.description = notes::append(
        out.description.as_deref(),
        stripped.iter().map(ToString::to_string),
    );
}

//! Compact textual rendering of schema trees.
//!
//! When a construct has to be narrowed to a plain string, its shape is
//! written into the description instead. [`Signature`] renders a
//! TypeScript-like type expression and [`SchemaNode::nested_descriptions`]
//! collects the descriptions of everything below a node.

use crate::node::{SchemaKind, SchemaNode};
use core::fmt;

/// Display adapter returned by [`SchemaNode::signature`].
#[derive(Debug, Clone, Copy)]
pub struct Signature<'a>(&'a SchemaNode);

impl SchemaNode {
    /// Returns a displayable type expression for this node.
    ///
    /// ```
    /// use lodestar_schema::SchemaNode;
    ///
    /// let node = SchemaNode::tuple(vec![SchemaNode::string(), SchemaNode::number().min(0.0)]);
    /// assert_eq!(node.signature().to_string(), "[string, number (minimum: 0)]");
    /// ```
    #[must_use]
    pub fn signature(&self) -> Signature<'_> {
        Signature(self)
    }

    /// Returns `(path, description)` for every described strict descendant,
    /// in pre-order.
    ///
    /// Paths use `.field` for object fields, `[i]` for tuple elements, `[]`
    /// for array items and `<i>` for union variants. Optional and default
    /// wrappers do not add a path segment.
    #[must_use]
    pub fn nested_descriptions(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        collect_children(self, "", &mut out);
        out
    }
}

fn collect(node: &SchemaNode, path: String, out: &mut Vec<(String, String)>) {
    if let Some(description) = &node.description {
        out.push((path.clone(), description.clone()));
    }
    collect_children(node, &path, out);
}

fn collect_children(node: &SchemaNode, path: &str, out: &mut Vec<(String, String)>) {
    match &node.kind {
        SchemaKind::Object(object) => {
            for (name, field) in &object.fields {
                collect(field, format!("{path}.{name}"), out);
            }
        }
        SchemaKind::Array { element, .. } => collect(element, format!("{path}[]"), out),
        SchemaKind::Tuple { elements } => {
            for (i, element) in elements.iter().enumerate() {
                collect(element, format!("{path}[{i}]"), out);
            }
        }
        SchemaKind::Union { variants } => {
            for (i, variant) in variants.iter().enumerate() {
                collect(variant, format!("{path}<{i}>"), out);
            }
        }
        SchemaKind::Optional { inner } | SchemaKind::Default { inner, .. } => {
            collect(inner, path.to_string(), out);
        }
        _ => {}
    }
}

fn write_checks<T: fmt::Display>(f: &mut fmt::Formatter<'_>, checks: &[T]) -> fmt::Result {
    if checks.is_empty() {
        return Ok(());
    }
    f.write_str(" (")?;
    for (i, check) in checks.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{check}")?;
    }
    f.write_str(")")
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    nodes: &[SchemaNode],
    separator: &str,
) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", node.signature())?;
    }
    Ok(())
}

impl fmt::Display for Signature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0;
        match &node.kind {
            SchemaKind::Object(object) => {
                if object.fields.is_empty() {
                    f.write_str("{}")?;
                } else {
                    f.write_str("{ ")?;
                    for (i, (name, field)) in object.fields.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        let marker = if object.required.contains(name) { "" } else { "?" };
                        write!(f, "{name}{marker}: {}", field.signature())?;
                    }
                    f.write_str(" }")?;
                }
            }
            SchemaKind::Array { element, checks } => {
                match element.kind {
                    SchemaKind::Union { .. } | SchemaKind::Optional { .. } => {
                        write!(f, "({})[]", element.signature())?;
                    }
                    _ => write!(f, "{}[]", element.signature())?,
                }
                write_checks(f, checks)?;
            }
            SchemaKind::Tuple { elements } => {
                f.write_str("[")?;
                write_joined(f, elements, ", ")?;
                f.write_str("]")?;
            }
            SchemaKind::Union { variants } => write_joined(f, variants, " | ")?,
            SchemaKind::Optional { inner } => write!(f, "{} | undefined", inner.signature())?,
            SchemaKind::Default { inner, value } => match value.resolve() {
                Ok(value) => write!(f, "{} = {value}", inner.signature())?,
                Err(_) => write!(f, "{} = <computed>", inner.signature())?,
            },
            SchemaKind::String { checks } => {
                f.write_str("string")?;
                write_checks(f, checks)?;
            }
            SchemaKind::Number { checks } => {
                f.write_str("number")?;
                write_checks(f, checks)?;
            }
            SchemaKind::Date { checks } => {
                f.write_str("date")?;
                write_checks(f, checks)?;
            }
            SchemaKind::Enum { values } => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{value}")?;
                }
            }
            SchemaKind::Literal { value } => write!(f, "{value}")?,
            SchemaKind::Boolean
            | SchemaKind::Any
            | SchemaKind::Never
            | SchemaKind::Undefined
            | SchemaKind::Unsupported { .. } => f.write_str(node.kind_name())?,
        }

        if node.nullable {
            f.write_str(" | null")?;
        }
        Ok(())
    }
}

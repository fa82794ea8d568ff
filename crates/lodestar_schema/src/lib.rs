//! Schema tree model for Lodestar.
//!
//! Tool arguments and structured outputs are described as a tree of
//! [`SchemaNode`]s. The tree is richer than what most model providers accept:
//! it has dates, tuples, computed defaults and string checks that a provider
//! may reject outright. Provider layers in `lodestar_compat` rewrite the tree
//! into something the provider accepts.
//!
//! # Architecture
//!
//! - [`SchemaNode`] / [`SchemaKind`] : the tree itself
//! - [`check`] : leaf constraints (string, number, array, date)
//! - [`TargetDialect`] : schema dialect a rewritten tree is meant for
//! - [`Signature`] : compact textual form of a subtree
//! - [`import`] : reading JSON Schema and `schemars` output into a tree

pub mod check;
pub mod dialect;
pub mod error;
pub mod import;
pub mod node;
pub mod signature;

pub use check::{
    ArrayCheck, ArrayCheckKind, DateCheck, NumberCheck, NumberCheckKind, StringCheck,
    StringCheckKind,
};
pub use dialect::{NullableStyle, TargetDialect};
pub use error::{DefaultValueError, ImportError};
pub use node::{
    Check, DefaultFactory, DefaultValue, NodeKind, ObjectSchema, SchemaKind, SchemaNode,
    UnknownKeys,
};
pub use signature::Signature;

//! Provider schema compatibility for Lodestar.
//!
//! Model providers accept tool and structured-output schemas in restricted,
//! provider-specific dialects. A [`SchemaCompatLayer`] rewrites a rich
//! [`SchemaNode`](lodestar_schema::SchemaNode) tree into what one provider
//! accepts. Constructs the provider cannot express are narrowed, and their
//! meaning is appended to descriptions so the model can still honor it.
//!
//! # Architecture
//!
//! - [`SchemaCompatLayer`] : rewrite rules, with the base rewrite as default
//!   methods
//! - [`providers`] : built-in layers
//! - [`detect`] : model family heuristics the layers branch on
//! - [`CompatRegistry`] : picks a layer for a model
//!
//! # Example
//!
//! ```
//! use lodestar_compat::CompatRegistry;
//! use lodestar_models::ModelDescriptor;
//! use lodestar_schema::{SchemaNode, TargetDialect};
//!
//! let model = ModelDescriptor::new("openai", "gpt-4o").with_structured_outputs(true);
//! let schema = SchemaNode::object().field("note", SchemaNode::string().optional());
//!
//! let out = CompatRegistry::with_defaults().apply(&model, &schema).unwrap();
//! assert_eq!(out.target, TargetDialect::OpenApi3);
//! assert!(out.schema.as_object().unwrap().fields["note"].nullable);
//! ```

pub mod detect;
pub mod error;
pub mod layer;
pub mod notes;
pub mod providers;
pub mod registry;

pub use error::CompatError;
pub use layer::{SchemaCompatLayer, UnionPolicy};
pub use registry::{CompatOutput, CompatRegistry};

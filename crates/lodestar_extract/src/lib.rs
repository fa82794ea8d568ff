//! Document metadata extraction with an LLM.
//!
//! [`TitleExtractor`] asks a model for a title per source document: each
//! chunk of a document yields a candidate title, and the candidates are
//! combined into one title that every chunk of the document shares.
//!
//! # Example
//!
//! ```ignore
//! use lodestar_extract::{DocumentNode, TitleExtractor};
//!
//! let llm = registry.llm("openai/gpt-4o-mini")?;
//! let extractor = TitleExtractor::new(llm).with_nodes(3);
//!
//! let nodes = vec![
//!     DocumentNode::text("c1", "Rust ownership rules...").with_source("guide"),
//!     DocumentNode::text("c2", "Borrowing and lifetimes...").with_source("guide"),
//! ];
//! let titles = extractor.extract(&nodes).await?;
//! assert_eq!(titles[0], titles[1]);
//! ```

pub mod error;
pub mod node;
pub mod prompt;
pub mod title;

pub use error::{ExtractError, TemplateError};
pub use node::{ContentKind, DocumentNode};
pub use prompt::PromptTemplate;
pub use title::{ExtractedTitle, TitleExtractor};

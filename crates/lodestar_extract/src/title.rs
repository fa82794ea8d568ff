//! Document title extraction.

use crate::error::ExtractError;
use crate::node::{ContentKind, DocumentNode};
use crate::prompt::PromptTemplate;
use futures::future::try_join_all;
use indexmap::IndexMap;
use lodestar_models::llm::{GenerationRequest, Llm};

/// Default number of chunks per document used for candidate titles.
pub const DEFAULT_TITLE_NODES: usize = 5;

/// Title assigned to one input chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedTitle {
    /// Title of the chunk's document, empty when none was extracted.
    pub document_title: String,
}

/// Extracts one title per source document.
///
/// For each document, the first [`nodes`](Self::with_nodes) chunks are
/// turned into candidate titles concurrently with the node template. The
/// candidates, joined with `", "`, are then passed through the combine
/// template to produce the document title.
#[derive(Debug, Clone)]
pub struct TitleExtractor {
    llm: Llm,
    nodes: usize,
    text_nodes_only: bool,
    node_template: PromptTemplate,
    combine_template: PromptTemplate,
}

impl TitleExtractor {
    /// Creates an extractor with the built-in prompts.
    #[must_use]
    pub fn new(llm: Llm) -> Self {
        Self {
            llm,
            nodes: DEFAULT_TITLE_NODES,
            text_nodes_only: false,
            node_template: PromptTemplate::title_node(),
            combine_template: PromptTemplate::title_combine(),
        }
    }

    /// Sets how many chunks per document produce candidate titles. With
    /// zero, no requests are made and every title is empty.
    #[must_use]
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    /// Skips chunks whose content is not [`ContentKind::Text`].
    #[must_use]
    pub fn with_text_nodes_only(mut self, enabled: bool) -> Self {
        self.text_nodes_only = enabled;
        self
    }

    /// Replaces the candidate prompt. The template must reference
    /// `{context}`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Template`] if `{context}` is missing.
    pub fn with_node_template(mut self, template: impl Into<String>) -> Result<Self, ExtractError> {
        self.node_template = PromptTemplate::with_context(template)?;
        Ok(self)
    }

    /// Replaces the combine prompt. The template must reference `{context}`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Template`] if `{context}` is missing.
    pub fn with_combine_template(
        mut self,
        template: impl Into<String>,
    ) -> Result<Self, ExtractError> {
        self.combine_template = PromptTemplate::with_context(template)?;
        Ok(self)
    }

    /// Returns one title per input chunk, in input order.
    ///
    /// Blank chunks and chunks skipped by
    /// [`with_text_nodes_only`](Self::with_text_nodes_only) get an empty
    /// title. Chunks of the same document share its title.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Generation`] if a model request fails.
    pub async fn extract(
        &self,
        nodes: &[DocumentNode],
    ) -> Result<Vec<ExtractedTitle>, ExtractError> {
        let mut results = vec![ExtractedTitle::default(); nodes.len()];

        let mut documents: IndexMap<&str, Vec<(usize, &DocumentNode)>> = IndexMap::new();
        for (index, node) in nodes.iter().enumerate() {
            if node.is_blank() || (self.text_nodes_only && node.kind != ContentKind::Text) {
                continue;
            }
            documents
                .entry(node.document_key())
                .or_default()
                .push((index, node));
        }

        for (key, chunks) in &documents {
            let title = self.document_title(chunks).await?;
            tracing::debug!(
                document = *key,
                chunks = chunks.len(),
                %title,
                "extracted document title"
            );
            for (index, _) in chunks {
                results[*index].document_title.clone_from(&title);
            }
        }

        Ok(results)
    }

    async fn document_title(
        &self,
        chunks: &[(usize, &DocumentNode)],
    ) -> Result<String, ExtractError> {
        if self.nodes == 0 {
            return Ok(String::new());
        }

        let candidates = try_join_all(
            chunks
                .iter()
                .take(self.nodes)
                .map(|(_, node)| self.complete(&self.node_template, &node.content, "candidate")),
        )
        .await?;

        self.complete(&self.combine_template, &candidates.join(", "), "combined")
            .await
    }

    /// Sends one single-message prompt and returns the trimmed text reply.
    async fn complete(
        &self,
        template: &PromptTemplate,
        context: &str,
        stage: &'static str,
    ) -> Result<String, ExtractError> {
        let prompt = template.format_context(context)?;
        let response = self.llm.generate(GenerationRequest::new(prompt)).await?;

        match response.text() {
            Some(text) => Ok(text.trim().to_string()),
            None => {
                tracing::warn!(
                    stage,
                    model = %self.llm.descriptor(),
                    blocks = response.content.len(),
                    "title extraction output was not text"
                );
                Ok(String::new())
            }
        }
    }
}

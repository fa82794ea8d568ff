//! Input chunks for extractors.

/// What a [`DocumentNode`] holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentKind {
    /// Plain text.
    #[default]
    Text,
    /// Text derived from an image (caption, OCR output).
    Image,
    /// Any other content rendered as text.
    Other,
}

/// A chunk of a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentNode {
    /// Unique id of the chunk.
    pub id: String,
    /// Id of the document the chunk was split from, if known.
    pub source_id: Option<String>,
    /// Textual content sent to the model.
    pub content: String,
    /// Kind of content.
    pub kind: ContentKind,
}

impl DocumentNode {
    /// Creates a text chunk without a source document.
    #[must_use]
    pub fn text(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source_id: None,
            content: content.into(),
            kind: ContentKind::Text,
        }
    }

    /// Sets the source document id.
    #[must_use]
    pub fn with_source(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    /// Sets the content kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ContentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Key chunks are grouped by: the source document id, or the chunk's own
    /// id when it has no source.
    #[must_use]
    pub fn document_key(&self) -> &str {
        self.source_id.as_deref().unwrap_or(&self.id)
    }

    /// Whether the content is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

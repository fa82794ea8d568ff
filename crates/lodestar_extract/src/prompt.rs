//! Prompt templates with `{name}` placeholders.

use crate::error::TemplateError;

/// Variable holding the text a prompt is about.
pub const CONTEXT_VAR: &str = "context";

const TITLE_NODE_TEMPLATE: &str = "Context: {context}. Give a title that summarizes all of \
the unique entities, titles or themes found in the context. Title: ";

const TITLE_COMBINE_TEMPLATE: &str = "{context}. Based on the above candidate titles and \
content, what is the comprehensive title for this document? Title: ";

/// A prompt with named `{variable}` placeholders.
///
/// Every declared variable must appear in the template, and every declared
/// variable must be given a value when formatting.
///
/// ```
/// use lodestar_extract::PromptTemplate;
///
/// let template = PromptTemplate::new("Summarize: {context}", ["context"]).unwrap();
/// assert_eq!(
///     template.format(&[("context", "a report")]).unwrap(),
///     "Summarize: a report"
/// );
///
/// assert!(PromptTemplate::new("Summarize this", ["context"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Creates a template declaring `variables`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnusedVariable`] if the template text lacks a
    /// placeholder for a declared variable.
    pub fn new<I, S>(template: impl Into<String>, variables: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let template = template.into();
        let variables: Vec<String> = variables.into_iter().map(Into::into).collect();
        if let Some(name) = variables
            .iter()
            .find(|name| !template.contains(&placeholder(name)))
        {
            return Err(TemplateError::UnusedVariable { name: name.clone() });
        }
        Ok(Self {
            template,
            variables,
        })
    }

    /// Creates a template whose only variable is `{context}`.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn with_context(template: impl Into<String>) -> Result<Self, TemplateError> {
        Self::new(template, [CONTEXT_VAR])
    }

    /// Default prompt asking for a candidate title of one chunk.
    #[must_use]
    pub fn title_node() -> Self {
        Self::builtin(TITLE_NODE_TEMPLATE)
    }

    /// Default prompt combining candidate titles into a document title.
    #[must_use]
    pub fn title_combine() -> Self {
        Self::builtin(TITLE_COMBINE_TEMPLATE)
    }

    fn builtin(template: &str) -> Self {
        Self {
            template: template.to_string(),
            variables: vec![CONTEXT_VAR.to_string()],
        }
    }

    /// The raw template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The declared variables.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Substitutes `values` into the template.
    ///
    /// Values for undeclared names are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingValue`] if a declared variable has no
    /// value.
    pub fn format(&self, values: &[(&str, &str)]) -> Result<String, TemplateError> {
        let mut out = self.template.clone();
        for name in &self.variables {
            let value = values
                .iter()
                .find(|(key, _)| *key == name.as_str())
                .map(|(_, value)| *value)
                .ok_or_else(|| TemplateError::MissingValue { name: name.clone() })?;
            out = out.replace(&placeholder(name), value);
        }
        Ok(out)
    }

    /// Substitutes `context` for `{context}`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingValue`] if the template declares
    /// variables other than `context`.
    pub fn format_context(&self, context: &str) -> Result<String, TemplateError> {
        self.format(&[(CONTEXT_VAR, context)])
    }
}

fn placeholder(name: &str) -> String {
    format!("{{{name}}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_templates_reference_context() {
        for template in [PromptTemplate::title_node(), PromptTemplate::title_combine()] {
            let rebuilt = PromptTemplate::with_context(template.template()).unwrap();
            assert_eq!(rebuilt, template);
        }
    }

    #[test]
    fn format_replaces_every_occurrence() {
        let template = PromptTemplate::with_context("{context} / {context}").unwrap();
        assert_eq!(template.format_context("x").unwrap(), "x / x");
    }

    #[test]
    fn unused_variable_is_rejected() {
        let err = PromptTemplate::new("Title for {context}", ["context", "language"]).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnusedVariable {
                name: "language".into()
            }
        );
        assert_eq!(err.to_string(), "template does not reference variable `{language}`");
    }

    #[test]
    fn missing_value_is_rejected() {
        let template =
            PromptTemplate::new("{context} in {language}", ["context", "language"]).unwrap();
        assert_eq!(
            template.format_context("notes"),
            Err(TemplateError::MissingValue {
                name: "language".into()
            })
        );
        assert_eq!(
            template
                .format(&[("context", "notes"), ("language", "French")])
                .unwrap(),
            "notes in French"
        );
    }
}

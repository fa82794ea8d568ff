//! Description text added when a construct is degraded.
//!
//! Every degradation appends lines to a node's description; nothing is ever
//! replaced. Each note is a `name: value` line, and narrowed types add one
//! of the sentences below.

use lodestar_schema::SchemaNode;

/// Appends `lines` to `description`, one per line.
///
/// Returns the description unchanged when there is nothing to append.
pub(crate) fn append<I>(description: Option<&str>, lines: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = description.map(str::to_string);
    for line in lines {
        match &mut out {
            Some(text) => {
                text.push('\n');
                text.push_str(&line);
            }
            None => out = Some(line),
        }
    }
    out
}

fn article(kind: &str) -> &'static str {
    match kind.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Sentence added when a construct of kind `kind` is cast to a string.
///
/// ```
/// use lodestar_compat::notes::narrowed_sentence;
///
/// assert_eq!(
///     narrowed_sentence("tuple"),
///     r#"Argument was a "tuple" type, but you (the LLM) do not support "tuple", so it was cast to a "string" type"#
/// );
/// ```
#[must_use]
pub fn narrowed_sentence(kind: &str) -> String {
    format!(
        r#"Argument was {} "{kind}" type, but you (the LLM) do not support "{kind}", so it was cast to a "string" type"#,
        article(kind)
    )
}

/// Sentence added when an optional value of kind `kind` is cast to a
/// nullable string.
#[must_use]
pub fn optional_narrowed_sentence(kind: &str) -> String {
    format!(
        r#"Argument was an optional "{kind}" type, but you (the LLM) do not support optional "{kind}", so it was cast to a nullable "string" type"#
    )
}

/// Lines preserving the shape of a node that was replaced by a string: its
/// signature (when it says more than the kind name) and the descriptions of
/// everything below it.
pub(crate) fn shape_notes(node: &SchemaNode) -> Vec<String> {
    let mut lines = Vec::new();
    let signature = node.signature().to_string();
    if signature != node.kind_name() {
        lines.push(format!("original type: {signature}"));
    }
    lines.extend(
        node.nested_descriptions()
            .into_iter()
            .map(|(path, description)| format!("{path}: {description}")),
    );
    lines
}

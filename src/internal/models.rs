use serde::Deserialize;

use crate::utils::text;

/// One immutable article record from the store.
///
/// Records are parsed once at startup and never mutated for the lifetime of
/// the session; `id` is unique and stable, and is what list rendering keys on.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Article {
    pub id: u32,
    pub title: String,
    pub author: String,
    /// Display-only date string. No parsing or validation is performed.
    pub date: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Full body, paragraphs separated by a blank line.
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Article {
    /// The short text shown on a summary card: the stored excerpt when
    /// present, otherwise the first `budget` characters of the content with
    /// an ellipsis appended. Whitespace is collapsed so the summary flows as
    /// a single run of text regardless of paragraph breaks in the source.
    pub fn summary(&self, budget: usize) -> String {
        match &self.excerpt {
            Some(excerpt) => text::collapse_whitespace(excerpt),
            None => text::derive_excerpt(&self.content, budget),
        }
    }

    /// Paragraphs of the full body, split on the blank-line delimiter.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content.split("\n\n")
    }
}

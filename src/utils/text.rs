/// Collapse all runs of whitespace (including newlines) into single spaces
/// so multi-paragraph text can flow on one card line.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derive a summary from full article content: collapse it to a single run
/// of text, keep the first `budget` characters, append an ellipsis.
/// Truncation counts characters, never bytes, so multi-byte input is safe.
pub fn derive_excerpt(content: &str, budget: usize) -> String {
    let flat = collapse_whitespace(content);
    let mut excerpt: String = flat.chars().take(budget).collect();
    excerpt.push_str("...");
    excerpt
}

/// A tagged span of text produced by [`highlight`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Matched(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(text) | Segment::Matched(text) => text,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Segment::Matched(_))
    }
}

/// Split `text` on every case-insensitive occurrence of `term`.
///
/// Matched spans keep the original casing of the input; concatenating the
/// text of all returned segments reconstructs `text` exactly. The term is
/// matched literally by a char-wise scan, so characters that would carry
/// meaning in a pattern engine (`(`, `*`, `[`, ...) match themselves.
///
/// An empty term returns the whole input as a single plain segment.
pub fn highlight(text: &str, term: &str) -> Vec<Segment> {
    if term.is_empty() {
        return vec![Segment::Plain(text.to_string())];
    }

    let chars: Vec<char> = text.chars().collect();
    let folded: Vec<char> = chars.iter().map(|&c| fold_char(c)).collect();
    let needle: Vec<char> = term.chars().map(fold_char).collect();

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;
    while i + needle.len() <= folded.len() {
        if folded[i..i + needle.len()] == needle[..] {
            if i > plain_start {
                segments.push(Segment::Plain(chars[plain_start..i].iter().collect()));
            }
            segments.push(Segment::Matched(chars[i..i + needle.len()].iter().collect()));
            i += needle.len();
            plain_start = i;
        } else {
            i += 1;
        }
    }
    if plain_start < chars.len() {
        segments.push(Segment::Plain(chars[plain_start..].iter().collect()));
    }

    if segments.is_empty() {
        segments.push(Segment::Plain(text.to_string()));
    }
    segments
}

// One-to-one case folding; multi-char lowercase expansions keep their first
// char so haystack and needle positions stay aligned.
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(segments: &[Segment]) -> String {
        segments.iter().map(Segment::text).collect()
    }

    #[test]
    fn empty_term_returns_single_plain_segment() {
        let segments = highlight("Hello World", "");
        assert_eq!(segments, vec![Segment::Plain("Hello World".to_string())]);
    }

    #[test]
    fn splits_on_every_occurrence() {
        let segments = highlight("Hello World", "o");
        assert_eq!(
            segments,
            vec![
                Segment::Plain("Hell".to_string()),
                Segment::Matched("o".to_string()),
                Segment::Plain(" W".to_string()),
                Segment::Matched("o".to_string()),
                Segment::Plain("rld".to_string()),
            ]
        );
    }

    #[test]
    fn matching_is_case_insensitive_and_preserves_original_casing() {
        let segments = highlight("CSS Grid and css grid", "css");
        assert_eq!(
            segments,
            vec![
                Segment::Matched("CSS".to_string()),
                Segment::Plain(" Grid and ".to_string()),
                Segment::Matched("css".to_string()),
                Segment::Plain(" grid".to_string()),
            ]
        );
    }

    #[test]
    fn pattern_metacharacters_match_literally() {
        let segments = highlight("calc(100% - 2rem)", "(100%");
        assert_eq!(
            segments,
            vec![
                Segment::Plain("calc".to_string()),
                Segment::Matched("(100%".to_string()),
                Segment::Plain(" - 2rem)".to_string()),
            ]
        );

        // A term that would be an invalid regex must still match literally.
        let segments = highlight("array[0]", "[0]");
        assert!(segments.iter().any(Segment::is_match));
        assert_eq!(reconstruct(&segments), "array[0]");
    }

    #[test]
    fn match_at_start_and_end_produces_no_empty_segments() {
        let segments = highlight("abcab", "ab");
        assert_eq!(
            segments,
            vec![
                Segment::Matched("ab".to_string()),
                Segment::Plain("c".to_string()),
                Segment::Matched("ab".to_string()),
            ]
        );
    }

    #[test]
    fn adjacent_matches() {
        let segments = highlight("aaaa", "aa");
        assert_eq!(
            segments,
            vec![
                Segment::Matched("aa".to_string()),
                Segment::Matched("aa".to_string()),
            ]
        );
    }

    #[test]
    fn no_match_returns_whole_input_as_plain() {
        let segments = highlight("Hello", "xyz");
        assert_eq!(segments, vec![Segment::Plain("Hello".to_string())]);
    }

    #[test]
    fn term_longer_than_text_never_matches() {
        let segments = highlight("hi", "hello");
        assert_eq!(segments, vec![Segment::Plain("hi".to_string())]);
    }

    #[test]
    fn empty_text_with_term_yields_one_empty_plain_segment() {
        let segments = highlight("", "a");
        assert_eq!(segments, vec![Segment::Plain(String::new())]);
    }

    #[test]
    fn reconstruction_holds_for_multibyte_input() {
        let text = "Grüße an die Welt, größer als je";
        let segments = highlight(text, "GRÖSS");
        assert_eq!(reconstruct(&segments), text);
    }
}

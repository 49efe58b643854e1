use crate::internal::models::Article;

/// True when any searchable field of `article` contains `term`
/// case-insensitively. Matching is plain substring containment, not
/// tokenized or fuzzy.
pub fn article_matches(article: &Article, term: &str) -> bool {
    let needle = term.to_lowercase();
    article.title.to_lowercase().contains(&needle)
        || article.content.to_lowercase().contains(&needle)
        || article
            .excerpt
            .as_deref()
            .is_some_and(|excerpt| excerpt.to_lowercase().contains(&needle))
        || article.author.to_lowercase().contains(&needle)
        || article
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// Filter `articles` down to those matching `term`, preserving the original
/// relative order. An empty term is the identity: every article, unchanged
/// order, no ranking. An empty result is a valid state, distinct from
/// "no search active".
pub fn filter<'a>(articles: &'a [Article], term: &str) -> Vec<&'a Article> {
    if term.is_empty() {
        return articles.iter().collect();
    }
    articles
        .iter()
        .filter(|article| article_matches(article, term))
        .collect()
}

/// Memoized index set for the currently visible articles.
///
/// The store is immutable for the lifetime of the session, so the memo key
/// degenerates to the search term alone: the indices are recomputed only
/// when the term actually changes, not on unrelated redraws.
#[derive(Debug, Default)]
pub struct FilterCache {
    term: Option<String>,
    indices: Vec<usize>,
    recomputes: usize,
}

impl FilterCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices into `articles` of the records matching `term`, in store
    /// order. Returns the cached set when the term is unchanged.
    pub fn indices(&mut self, articles: &[Article], term: &str) -> &[usize] {
        if self.term.as_deref() != Some(term) {
            let start = std::time::Instant::now();
            self.indices = match term.is_empty() {
                true => (0..articles.len()).collect(),
                false => articles
                    .iter()
                    .enumerate()
                    .filter(|(_, article)| article_matches(article, term))
                    .map(|(i, _)| i)
                    .collect(),
            };
            self.term = Some(term.to_string());
            self.recomputes += 1;
            tracing::debug!(elapsed = ?start.elapsed(), term, visible = self.indices.len(), "filter.recompute");
        }
        &self.indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: u32, title: &str, author: &str, content: &str, tags: &[&str]) -> Article {
        Article {
            id,
            title: title.to_string(),
            author: author.to_string(),
            date: "Jan 1, 2024".to_string(),
            excerpt: None,
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn sample() -> Vec<Article> {
        vec![
            article(1, "CSS Grid Basics", "Maya", "Grid layout in depth.", &["css"]),
            article(2, "JS Closures", "Jonas", "Functions capture scope.", &["javascript"]),
            article(3, "Flexbox Guide", "Maya", "One-dimensional layout.", &["css", "layout"]),
        ]
    }

    #[test]
    fn empty_term_is_identity() {
        let articles = sample();
        let result = filter(&articles, "");
        assert_eq!(result.len(), articles.len());
        let ids: Vec<u32> = result.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn matches_title_case_insensitively() {
        let articles = sample();
        let result = filter(&articles, "css");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "CSS Grid Basics");
    }

    #[test]
    fn matches_content_author_and_tags() {
        let articles = sample();
        assert_eq!(filter(&articles, "capture").len(), 1);
        assert_eq!(filter(&articles, "maya")[0].id, 1);
        assert_eq!(filter(&articles, "javascript")[0].id, 2);
    }

    #[test]
    fn matches_excerpt_when_present() {
        let mut articles = sample();
        articles[1].excerpt = Some("A gentle tour of lexical scope.".to_string());
        assert_eq!(filter(&articles, "lexical")[0].id, 2);
    }

    #[test]
    fn no_match_yields_empty_result() {
        let articles = sample();
        assert!(filter(&articles, "python").is_empty());
    }

    #[test]
    fn preserves_relative_order() {
        let articles = sample();
        let ids: Vec<u32> = filter(&articles, "layout").iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn cache_recomputes_only_when_term_changes() {
        let articles = sample();
        let mut cache = FilterCache::new();

        assert_eq!(cache.indices(&articles, "css"), &[0]);
        assert_eq!(cache.recomputes, 1);

        // Same term, no recompute.
        assert_eq!(cache.indices(&articles, "css"), &[0]);
        assert_eq!(cache.recomputes, 1);

        assert_eq!(cache.indices(&articles, ""), &[0, 1, 2]);
        assert_eq!(cache.recomputes, 2);
    }
}

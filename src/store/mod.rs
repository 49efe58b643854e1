use anyhow::{Context, Result};
use once_cell::sync::Lazy;

use crate::internal::models::Article;

/// Raw article data shipped in the binary.
const ARTICLES_RON: &str = include_str!("../../assets/articles.ron");

static ARTICLES: Lazy<Vec<Article>> = Lazy::new(|| match load_embedded() {
    Ok(articles) => {
        tracing::info!("Loaded {} articles from embedded store", articles.len());
        articles
    }
    Err(e) => {
        tracing::error!("Failed to load embedded article store: {:?}", e);
        Vec::new()
    }
});

/// The full ordered article sequence, parsed once on first access and
/// immutable for the rest of the session.
pub fn articles() -> &'static [Article] {
    &ARTICLES
}

fn load_embedded() -> Result<Vec<Article>> {
    ron::from_str(ARTICLES_RON).context("Failed to parse embedded article data")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn embedded_store_parses() {
        let articles = load_embedded().expect("embedded RON must parse");
        assert!(!articles.is_empty());
    }

    #[test]
    fn article_ids_are_unique() {
        let articles = articles();
        let ids: HashSet<u32> = articles.iter().map(|a| a.id).collect();
        assert_eq!(ids.len(), articles.len());
    }

    #[test]
    fn every_article_has_title_author_and_content() {
        for article in articles() {
            assert!(!article.title.is_empty());
            assert!(!article.author.is_empty());
            assert!(!article.content.is_empty());
            assert!(!article.tags.is_empty());
        }
    }

    #[test]
    fn at_least_one_article_exercises_the_excerpt_fallback() {
        assert!(articles().iter().any(|a| a.excerpt.is_none()));
    }

    #[test]
    fn content_is_paragraph_structured() {
        assert!(articles().iter().all(|a| a.paragraphs().count() >= 2));
    }
}

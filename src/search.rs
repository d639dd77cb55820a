//! Case-insensitive substring search over the content collection.
//!
//! An article matches when the query occurs in its title, slug or body.
//! There is no scoring: results keep the relative order of the input.

use crate::article::Article;
use serde::Deserialize;

/// What an empty query string returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum EmptyQueryPolicy {
    /// The empty string is a substring of everything.
    #[default]
    #[serde(rename = "all", alias = "match_all")]
    MatchAll,
    #[serde(rename = "none", alias = "match_none")]
    MatchNone,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchEngine {
    empty_query: EmptyQueryPolicy,
}

impl SearchEngine {
    pub fn new(empty_query: EmptyQueryPolicy) -> SearchEngine {
        SearchEngine { empty_query }
    }

    pub fn empty_query_policy(&self) -> EmptyQueryPolicy {
        self.empty_query
    }

    pub fn search<'a>(&self, articles: &'a [Article], query: &str) -> Vec<&'a Article> {
        if query.is_empty() && self.empty_query == EmptyQueryPolicy::MatchNone {
            return vec![];
        }
        let needle = query.to_lowercase();
        articles
            .iter()
            .filter(|article| matches(article, &needle))
            .collect()
    }
}

/// [`SearchEngine::search`] with the default policy, where an empty query
/// matches every article.
pub fn search<'a>(articles: &'a [Article], query: &str) -> Vec<&'a Article> {
    SearchEngine::default().search(articles, query)
}

/// `needle` must already be lowercased.
fn matches(article: &Article, needle: &str) -> bool {
    article.title.to_lowercase().contains(needle)
        || article.slug.to_lowercase().contains(needle)
        || article.body.to_lowercase().contains(needle)
}

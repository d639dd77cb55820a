//! Content collection sources.
//!
//! The core operations never reach for a store themselves: callers fetch a
//! snapshot through [`ContentStore`] and hand the slice to `search` or
//! `homepage`.

use crate::article::{Article, ArticleParser};
use crate::error::{Error, SiteResult};
use std::collections::HashSet;
use std::fs::read_dir;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub trait ContentStore {
    /// Every article, in collection order.
    fn fetch_all(&self) -> &[Article];

    fn fetch_by_key(&self, slug: &str) -> Option<&Article> {
        self.fetch_all().iter().find(|article| article.slug == slug)
    }
}

/// Fixed in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    articles: Vec<Article>,
}

impl MemoryStore {
    pub fn new(articles: Vec<Article>) -> SiteResult<MemoryStore> {
        ensure_unique_slugs(&articles)?;
        Ok(MemoryStore { articles })
    }
}

impl ContentStore for MemoryStore {
    fn fetch_all(&self) -> &[Article] {
        &self.articles
    }
}

/// Markdown files under a content directory, loaded once.
///
/// Files are visited in relative path order so the collection order does not
/// depend on the filesystem's directory listing order.
#[derive(Debug)]
pub struct DirectoryStore {
    root: PathBuf,
    articles: Vec<Article>,
}

impl DirectoryStore {
    pub fn open(root: impl Into<PathBuf>) -> SiteResult<DirectoryStore> {
        let root = root.into();
        let parser = ArticleParser::new()?;

        let mut files = vec![];
        collect_markdown_files(&root, PathBuf::new(), &mut files)?;
        files.sort();

        let mut articles = Vec::with_capacity(files.len());
        for relative in files {
            let file = root.join(&relative);
            let stem = relative.with_extension("");
            let stem = stem.to_string_lossy().replace('\\', "/");
            let markdown = std::fs::read_to_string(&file).map_err(|err| Error::io(&file, err))?;
            let article = parser.parse(&file, &stem, &markdown)?;
            info!("Loaded {} -> /articles/{}", file.display(), article.slug);
            articles.push(article);
        }
        ensure_unique_slugs(&articles)?;

        info!(
            "Content collection at {} has {} articles",
            root.display(),
            articles.len()
        );
        Ok(DirectoryStore { root, articles })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentStore for DirectoryStore {
    fn fetch_all(&self) -> &[Article] {
        &self.articles
    }
}

fn collect_markdown_files(
    root: &Path,
    current: PathBuf,
    out: &mut Vec<PathBuf>,
) -> SiteResult<()> {
    let dir = root.join(&current);
    for entry in read_dir(&dir).map_err(|err| Error::io(&dir, err))? {
        let entry = entry.map_err(|err| Error::io(&dir, err))?;
        let fname = entry.file_name();
        let ftype = entry.file_type().map_err(|err| Error::io(entry.path(), err))?;
        if ftype.is_file() && fname.to_string_lossy().ends_with(".md") {
            out.push(current.join(&fname));
        } else if ftype.is_dir() {
            collect_markdown_files(root, current.join(&fname), out)?;
        } else {
            debug!("Skipping {}", entry.path().display());
        }
    }
    Ok(())
}

fn ensure_unique_slugs(articles: &[Article]) -> SiteResult<()> {
    let mut seen = HashSet::with_capacity(articles.len());
    for article in articles {
        if !seen.insert(article.slug.as_str()) {
            return Err(Error::DuplicateSlug {
                slug: article.slug.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::article;

    #[test]
    fn memory_store_fetches_by_key() {
        let store = MemoryStore::new(vec![
            article("a", "Intro to Go", "2024-01-01"),
            article("b", "Rust Basics", "2024-03-01"),
        ])
        .unwrap();

        assert_eq!(store.fetch_all().len(), 2);
        assert_eq!(store.fetch_by_key("b").map(|a| a.title.as_str()), Some("Rust Basics"));
        assert!(store.fetch_by_key("missing").is_none());
    }

    #[test]
    fn memory_store_rejects_duplicate_slugs() {
        let err = MemoryStore::new(vec![
            article("a", "One", "2024-01-01"),
            article("a", "Two", "2024-01-02"),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateSlug { slug } if slug == "a"));
    }
}

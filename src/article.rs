use crate::error::{Error, SiteResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub publish_date: NaiveDateTime,
    pub tags: Vec<String>,
    pub body: String,
    pub image: Option<String>,
}

/// Listing view of an article, without the body.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub author: &'a str,
    pub publish_date: NaiveDateTime,
    pub tags: &'a [String],
    pub image: Option<&'a str>,
}

impl Article {
    pub fn summary(&self) -> ArticleSummary<'_> {
        ArticleSummary {
            slug: &self.slug,
            title: &self.title,
            author: &self.author,
            publish_date: self.publish_date,
            tags: &self.tags,
            image: self.image.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrontMatter {
    title: String,
    author: String,
    pub_date: String,
    #[serde(default)]
    tags: Vec<String>,
    image: Option<String>,
    slug: Option<String>,
}

/// Splits a markdown file into YAML front matter and body and builds the
/// [`Article`] out of both.
#[derive(Debug)]
pub struct ArticleParser {
    front_matter_regex: Regex,
    slug_separator_regex: Regex,
    url_safe_slug_regex: Regex,
}

impl ArticleParser {
    pub fn new() -> SiteResult<ArticleParser> {
        let front_matter_regex =
            Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)(.*)\z")?;
        let slug_separator_regex = Regex::new(r"[^a-z0-9]+")?;
        let url_safe_slug_regex = Regex::new(r"\A[A-Za-z0-9_-]+(?:/[A-Za-z0-9_-]+)*\z")?;

        Ok(ArticleParser {
            front_matter_regex,
            slug_separator_regex,
            url_safe_slug_regex,
        })
    }

    /// `file` is only used in error messages; `stem` is the slug fallback.
    pub fn parse(&self, file: &Path, stem: &str, markdown: &str) -> SiteResult<Article> {
        let caps = self
            .front_matter_regex
            .captures(markdown)
            .ok_or_else(|| Error::FrontMatter {
                path: file.to_path_buf(),
                message: "missing `---` delimited front matter".to_string(),
            })?;
        let yaml = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        let front: FrontMatter = serde_yaml::from_str(yaml).map_err(|source| Error::Yaml {
            path: file.to_path_buf(),
            source,
        })?;

        let slug = match front.slug {
            Some(slug) if self.url_safe_slug_regex.is_match(slug.trim()) => {
                slug.trim().to_string()
            }
            Some(slug) => {
                return Err(Error::FrontMatter {
                    path: file.to_path_buf(),
                    message: format!("`slug` must be URL-safe, got `{slug}`"),
                })
            }
            None => self.slugify(stem),
        };
        if slug.is_empty() {
            return Err(Error::FrontMatter {
                path: file.to_path_buf(),
                message: format!("cannot derive a slug from `{stem}`"),
            });
        }

        Ok(Article {
            slug,
            title: front.title,
            author: front.author,
            publish_date: parse_publish_date(&front.pub_date)?,
            tags: front.tags,
            body: body.to_string(),
            image: front.image.filter(|image| !image.is_empty()),
        })
    }

    /// Lowercases and joins ASCII alphanumeric runs with `-`; keeps `/` so
    /// nested content paths stay distinct.
    pub fn slugify(&self, stem: &str) -> String {
        stem.split('/')
            .map(|segment| {
                self.slug_separator_regex
                    .split(&segment.to_lowercase())
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join("-")
            })
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` (or with a space) and RFC 3339.
/// Offsets are normalised to UTC so ordering stays total.
pub fn parse_publish_date(value: &str) -> SiteResult<NaiveDateTime> {
    let trimmed = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| Error::InvalidDate {
            value: value.to_string(),
        })
}

/// Human readable publish date, e.g. `March 1, 2024`.
pub fn format_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

use crate::error::{Error, SiteResult};
use crate::search::EmptyQueryPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "centauri.toml";

/// Non-featured articles shown on the homepage.
pub const HOMEPAGE_ARTICLE_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub templates_dir: Option<PathBuf>,
    pub log_level: String,
    pub homepage_limit: usize,
    /// Request paths ending in any of these are answered with 403.
    pub protected_suffixes: Vec<String>,
    pub site: SiteConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub title: String,
    pub tagline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub empty_query: EmptyQueryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("dist"),
            templates_dir: None,
            log_level: "info".to_string(),
            homepage_limit: HOMEPAGE_ARTICLE_LIMIT,
            protected_suffixes: vec!["/protected".to_string()],
            site: SiteConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            title: "Cosmic Centauri".to_string(),
            tagline: "Articles, Stories & Tutorials for Tech People".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(source: &str, path: &Path) -> SiteResult<Config> {
        toml::from_str(source).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An explicit path must exist. Without one, `centauri.toml` in the
    /// working directory is read when present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> SiteResult<Config> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.is_file() {
                    return Ok(Config::default());
                }
                path
            }
        };
        let source = std::fs::read_to_string(&path).map_err(|err| Error::io(&path, err))?;
        Config::from_toml(&source, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_defaults() {
        let config = Config::from_toml("", Path::new("centauri.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.homepage_limit, HOMEPAGE_ARTICLE_LIMIT);
        assert_eq!(config.search.empty_query, EmptyQueryPolicy::MatchAll);
    }

    #[test]
    fn overrides_nested_tables() {
        let source = r#"
content_dir = "posts"
homepage_limit = 3

[site]
title = "Notes"

[search]
empty_query = "none"
"#;
        let config = Config::from_toml(source, Path::new("centauri.toml")).unwrap();
        assert_eq!(config.content_dir, PathBuf::from("posts"));
        assert_eq!(config.homepage_limit, 3);
        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.site.tagline, SiteConfig::default().tagline);
        assert_eq!(config.search.empty_query, EmptyQueryPolicy::MatchNone);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml("homepage_limt = 3", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}

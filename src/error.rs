use std::path::PathBuf;

pub type SiteResult<T> = Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad front matter in {}: {message}", path.display())]
    FrontMatter { path: PathBuf, message: String },

    #[error("invalid yaml in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid publish date `{value}`")]
    InvalidDate { value: String },

    #[error("duplicate slug `{slug}`")]
    DuplicateSlug { slug: String },

    #[error("slug `{slug}` is reserved: {reason}")]
    ReservedSlug { slug: String, reason: &'static str },

    #[error("{target} answered {status} during the build")]
    Build { target: String, status: u16 },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid request path `{0}`")]
    RequestPath(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

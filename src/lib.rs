//! A markdown blog: content collection loading, article search, homepage
//! selection, page rendering and static output.

pub mod article;
pub mod config;
pub mod content;
pub mod error;
pub mod homepage;
pub mod render;
pub mod search;
pub mod site;
pub mod ssg;

pub use article::{Article, ArticleParser, ArticleSummary};
pub use config::Config;
pub use content::{ContentStore, DirectoryStore, MemoryStore};
pub use error::{Error, SiteResult};
pub use homepage::{newest_first, select_homepage_view, HomepageView};
pub use search::{search, EmptyQueryPolicy, SearchEngine};
pub use site::{Request, Response, Route, Site};
pub use ssg::Ssg;

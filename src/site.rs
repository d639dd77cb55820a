//! Request routing for the blog.
//!
//! [`Site::respond`] takes a request target such as
//! `/articles/search?query=rust` and produces a complete [`Response`]. The
//! access-control check runs before any route.

use crate::config::Config;
use crate::content::ContentStore;
use crate::error::{Error, SiteResult};
use crate::homepage::{newest_first, select_homepage_view};
use crate::render::Renderer;
use crate::search::SearchEngine;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

pub const HTML: &str = "text/html; charset=utf-8";
pub const JSON: &str = "application/json";
pub const TEXT: &str = "text/plain; charset=utf-8";

pub const HELLO_MESSAGE: &str = "Hello from the Centauri API!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub path: String,
    pub query: Option<String>,
}

impl Request {
    /// Parses an origin-form request target (`/path?key=value`).
    pub fn parse(target: &str) -> SiteResult<Request> {
        if !target.starts_with('/') || target.starts_with("//") {
            return Err(Error::RequestPath(target.to_string()));
        }
        let url = Url::parse("http://localhost/")
            .and_then(|base| base.join(target))
            .map_err(|_| Error::RequestPath(target.to_string()))?;
        let query = url
            .query_pairs()
            .find(|(key, _)| key == "query")
            .map(|(_, value)| value.into_owned());

        Ok(Request {
            path: url.path().to_string(),
            query,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub location: Option<String>,
    pub body: String,
}

impl Response {
    fn ok(content_type: &'static str, body: String) -> Response {
        Response {
            status: 200,
            content_type,
            location: None,
            body,
        }
    }

    fn text(status: u16, body: &str) -> Response {
        Response {
            status,
            content_type: TEXT,
            location: None,
            body: body.to_string(),
        }
    }

    fn redirect(location: &str) -> Response {
        Response {
            status: 302,
            content_type: TEXT,
            location: Some(location.to_string()),
            body: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Home,
    Articles,
    Article(&'a str),
    Search,
    About,
    NotFound,
    PostsApi,
    HelloApi,
    Unknown,
}

impl<'a> Route<'a> {
    /// `/articles/` and `/articles/index.html` both resolve to the listing.
    pub fn resolve(path: &'a str) -> Route<'a> {
        let path = path.strip_suffix("index.html").unwrap_or(path);
        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".html").unwrap_or(path);
        match path {
            "" => Route::Home,
            "/articles" => Route::Articles,
            "/articles/search" => Route::Search,
            "/about" => Route::About,
            "/404" => Route::NotFound,
            "/api/posts.json" => Route::PostsApi,
            "/api/hello.json" => Route::HelloApi,
            _ => match path.strip_prefix("/articles/") {
                Some(slug) if !slug.is_empty() => Route::Article(slug),
                _ => Route::Unknown,
            },
        }
    }
}

pub struct Site {
    store: Box<dyn ContentStore>,
    renderer: Renderer,
    engine: SearchEngine,
    homepage_limit: usize,
    protected_suffixes: Vec<String>,
}

impl Site {
    /// Fails when an article page would be answered by something other than
    /// the article route.
    pub fn new(config: &Config, store: Box<dyn ContentStore>) -> SiteResult<Site> {
        for article in store.fetch_all() {
            let path = format!("/articles/{}", article.slug);
            if Route::resolve(&path) != Route::Article(article.slug.as_str()) {
                return Err(Error::ReservedSlug {
                    slug: article.slug.clone(),
                    reason: "shadowed by a built-in route",
                });
            }
            if config
                .protected_suffixes
                .iter()
                .any(|suffix| path.ends_with(suffix.as_str()))
            {
                return Err(Error::ReservedSlug {
                    slug: article.slug.clone(),
                    reason: "matches a protected path",
                });
            }
        }

        Ok(Site {
            store,
            renderer: Renderer::new(config)?,
            engine: SearchEngine::new(config.search.empty_query),
            homepage_limit: config.homepage_limit,
            protected_suffixes: config.protected_suffixes.clone(),
        })
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    pub fn respond(&self, target: &str) -> Response {
        let request = match Request::parse(target) {
            Ok(request) => request,
            Err(err) => {
                warn!("Rejecting request: {}", err);
                return Response::text(400, "Bad Request");
            }
        };
        if let Some(response) = self.middleware(&request) {
            return response;
        }
        let route = Route::resolve(&request.path);
        debug!("{} -> {:?}", request.path, route);
        self.route(route, &request)
    }

    fn middleware(&self, request: &Request) -> Option<Response> {
        let protected = self
            .protected_suffixes
            .iter()
            .any(|suffix| request.path.ends_with(suffix.as_str()));
        if protected {
            warn!("Access denied for {}", request.path);
            return Some(Response::text(403, "Access Denied"));
        }
        None
    }

    fn route(&self, route: Route<'_>, request: &Request) -> Response {
        let articles = self.store.fetch_all();
        match route {
            Route::Home => Response::ok(
                HTML,
                self.renderer
                    .homepage(&select_homepage_view(articles, self.homepage_limit)),
            ),
            Route::Articles => Response::ok(HTML, self.renderer.listing(&newest_first(articles))),
            Route::Article(slug) => match self.store.fetch_by_key(slug) {
                Some(article) => Response::ok(HTML, self.renderer.article(article)),
                None => {
                    debug!("No article with slug {}", slug);
                    Response::redirect("/404")
                }
            },
            Route::Search => match request.query.as_deref() {
                Some(query) => {
                    let hits = self.engine.search(articles, query);
                    debug!("Search {:?} matched {} articles", query, hits.len());
                    Response::ok(HTML, self.renderer.search_results(query, &hits))
                }
                None => {
                    warn!("Search request without a `query` parameter");
                    Response::text(400, "Bad Request: missing `query` parameter")
                }
            },
            Route::About => Response::ok(HTML, self.renderer.about()),
            Route::PostsApi => {
                let summaries: Vec<_> = newest_first(articles)
                    .into_iter()
                    .map(|article| article.summary())
                    .collect();
                self.json(&summaries)
            }
            Route::HelloApi => self.json(&json! {
                {
                    "message": HELLO_MESSAGE
                }
            }),
            Route::NotFound | Route::Unknown => Response {
                status: 404,
                content_type: HTML,
                location: None,
                body: self.renderer.not_found(),
            },
        }
    }

    fn json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Response {
        match serde_json::to_string(value) {
            Ok(body) => Response::ok(JSON, body),
            Err(err) => {
                warn!("Failed to encode JSON response: {}", err);
                Response::text(500, "Internal Server Error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_request_target() {
        let request = Request::parse("/articles/search?query=Rust%20Basics&page=2").unwrap();
        assert_eq!(request.path, "/articles/search");
        assert_eq!(request.query.as_deref(), Some("Rust Basics"));

        let plus = Request::parse("/articles/search?query=type+script").unwrap();
        assert_eq!(plus.query.as_deref(), Some("type script"));

        let empty = Request::parse("/articles/search?query=").unwrap();
        assert_eq!(empty.query.as_deref(), Some(""));

        assert!(Request::parse("/").unwrap().query.is_none());
        assert!(matches!(
            Request::parse("articles"),
            Err(Error::RequestPath(_))
        ));
        assert!(matches!(
            Request::parse("//example.com/articles"),
            Err(Error::RequestPath(_))
        ));
    }

    #[test]
    fn resolves_routes() {
        assert_eq!(Route::resolve("/"), Route::Home);
        assert_eq!(Route::resolve("/index.html"), Route::Home);
        assert_eq!(Route::resolve("/articles/"), Route::Articles);
        assert_eq!(Route::resolve("/articles/index.html"), Route::Articles);
        assert_eq!(Route::resolve("/articles/search"), Route::Search);
        assert_eq!(Route::resolve("/articles/rust-basics"), Route::Article("rust-basics"));
        assert_eq!(Route::resolve("/articles/2024/go"), Route::Article("2024/go"));
        assert_eq!(Route::resolve("/about/"), Route::About);
        assert_eq!(Route::resolve("/404.html"), Route::NotFound);
        assert_eq!(Route::resolve("/api/posts.json"), Route::PostsApi);
        assert_eq!(Route::resolve("/api/hello.json"), Route::HelloApi);
        assert_eq!(Route::resolve("/nope"), Route::Unknown);
    }
}

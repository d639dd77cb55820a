//! HTML page rendering.
//!
//! Templates are plain HTML with `{{ name }}` placeholders. Values passed to
//! [`Template::fill`] are inserted as-is, so text must go through
//! [`escape_html`] first; rendered fragments (cards, markdown) are not escaped
//! again.

use crate::article::{format_date, Article};
use crate::config::Config;
use crate::error::{Error, SiteResult};
use crate::homepage::HomepageView;
use comrak::ComrakOptions;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

const BUILTIN_TEMPLATES: [(&str, &str); 10] = [
    ("layout.html", include_str!("../assets/layout.html")),
    ("home.html", include_str!("../assets/home.html")),
    ("articles.html", include_str!("../assets/articles.html")),
    ("article.html", include_str!("../assets/article.html")),
    ("search.html", include_str!("../assets/search.html")),
    ("about.html", include_str!("../assets/about.html")),
    ("404.html", include_str!("../assets/404.html")),
    ("card.html", include_str!("../assets/card.html")),
    ("featured.html", include_str!("../assets/featured.html")),
    ("search_form.html", include_str!("../assets/search_form.html")),
];

#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    /// Replaces every `{{ name }}` with its value; unknown names become empty.
    pub fn fill(&self, placeholder: &Regex, values: &HashMap<&str, String>) -> String {
        placeholder
            .replace_all(&self.source, |caps: &Captures| {
                values.get(&caps[1]).cloned().unwrap_or_default()
            })
            .into_owned()
    }
}

#[derive(Debug)]
pub struct Renderer {
    templates: HashMap<&'static str, Template>,
    placeholder_regex: Regex,
    option: ComrakOptions,
    site_title: String,
    tagline: String,
}

impl Renderer {
    pub fn new(config: &Config) -> SiteResult<Renderer> {
        let mut option = ComrakOptions::default();
        option.extension.strikethrough = true;
        option.extension.footnotes = true;
        option.extension.autolink = true;
        option.extension.table = true;
        option.extension.description_lists = true;
        option.render.unsafe_ = true;

        Ok(Renderer {
            templates: load_templates(config.templates_dir.as_deref())?,
            placeholder_regex: Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")?,
            option,
            site_title: config.site.title.clone(),
            tagline: config.site.tagline.clone(),
        })
    }

    fn fill(&self, name: &str, values: HashMap<&str, String>) -> String {
        match self.templates.get(name) {
            Some(template) => template.fill(&self.placeholder_regex, &values),
            None => String::new(),
        }
    }

    fn page(&self, title: &str, content: String) -> String {
        self.fill(
            "layout.html",
            HashMap::from([
                ("title", escape_html(title)),
                ("site_title", escape_html(&self.site_title)),
                ("content", content),
            ]),
        )
    }

    pub fn markdown_to_html(&self, markdown: &str) -> String {
        comrak::markdown_to_html(markdown, &self.option)
    }

    fn search_form(&self, query: &str) -> String {
        self.fill("search_form.html", HashMap::from([("query", escape_html(query))]))
    }

    fn card_values(&self, article: &Article) -> HashMap<&'static str, String> {
        HashMap::from([
            ("slug", escape_html(&article.slug)),
            ("title", escape_html(&article.title)),
            ("date", escape_html(&format_date(&article.publish_date))),
            ("tags", tags_html(&article.tags)),
            ("image", image_html(article.image.as_deref())),
        ])
    }

    fn cards(&self, articles: &[&Article]) -> String {
        articles
            .iter()
            .map(|article| self.fill("card.html", self.card_values(article)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn homepage(&self, view: &HomepageView<'_>) -> String {
        let featured = view
            .most_recent
            .map(|article| self.fill("featured.html", self.card_values(article)))
            .unwrap_or_default();
        let content = self.fill(
            "home.html",
            HashMap::from([
                ("tagline", escape_html(&self.tagline)),
                ("search_form", self.search_form("")),
                ("featured", featured),
                ("cards", self.cards(&view.others)),
            ]),
        );
        self.page("Home", content)
    }

    pub fn listing(&self, articles: &[&Article]) -> String {
        let content = self.fill(
            "articles.html",
            HashMap::from([
                ("search_form", self.search_form("")),
                ("cards", self.cards(articles)),
            ]),
        );
        self.page("Articles", content)
    }

    pub fn article(&self, article: &Article) -> String {
        debug!("Rendering article {}", article.slug);
        let content = self.fill(
            "article.html",
            HashMap::from([
                ("title", escape_html(&article.title)),
                ("author", escape_html(&article.author)),
                ("date", escape_html(&format_date(&article.publish_date))),
                ("tags", tags_html(&article.tags)),
                ("image", image_html(article.image.as_deref())),
                ("body", self.markdown_to_html(&article.body)),
            ]),
        );
        self.page(&article.title, content)
    }

    pub fn search_results(&self, query: &str, hits: &[&Article]) -> String {
        let content = self.fill(
            "search.html",
            HashMap::from([
                ("search_form", self.search_form(query)),
                ("query", escape_html(query)),
                ("cards", self.cards(hits)),
            ]),
        );
        self.page("Search Results", content)
    }

    pub fn about(&self) -> String {
        let content = self.fill(
            "about.html",
            HashMap::from([
                ("site_title", escape_html(&self.site_title)),
                ("tagline", escape_html(&self.tagline)),
            ]),
        );
        self.page("About", content)
    }

    pub fn not_found(&self) -> String {
        self.page("Not Found", self.fill("404.html", HashMap::new()))
    }
}

fn load_templates(dir: Option<&Path>) -> SiteResult<HashMap<&'static str, Template>> {
    let mut templates = HashMap::with_capacity(BUILTIN_TEMPLATES.len());
    for (name, builtin) in BUILTIN_TEMPLATES {
        let source = match dir.map(|dir| dir.join(name)) {
            Some(path) if path.is_file() => {
                debug!("Using template override {}", path.display());
                std::fs::read_to_string(&path).map_err(|err| Error::io(&path, err))?
            }
            _ => builtin.to_string(),
        };
        templates.insert(name, Template { source });
    }
    Ok(templates)
}

fn tags_html(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let spans = tags
        .iter()
        .map(|tag| format!("<span class=\"tag\">{}</span>", escape_html(tag)))
        .collect::<Vec<_>>()
        .join("");
    format!("<div class=\"tags\">{spans}</div>")
}

fn image_html(image: Option<&str>) -> String {
    match image {
        Some(image) => format!(
            "<img src=\"/images/{}\" alt=\"Article Image\" />",
            escape_html(image)
        ),
        None => String::new(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

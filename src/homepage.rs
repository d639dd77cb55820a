use crate::article::Article;
use serde::Serialize;

/// The landing view: one featured article and a bounded list of the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageView<'a> {
    pub most_recent: Option<&'a Article>,
    pub others: Vec<&'a Article>,
}

/// Newest first. The sort is stable, so articles sharing a publish date keep
/// their collection order.
pub fn newest_first(articles: &[Article]) -> Vec<&Article> {
    let mut sorted: Vec<&Article> = articles.iter().collect();
    sorted.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
    sorted
}

pub fn select_homepage_view(articles: &[Article], limit: usize) -> HomepageView<'_> {
    let mut sorted = newest_first(articles).into_iter();
    let most_recent = sorted.next();
    let others = sorted.take(limit).collect();
    HomepageView {
        most_recent,
        others,
    }
}

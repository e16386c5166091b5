use super::{lock, Store};
use crate::domain::news::{NewNewsArticle, NewsArticle};
use crate::domain::Id;
use chrono::Utc;
use std::cmp::Reverse;

pub const DEFAULT_NEWS_LIMIT: usize = 10;

impl Store {
    /// Newest first by publication time.
    pub fn recent_news(&self, limit: usize) -> Vec<NewsArticle> {
        let mut articles: Vec<_> = lock(&self.news).values().cloned().collect();
        articles.sort_by_key(|a| Reverse(a.published_at));
        articles.truncate(limit);
        articles
    }

    pub fn news_for_company(&self, company_id: Id) -> Vec<NewsArticle> {
        lock(&self.news)
            .values()
            .filter(|a| a.company_id == Some(company_id))
            .cloned()
            .collect()
    }

    pub fn create_news_article(&self, new: NewNewsArticle) -> NewsArticle {
        let article = NewsArticle {
            id: self.ids.next_id(),
            title: new.title,
            content: new.content,
            source: new.source,
            company_id: new.company_id,
            sentiment: new.sentiment,
            published_at: new.published_at,
            created_at: Utc::now(),
        };
        lock(&self.news).insert(article.id, article.clone());
        article
    }
}

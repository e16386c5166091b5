use crate::domain::{Id, Sentiment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: Id,
    pub title: String,
    pub content: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<Id>,
    pub sentiment: Sentiment,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNewsArticle {
    pub title: String,
    pub content: String,
    pub source: String,
    pub company_id: Option<Id>,
    pub sentiment: Sentiment,
    pub published_at: DateTime<Utc>,
}

/// Mean of +1/-1/0 per article; 0 when there are no articles.
pub fn average_sentiment(articles: &[NewsArticle]) -> f64 {
    if articles.is_empty() {
        return 0.0;
    }
    let total: f64 = articles.iter().map(|a| a.sentiment.weight()).sum();
    total / articles.len() as f64
}

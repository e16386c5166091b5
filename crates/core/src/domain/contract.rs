//! Inbound payloads as they arrive over the wire, and their validation into
//! the store's insert types.
//!
//! Every field is optional at the serde level so a malformed body surfaces as a
//! [`ValidationError`] rather than a deserializer error.

use crate::domain::alert::{NewMarketAlert, Severity};
use crate::domain::company::{Financials, NewCeoProfile, NewCompany};
use crate::domain::news::NewNewsArticle;
use crate::domain::portfolio::NewPosition;
use crate::domain::{decimal_text, Id, Sentiment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} must be a finite, non-negative number (got {value})")]
    NotNonNegative { field: &'static str, value: f64 },
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn required_id(value: Option<Id>, field: &'static str) -> Result<Id, ValidationError> {
    value
        .filter(|id| *id > 0)
        .ok_or(ValidationError::MissingField(field))
}

fn non_negative(value: Option<f64>, field: &'static str) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::NotNonNegative { field, value });
    }
    Ok(value)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPayload {
    pub name: Option<String>,
    pub ticker: Option<String>,
    pub sector: Option<String>,
    pub currency: Option<String>,
    pub financials: Option<Financials>,
}

impl CompanyPayload {
    pub fn validate_and_into_new(self) -> Result<NewCompany, ValidationError> {
        Ok(NewCompany {
            name: required_text(self.name, "name")?,
            ticker: required_text(self.ticker, "ticker")?,
            sector: required_text(self.sector, "sector")?,
            currency: required_text(self.currency, "currency")?,
            financials: self.financials,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialsPayload {
    pub financials: Option<Financials>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPayload {
    pub company_id: Option<Id>,
    #[serde(default, with = "decimal_text::option")]
    pub shares: Option<f64>,
    #[serde(default, with = "decimal_text::option")]
    pub average_cost: Option<f64>,
    pub purchase_currency: Option<String>,
}

impl PositionPayload {
    /// The owning user comes from the request context, never from the body.
    pub fn validate_and_into_new(self, user_id: Id) -> Result<NewPosition, ValidationError> {
        Ok(NewPosition {
            user_id,
            company_id: required_id(self.company_id, "companyId")?,
            shares: non_negative(self.shares, "shares")?,
            average_cost: non_negative(self.average_cost, "averageCost")?,
            purchase_currency: required_text(self.purchase_currency, "purchaseCurrency")?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdatePayload {
    #[serde(default, with = "decimal_text::option")]
    pub shares: Option<f64>,
    #[serde(default, with = "decimal_text::option")]
    pub average_cost: Option<f64>,
}

impl PositionUpdatePayload {
    /// Returns `(shares, average_cost)`.
    pub fn validate(self) -> Result<(f64, f64), ValidationError> {
        Ok((
            non_negative(self.shares, "shares")?,
            non_negative(self.average_cost, "averageCost")?,
        ))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CeoProfilePayload {
    pub company_id: Option<Id>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub tenure: Option<u32>,
    pub religion: Option<String>,
    pub strategy: Option<String>,
    pub leadership: Option<String>,
    pub photo_url: Option<String>,
}

impl CeoProfilePayload {
    pub fn validate_and_into_new(self) -> Result<NewCeoProfile, ValidationError> {
        Ok(NewCeoProfile {
            company_id: required_id(self.company_id, "companyId")?,
            name: required_text(self.name, "name")?,
            title: required_text(self.title, "title")?,
            tenure: self.tenure.unwrap_or(0),
            religion: optional_text(self.religion).unwrap_or_default(),
            strategy: optional_text(self.strategy).unwrap_or_default(),
            leadership: optional_text(self.leadership).unwrap_or_default(),
            photo_url: optional_text(self.photo_url),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAlertPayload {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub severity: Option<Severity>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl MarketAlertPayload {
    /// Alerts are active unless the payload says otherwise.
    pub fn validate_and_into_new(self) -> Result<NewMarketAlert, ValidationError> {
        Ok(NewMarketAlert {
            kind: required_text(self.kind, "type")?,
            severity: self.severity.ok_or(ValidationError::MissingField("severity"))?,
            title: required_text(self.title, "title")?,
            description: required_text(self.description, "description")?,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticlePayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub source: Option<String>,
    pub company_id: Option<Id>,
    pub sentiment: Option<Sentiment>,
    pub published_at: Option<DateTime<Utc>>,
}

impl NewsArticlePayload {
    pub fn validate_and_into_new(
        self,
        now: DateTime<Utc>,
    ) -> Result<NewNewsArticle, ValidationError> {
        Ok(NewNewsArticle {
            title: required_text(self.title, "title")?,
            content: required_text(self.content, "content")?,
            source: required_text(self.source, "source")?,
            company_id: self.company_id.filter(|id| *id > 0),
            sentiment: self
                .sentiment
                .ok_or(ValidationError::MissingField("sentiment"))?,
            published_at: self.published_at.unwrap_or(now),
        })
    }
}

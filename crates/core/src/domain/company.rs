use crate::domain::Id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Id,
    pub name: String,
    pub ticker: String,
    pub sector: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financials: Option<Financials>,
    pub created_at: DateTime<Utc>,
}

/// Headline financials in millions of the company's reporting currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash_reserves: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_profit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_annual_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_gross_profit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    pub name: String,
    pub ticker: String,
    pub sector: String,
    pub currency: String,
    pub financials: Option<Financials>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CeoProfile {
    pub id: Id,
    pub company_id: Id,
    pub name: String,
    pub title: String,
    pub tenure: u32,
    pub religion: String,
    pub strategy: String,
    pub leadership: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCeoProfile {
    pub company_id: Id,
    pub name: String,
    pub title: String,
    pub tenure: u32,
    pub religion: String,
    pub strategy: String,
    pub leadership: String,
    pub photo_url: Option<String>,
}

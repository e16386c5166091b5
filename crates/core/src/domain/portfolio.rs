use crate::domain::company::Company;
use crate::domain::{decimal_text, Id};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPosition {
    pub id: Id,
    pub user_id: Id,
    pub company_id: Id,
    #[serde(with = "decimal_text")]
    pub shares: f64,
    #[serde(with = "decimal_text")]
    pub average_cost: f64,
    pub purchase_currency: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPosition {
    pub user_id: Id,
    pub company_id: Id,
    pub shares: f64,
    pub average_cost: f64,
    pub purchase_currency: String,
}

/// Per-position valuation in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDetail {
    pub company: Company,
    pub shares: f64,
    pub average_cost: f64,
    pub current_price: f64,
    #[serde(rename = "currentValueTWD")]
    pub current_value: f64,
    #[serde(rename = "totalReturnTWD")]
    pub total_return: f64,
    pub total_return_percent: f64,
    pub fx_impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    #[serde(rename = "totalValueTWD")]
    pub total_value: f64,
    #[serde(rename = "totalChangeTWD")]
    pub total_change: f64,
    pub change_percent: f64,
    #[serde(rename = "fxImpactTWD")]
    pub fx_impact: f64,
    pub positions: Vec<PositionDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendProjection {
    #[serde(rename = "annualDividendTWD")]
    pub annual_dividend: f64,
    pub yield_percent: f64,
    #[serde(rename = "nextPaymentTWD")]
    pub next_payment: f64,
    pub next_payment_date: DateTime<Utc>,
}

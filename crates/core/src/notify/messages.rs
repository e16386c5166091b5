use crate::domain::alert::MarketAlert;
use crate::domain::company::Company;
use crate::domain::market::MacroReading;
use crate::domain::recommendation::RecommendationResult;
use crate::notify::Notification;
use serde_json::json;

pub fn trading_recommendation(company: &Company, result: &RecommendationResult) -> Notification {
    Notification {
        subject: format!("{} signal: {}", result.signal, company.ticker),
        body: format!(
            "{} ({}) {} with {}% confidence. Target price {:.2} {}. {} Timing: {}.",
            company.name,
            company.ticker,
            result.signal,
            result.confidence,
            result.target_price,
            company.currency,
            result.reasoning,
            result.optimal_timing
        ),
        context: Some(json!({
            "companyId": company.id,
            "ticker": company.ticker,
            "signal": result.signal,
            "confidence": result.confidence,
            "targetPrice": result.target_price,
            "fxAdvantage": result.fx_advantage,
        })),
    }
}

pub fn crash_warning(reading: &MacroReading) -> Notification {
    Notification {
        subject: "MARKET CRASH WARNING".to_string(),
        body: "High risk market conditions detected. Consider defensive positioning.".to_string(),
        context: Some(json!({
            "bondYield": reading.ten_year_yield,
            "vix": reading.vix,
            "sentiment": reading.sentiment,
        })),
    }
}

pub fn market_alert(alert: &MarketAlert) -> Notification {
    Notification {
        subject: alert.title.clone(),
        body: alert.description.clone(),
        context: None,
    }
}

pub fn portfolio_alert(subject: &str, body: &str) -> Notification {
    Notification {
        subject: subject.to_string(),
        body: body.to_string(),
        context: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::Signal;
    use chrono::Utc;

    #[test]
    fn recommendation_subject_names_signal_and_ticker() {
        let company = Company {
            id: 1,
            name: "Apple Inc.".to_string(),
            ticker: "AAPL".to_string(),
            sector: "Technology".to_string(),
            currency: "USD".to_string(),
            financials: None,
            created_at: Utc::now(),
        };
        let result = RecommendationResult {
            signal: Signal::Buy,
            confidence: 95,
            target_price: 200.0,
            reasoning: "Positive market sentiment.".to_string(),
            fx_advantage: 1.2,
            optimal_timing: "Immediate".to_string(),
            score: 70,
        };
        let n = trading_recommendation(&company, &result);
        assert_eq!(n.subject, "BUY signal: AAPL");
        assert!(n.body.contains("95% confidence"));
        assert_eq!(n.context.unwrap()["signal"], "BUY");
    }
}

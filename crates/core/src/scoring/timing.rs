use crate::domain::company::Company;
use crate::domain::currency::CurrencyRateRecord;
use crate::domain::market::{TradeAction, TradingAnalysis};
use crate::scoring::round2;

const ADVERSE_MOVE_PERCENT: f64 = 1.0;
const VOLATILE_MOVE_PERCENT: f64 = 0.5;

fn analysis(recommended: bool, reason: &str, window: &str, fx_advantage: f64) -> TradingAnalysis {
    TradingAnalysis {
        recommended,
        reason: reason.to_string(),
        optimal_window: window.to_string(),
        fx_advantage,
    }
}

/// Judges whether now is a good moment to trade `company` given the latest move
/// of its currency against the base currency.
pub fn analyze_trading_time(
    company: Option<&Company>,
    rate: Option<&CurrencyRateRecord>,
    action: TradeAction,
) -> TradingAnalysis {
    if company.is_none() {
        return analysis(false, "Company not found", "N/A", 0.0);
    }
    let Some(rate) = rate else {
        return analysis(true, "No currency data available", "Immediate", 0.0);
    };

    let change_percent = rate.change_percent;
    let fx_advantage = match action {
        TradeAction::Buy => -change_percent,
        TradeAction::Sell => change_percent,
    };
    let fx_advantage = round2(fx_advantage);

    match action {
        TradeAction::Sell if change_percent < -ADVERSE_MOVE_PERCENT => analysis(
            false,
            "Currency rates unfavorable for TWD conversion. Consider waiting.",
            "Wait 2-3 days for better rates",
            fx_advantage,
        ),
        TradeAction::Buy if change_percent > ADVERSE_MOVE_PERCENT => analysis(
            false,
            "Currency rates make purchase more expensive. Consider waiting.",
            "Wait for currency dip",
            fx_advantage,
        ),
        _ if change_percent.abs() > VOLATILE_MOVE_PERCENT => analysis(
            true,
            "Current FX rates are favorable",
            "Monitor rates closely - volatile period",
            fx_advantage,
        ),
        _ => analysis(
            true,
            "Current FX rates are favorable",
            "Next 24 hours",
            fx_advantage,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn company() -> Company {
        Company {
            id: 1,
            name: "Fortescue".to_string(),
            ticker: "FMG".to_string(),
            sector: "Mining".to_string(),
            currency: "AUD".to_string(),
            financials: None,
            created_at: Utc::now(),
        }
    }

    fn rate(change_percent: f64) -> CurrencyRateRecord {
        CurrencyRateRecord {
            id: 2,
            from_currency: "AUD".to_string(),
            to_currency: "TWD".to_string(),
            rate: 20.467,
            change: 0.0,
            change_percent,
            forecast_24h: None,
            volatility_risk: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn unknown_company_is_not_recommended() {
        let a = analyze_trading_time(None, Some(&rate(0.0)), TradeAction::Buy);
        assert!(!a.recommended);
        assert_eq!(a.reason, "Company not found");
        assert_eq!(a.optimal_window, "N/A");
    }

    #[test]
    fn missing_rate_trades_immediately() {
        let c = company();
        let a = analyze_trading_time(Some(&c), None, TradeAction::Sell);
        assert!(a.recommended);
        assert_eq!(a.optimal_window, "Immediate");
        assert_eq!(a.fx_advantage, 0.0);
    }

    #[test]
    fn selling_into_weak_currency_waits() {
        let c = company();
        let a = analyze_trading_time(Some(&c), Some(&rate(-1.42)), TradeAction::Sell);
        assert!(!a.recommended);
        assert_eq!(a.optimal_window, "Wait 2-3 days for better rates");
        assert_eq!(a.fx_advantage, -1.42);
    }

    #[test]
    fn buying_into_strong_currency_waits() {
        let c = company();
        let a = analyze_trading_time(Some(&c), Some(&rate(1.5)), TradeAction::Buy);
        assert!(!a.recommended);
        assert_eq!(a.optimal_window, "Wait for currency dip");
        assert_eq!(a.fx_advantage, -1.5);
    }

    #[test]
    fn volatile_but_acceptable_moves_are_monitored() {
        let c = company();
        let a = analyze_trading_time(Some(&c), Some(&rate(-0.8)), TradeAction::Buy);
        assert!(a.recommended);
        assert_eq!(a.optimal_window, "Monitor rates closely - volatile period");
        assert_eq!(a.fx_advantage, 0.8);

        let calm = analyze_trading_time(Some(&c), Some(&rate(0.39)), TradeAction::Sell);
        assert_eq!(calm.optimal_window, "Next 24 hours");
        assert_eq!(calm.reason, "Current FX rates are favorable");
    }
}

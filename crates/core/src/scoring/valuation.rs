use crate::domain::company::Company;
use crate::domain::currency::FxTable;
use crate::domain::market::StockPrice;
use crate::domain::portfolio::{PortfolioPosition, PortfolioSummary, PositionDetail};
use std::collections::HashMap;

/// `numerator / denominator × 100`, or 0 when there is no cost basis.
fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// Values one position, or `None` when its company or price is unknown.
pub fn value_position(
    position: &PortfolioPosition,
    companies: &[Company],
    prices: &HashMap<String, StockPrice>,
    fx: &FxTable,
) -> Option<(PositionDetail, f64)> {
    let company = companies.iter().find(|c| c.id == position.company_id)?;
    let price = prices.get(&company.ticker)?;

    let purchase_rate = fx.rate_of(&position.purchase_currency);
    let current_rate = fx.rate_of(&company.currency);

    let current_value = position.shares * price.price_in_base;
    let cost = position.shares * position.average_cost * purchase_rate;
    let total_return = current_value - cost;
    // Return attributable to the currency gap between listing and purchase.
    let fx_impact = position.shares * price.price * (current_rate - purchase_rate);

    let detail = PositionDetail {
        company: company.clone(),
        shares: position.shares,
        average_cost: position.average_cost,
        current_price: price.price_in_base,
        current_value,
        total_return,
        total_return_percent: percent_of(total_return, cost),
        fx_impact,
    };
    Some((detail, cost))
}

/// Aggregates positions into a base-currency summary. Positions whose company
/// or price cannot be resolved are left out without affecting the totals.
pub fn summarize(
    positions: &[PortfolioPosition],
    companies: &[Company],
    prices: &HashMap<String, StockPrice>,
    fx: &FxTable,
) -> PortfolioSummary {
    let mut total_value = 0.0;
    let mut total_cost = 0.0;
    let mut fx_impact = 0.0;
    let mut details = Vec::with_capacity(positions.len());

    for position in positions {
        let Some((detail, cost)) = value_position(position, companies, prices, fx) else {
            tracing::debug!(
                position_id = position.id,
                company_id = position.company_id,
                "skipping position without company or price"
            );
            continue;
        };
        total_value += detail.current_value;
        total_cost += cost;
        fx_impact += detail.fx_impact;
        details.push(detail);
    }

    let total_change = total_value - total_cost;
    PortfolioSummary {
        total_value,
        total_change,
        change_percent: percent_of(total_change, total_cost),
        fx_impact,
        positions: details,
    }
}

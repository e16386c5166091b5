use crate::domain::market::MacroReading;
use crate::random::RandomSource;

const MARKET_MOODS: [&str; 3] = ["BULLISH", "BEARISH", "NEUTRAL"];

/// Simulated bond yields, VIX and overall market mood.
pub fn read_macro(rng: &dyn RandomSource) -> MacroReading {
    let ten_year_yield = 4.5 + rng.next_f64() * 0.5;
    let two_year_yield = 4.8 + rng.next_f64() * 0.3;
    let vix = 15.0 + rng.next_f64() * 20.0;
    let idx =
        ((rng.next_f64() * MARKET_MOODS.len() as f64) as usize).min(MARKET_MOODS.len() - 1);

    MacroReading {
        ten_year_yield,
        two_year_yield,
        vix,
        sentiment: MARKET_MOODS[idx].to_string(),
    }
}

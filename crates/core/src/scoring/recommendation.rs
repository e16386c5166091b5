use crate::domain::market::MarketSnapshot;
use crate::domain::recommendation::{
    RecommendationResult, Signal, TIMING_IMMEDIATE, TIMING_NEXT_DAYS, TIMING_WAIT_FX,
};
use crate::domain::Sentiment;
use crate::random::RandomSource;
use crate::scoring::round2;

const SENTIMENT_WEIGHT: i32 = 30;
const NEWS_WEIGHT: i32 = 25;
const FX_WEIGHT: i32 = 15;
const VOLATILITY_PENALTY: i32 = 10;

const NEWS_THRESHOLD: f64 = 0.3;
const FX_THRESHOLD: f64 = 1.0;
const VOLATILITY_THRESHOLD: f64 = 40.0;
const SIGNAL_THRESHOLD: i32 = 40;

const MAX_CONFIDENCE: i32 = 95;
const HOLD_CONFIDENCE_FLOOR: f64 = 60.0;
const HOLD_CONFIDENCE_SPAN: f64 = 20.0;

/// Recommendations above this confidence are stored.
pub const PERSIST_CONFIDENCE: u8 = 70;
/// Stored recommendations above this confidence also trigger a notification.
pub const NOTIFY_CONFIDENCE: u8 = 85;

/// Additive composite score plus the explanation of every factor that moved it,
/// in evaluation order.
pub fn composite_score(
    market: &MarketSnapshot,
    news_sentiment: f64,
    fx_impact: f64,
) -> (i32, Vec<&'static str>) {
    let mut score = 0;
    let mut reasons = Vec::with_capacity(5);

    match market.sentiment {
        Sentiment::Positive => {
            score += SENTIMENT_WEIGHT;
            reasons.push("Positive market sentiment.");
        }
        Sentiment::Negative => {
            score -= SENTIMENT_WEIGHT;
            reasons.push("Negative market sentiment.");
        }
        Sentiment::Neutral => {}
    }

    if news_sentiment > NEWS_THRESHOLD {
        score += NEWS_WEIGHT;
        reasons.push("Positive news sentiment.");
    } else if news_sentiment < -NEWS_THRESHOLD {
        score -= NEWS_WEIGHT;
        reasons.push("Negative news sentiment.");
    }

    if fx_impact > FX_THRESHOLD {
        score += FX_WEIGHT;
        reasons.push("Favorable currency rates.");
    } else if fx_impact < -FX_THRESHOLD {
        score -= FX_WEIGHT;
        reasons.push("Unfavorable currency rates.");
    }

    if market.volatility > VOLATILITY_THRESHOLD {
        score -= VOLATILITY_PENALTY;
        reasons.push("High volatility increases risk.");
    }

    (score, reasons)
}

/// Scores one company. Only the HOLD branch consumes a random draw.
pub fn score(
    market: &MarketSnapshot,
    news_sentiment: f64,
    fx_impact: f64,
    rng: &dyn RandomSource,
) -> RecommendationResult {
    let (total, mut reasons) = composite_score(market, news_sentiment, fx_impact);

    let (signal, confidence) = if total > SIGNAL_THRESHOLD {
        reasons.push("Strong buy signal detected.");
        (Signal::Buy, MAX_CONFIDENCE.min(50 + total))
    } else if total < -SIGNAL_THRESHOLD {
        reasons.push("Strong sell signal detected.");
        (Signal::Sell, MAX_CONFIDENCE.min(50 + total.abs()))
    } else {
        reasons.push("Mixed signals suggest holding current position.");
        (Signal::Hold, hold_confidence(rng.next_f64()))
    };

    RecommendationResult {
        signal,
        confidence: confidence.clamp(0, 100) as u8,
        target_price: market.price * (1.0 + f64::from(total) / 100.0),
        reasoning: reasons.join(" "),
        fx_advantage: round2(fx_impact),
        optimal_timing: optimal_timing(fx_impact, signal).to_string(),
        score: total,
    }
}

/// Integer in `[60, 80)` for a draw in `[0, 1)`.
fn hold_confidence(draw: f64) -> i32 {
    let offset = (draw * HOLD_CONFIDENCE_SPAN).floor().clamp(0.0, HOLD_CONFIDENCE_SPAN - 1.0);
    (HOLD_CONFIDENCE_FLOOR + offset) as i32
}

fn optimal_timing(fx_impact: f64, signal: Signal) -> &'static str {
    let mut timing = TIMING_IMMEDIATE;
    if fx_impact.abs() < 0.5 {
        timing = TIMING_NEXT_DAYS;
    }
    if fx_impact < -FX_THRESHOLD && signal == Signal::Sell {
        timing = TIMING_WAIT_FX;
    }
    timing
}

pub fn should_persist(result: &RecommendationResult) -> bool {
    result.confidence > PERSIST_CONFIDENCE
}

pub fn should_notify(result: &RecommendationResult) -> bool {
    should_persist(result) && result.confidence > NOTIFY_CONFIDENCE
}

//! Simulated stand-ins for market-data, price and macro feeds.

pub mod indicators;
pub mod market;
pub mod prices;

//! Stock snapshot lookup.
//!
//! There is no live market-data provider: known tickers always get simulated
//! figures and unknown companies get an empty snapshot.

use chrono::{DateTime, Utc};
use intellibrief_core::StockData;
use rand::Rng;

use crate::simulation::simulate_stock;
use crate::source::Collected;

const TICKERS: &[(&str, &str)] = &[
    ("shopify", "SHOP"),
    ("apple", "AAPL"),
    ("microsoft", "MSFT"),
    ("google", "GOOGL"),
    ("amazon", "AMZN"),
    ("meta", "META"),
    ("tesla", "TSLA"),
    ("netflix", "NFLX"),
];

/// Ticker for an exact (case-insensitive) company-name match.
#[must_use]
pub fn lookup_ticker(company: &str) -> Option<&'static str> {
    let key = company.trim().to_lowercase();
    TICKERS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, ticker)| *ticker)
}

/// `simulated` is true exactly when the company has a known ticker.
pub fn collect_stock<R: Rng>(company: &str, rng: &mut R, now: DateTime<Utc>) -> Collected<StockData> {
    match lookup_ticker(company) {
        Some(ticker) => {
            tracing::debug!(company, ticker, "simulating stock data");
            Collected::simulated(simulate_stock(ticker, rng, now))
        }
        None => Collected::live(StockData::default()),
    }
}

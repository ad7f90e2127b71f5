//! Simulated price tables and per-tick movement.
//!
//! A `PriceBook` holds the current price for every supported ticker together
//! with a snapshot of the prices before the latest tick. Each tick moves every
//! price by a uniform random fraction in `[-2%, +2%]`, rounds to cents, and
//! clamps to a minimum positive value so a price can never reach zero. The
//! previous-price snapshot exists only to derive the displayed delta.

use std::collections::BTreeMap;

use dashboard_common::Ticker;
use dashboard_common::payload::PriceUpdate;
use rand::Rng;

/// Floor applied after rounding; keeps every price strictly positive.
pub const MIN_PRICE: f64 = 0.01;

/// Largest per-tick move, as a fraction of the current price.
const MAX_TICK_FRACTION: f64 = 0.02;

/// Displayed movement of one ticker since the previous tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceChange {
    /// Absolute change, `current - previous`.
    pub amount: f64,
    /// Change as a percentage of the previous price.
    pub percent: f64,
    /// True when `amount >= 0` (a zero move renders as positive).
    pub is_positive: bool,
}

/// Current and previous price tables for the full fixed ticker set.
#[derive(Debug, Clone)]
pub struct PriceBook {
    prices: BTreeMap<Ticker, f64>,
    previous: BTreeMap<Ticker, f64>,
}

impl PriceBook {
    /// Seeds both tables with the base prices.
    pub fn new() -> Self {
        let seed: BTreeMap<Ticker, f64> = Ticker::ALL
            .iter()
            .map(|t| (*t, t.initial_price()))
            .collect();
        PriceBook {
            prices: seed.clone(),
            previous: seed,
        }
    }

    /// Advances every price by one simulation step.
    ///
    /// The whole current table is snapshotted into the previous table first,
    /// so deltas always compare against the immediately preceding tick.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        self.previous = self.prices.clone();
        for ticker in Ticker::ALL {
            let current = self.price(ticker);
            let fraction = rng.random_range(-MAX_TICK_FRACTION..MAX_TICK_FRACTION);
            let moved = round_cents(current * (1.0 + fraction)).max(MIN_PRICE);
            self.prices.insert(ticker, moved);
        }
    }

    /// Current price of `ticker`.
    pub fn price(&self, ticker: Ticker) -> f64 {
        self.prices
            .get(&ticker)
            .copied()
            .unwrap_or_else(|| ticker.initial_price())
    }

    /// Price of `ticker` before the latest tick.
    pub fn previous_price(&self, ticker: Ticker) -> f64 {
        self.previous
            .get(&ticker)
            .copied()
            .unwrap_or_else(|| ticker.initial_price())
    }

    /// Movement of `ticker` since the previous tick.
    ///
    /// The previous price is strictly positive under the [`MIN_PRICE`]
    /// invariant; should an adopted payload ever violate it, the percentage
    /// degrades to zero instead of producing NaN or infinity.
    pub fn change(&self, ticker: Ticker) -> PriceChange {
        let current = self.price(ticker);
        let previous = self.previous_price(ticker);
        let amount = current - previous;
        let percent = if previous > 0.0 {
            amount / previous * 100.0
        } else {
            0.0
        };
        PriceChange {
            amount,
            percent,
            is_positive: amount >= 0.0,
        }
    }

    /// Replaces both tables verbatim with a payload received from another tab.
    ///
    /// Last write wins; no merge and no version check, per the convergence
    /// policy of the shared store.
    pub fn adopt(&mut self, update: PriceUpdate) {
        self.prices = update.prices;
        self.previous = update.previous;
    }

    /// Builds the broadcast payload for the current state, stamped now.
    pub fn snapshot(&self) -> PriceUpdate {
        PriceUpdate::now(self.prices.clone(), self.previous.clone())
    }
}

impl Default for PriceBook {
    fn default() -> Self {
        Self::new()
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

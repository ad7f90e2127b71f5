//! Serialized values written to the shared store.
//!
//! The store holds plain strings, so every structured value crossing tab
//! boundaries is JSON-encoded here: the broadcast price tables and the
//! per-identity subscription list. Decoding is deliberately tolerant — a
//! corrupt persisted value decodes to an empty/absent state with a logged
//! warning instead of failing the user action.

use std::collections::BTreeMap;

use chrono::Utc;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::result::Result;
use crate::tickers::Ticker;

/// Broadcast payload carrying the full shared price state.
///
/// Receivers adopt both tables verbatim (last-write-wins); `timestamp` is
/// informational only and takes no part in conflict resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceUpdate {
    /// Current price per ticker.
    pub prices: BTreeMap<Ticker, f64>,
    /// Snapshot of the prices before the latest tick.
    pub previous: BTreeMap<Ticker, f64>,
    /// Milliseconds since the UNIX epoch at broadcast time.
    pub timestamp: i64,
}

impl PriceUpdate {
    /// Builds a payload from the two price tables, stamped with the current time.
    pub fn now(prices: BTreeMap<Ticker, f64>, previous: BTreeMap<Ticker, f64>) -> Self {
        PriceUpdate {
            prices,
            previous,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Encodes the payload to a JSON string for the store.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a payload from a stored JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Encodes an ordered subscription list to its stored JSON form.
pub fn encode_subscriptions(tickers: &[Ticker]) -> Result<String> {
    Ok(serde_json::to_string(tickers)?)
}

/// Decodes a stored subscription list.
///
/// `None` (no prior value) and corrupt JSON both yield an empty list; the
/// corrupt case is logged so the overwrite on the next mutation is traceable.
pub fn decode_subscriptions(raw: Option<&str>) -> Vec<Ticker> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(tickers) => tickers,
        Err(e) => {
            warn!("Discarding corrupt subscription list {raw:?}: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriptions_round_trip() {
        let subs = vec![Ticker::GOOG, Ticker::NVDA, Ticker::TSLA];
        let encoded = encode_subscriptions(&subs).unwrap();
        assert_eq!(decode_subscriptions(Some(&encoded)), subs);
    }

    #[test]
    fn absent_subscriptions_decode_empty() {
        assert!(decode_subscriptions(None).is_empty());
    }

    #[test]
    fn corrupt_subscriptions_decode_empty() {
        assert!(decode_subscriptions(Some("{not json")).is_empty());
        assert!(decode_subscriptions(Some("[\"AAPL\"]")).is_empty());
    }

    #[test]
    fn price_update_round_trip() {
        let prices: BTreeMap<_, _> = Ticker::ALL
            .iter()
            .map(|t| (*t, t.initial_price()))
            .collect();
        let update = PriceUpdate::now(prices.clone(), prices);
        let decoded = PriceUpdate::from_json(&update.to_json().unwrap()).unwrap();
        assert_eq!(decoded, update);
    }
}

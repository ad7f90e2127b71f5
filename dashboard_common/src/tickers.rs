//! The fixed set of supported ticker symbols.
//!
//! The dashboard supports exactly five symbols; they are static and never
//! created or destroyed at runtime. Each symbol carries a base price that
//! seeds the simulation.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Set of supported ticker symbols.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
)]
#[clap(rename_all = "upper")]
#[strum(ascii_case_insensitive)]
pub enum Ticker {
    GOOG,
    TSLA,
    AMZN,
    META,
    NVDA,
}

impl Ticker {
    /// All supported symbols, in display order.
    pub const ALL: [Ticker; 5] = [
        Ticker::GOOG,
        Ticker::TSLA,
        Ticker::AMZN,
        Ticker::META,
        Ticker::NVDA,
    ];

    /// Base price used to seed the simulation for this symbol.
    pub fn initial_price(self) -> f64 {
        match self {
            Ticker::GOOG => 140.50,
            Ticker::TSLA => 242.80,
            Ticker::AMZN => 178.30,
            Ticker::META => 512.60,
            Ticker::NVDA => 875.40,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parse_display_round_trip() {
        for ticker in Ticker::ALL {
            let parsed = <Ticker as FromStr>::from_str(&ticker.to_string()).unwrap();
            assert_eq!(parsed, ticker);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(<Ticker as FromStr>::from_str("goog").unwrap(), Ticker::GOOG);
        assert_eq!(<Ticker as FromStr>::from_str("Tsla").unwrap(), Ticker::TSLA);
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        assert!(<Ticker as FromStr>::from_str("AAPL").is_err());
    }

    #[test]
    fn initial_prices_are_positive() {
        for ticker in Ticker::ALL {
            assert!(ticker.initial_price() > 0.0);
        }
    }

    #[test]
    fn fixed_set_has_five_symbols() {
        assert_eq!(Ticker::ALL.len(), 5);
    }
}

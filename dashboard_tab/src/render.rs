//! The rendered card list and its incremental reconciliation.
//!
//! Cards are a plain data model of what a tab displays: one card per
//! subscribed ticker, in subscription order, carrying the price, the signed
//! delta since the previous tick, and a last-updated stamp. Reconciliation
//! walks the subscription list by index: a card already in the right position
//! with the right ticker label is patched in place (with a transient pulse
//! when the price moved); anything else at that position is rebuilt. Surplus
//! cards past the end of the subscription list are dropped, and an empty list
//! renders a single placeholder message instead of cards.

use chrono::Local;
use dashboard_common::Ticker;

use crate::simulator::{PriceBook, PriceChange};

/// Placeholder shown when nothing is subscribed.
pub const EMPTY_STATE_TEXT: &str =
    "No stocks subscribed yet. Select a stock above to get started!";

/// One displayed stock card.
#[derive(Debug, Clone)]
pub struct Card {
    /// The ticker label identifying this card.
    pub ticker: Ticker,
    /// Displayed price.
    pub price: f64,
    /// Signed movement since the previous tick.
    pub change: PriceChange,
    /// Wall-clock time of the last update, formatted for display.
    pub last_updated: String,
    /// Set when the latest reconcile changed the price in place; drives the
    /// transient highlight and clears on the next pass.
    pub pulse: bool,
}

impl Card {
    fn fresh(ticker: Ticker, prices: &PriceBook) -> Self {
        Card {
            ticker,
            price: prices.price(ticker),
            change: prices.change(ticker),
            last_updated: now_stamp(),
            pulse: false,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = if self.change.is_positive { '▲' } else { '▼' };
        write!(
            f,
            "{} ${:.2} {arrow} ${:.2} ({:.2}%)",
            self.ticker,
            self.price,
            self.change.amount.abs(),
            self.change.percent.abs()
        )
    }
}

/// Counts of what one reconcile pass did, for logs and tests.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Cards updated in place.
    pub patched: usize,
    /// Cards created fresh (new position or label mismatch).
    pub rebuilt: usize,
    /// Surplus cards dropped from the tail.
    pub removed: usize,
}

/// The ordered card list of one tab.
#[derive(Debug, Default)]
pub struct CardList {
    cards: Vec<Card>,
}

impl CardList {
    /// Creates an empty list.
    pub fn new() -> Self {
        CardList { cards: Vec::new() }
    }

    /// Brings the cards in line with `subs` and `prices`.
    pub fn reconcile(&mut self, subs: &[Ticker], prices: &PriceBook) -> ReconcileOutcome {
        let mut outcome = ReconcileOutcome::default();

        for (index, &ticker) in subs.iter().enumerate() {
            match self.cards.get_mut(index) {
                Some(card) if card.ticker == ticker => {
                    let new_price = prices.price(ticker);
                    card.pulse = card.price != new_price;
                    card.price = new_price;
                    card.change = prices.change(ticker);
                    card.last_updated = now_stamp();
                    outcome.patched += 1;
                }
                Some(card) => {
                    *card = Card::fresh(ticker, prices);
                    outcome.rebuilt += 1;
                }
                None => {
                    self.cards.push(Card::fresh(ticker, prices));
                    outcome.rebuilt += 1;
                }
            }
        }

        outcome.removed = self.cards.len().saturating_sub(subs.len());
        self.cards.truncate(subs.len());
        outcome
    }

    /// Drops every card, e.g. on logout.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// The rendered cards in display order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The placeholder message, present exactly when no cards are shown.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.cards.is_empty().then_some(EMPTY_STATE_TEXT)
    }
}

fn now_stamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

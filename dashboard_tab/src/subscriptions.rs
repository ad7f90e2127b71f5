//! The persisted subscription book for one identity.
//!
//! The book is the authoritative ordered, duplicate-free list of tickers the
//! signed-in identity follows. Every mutation rewrites the full list under
//! the identity-scoped key and then touches the signal key, so other tabs get
//! a change notification even if their listener filters on that key alone.
//!
//! Concurrent mutations from two tabs for the same identity race: the last
//! full-list write wins and the earlier one is silently lost. That weak
//! consistency is the documented policy, not a bug to paper over here.

use chrono::Utc;
use dashboard_common::{DashboardError, Identity, Result, Ticker};
use dashboard_common::keys::{self, SUBSCRIPTION_SIGNAL_KEY};
use dashboard_common::payload;
use dashboard_hub::{SharedStore, TabId};
use log::info;

/// Ordered, duplicate-free ticker list owned by one identity.
#[derive(Debug)]
pub struct SubscriptionBook {
    identity: Identity,
    tickers: Vec<Ticker>,
}

impl SubscriptionBook {
    /// Loads the persisted list for `identity`, or an empty book when nothing
    /// (or nothing readable) is stored.
    pub fn load(store: &SharedStore, identity: Identity) -> Result<Self> {
        let raw = store.get(&keys::subscriptions_key(&identity))?;
        let tickers = payload::decode_subscriptions(raw.as_deref());
        Ok(SubscriptionBook { identity, tickers })
    }

    /// Re-reads the persisted list, discarding local state. Used when another
    /// tab announced a change to this identity's subscriptions.
    pub fn reload(&mut self, store: &SharedStore) -> Result<()> {
        let raw = store.get(&keys::subscriptions_key(&self.identity))?;
        self.tickers = payload::decode_subscriptions(raw.as_deref());
        Ok(())
    }

    /// Appends `ticker`, persists the list, and broadcasts the change.
    ///
    /// A ticker already present is rejected and nothing is written.
    pub fn subscribe(&mut self, store: &SharedStore, origin: TabId, ticker: Ticker) -> Result<()> {
        if self.tickers.contains(&ticker) {
            return Err(DashboardError::AlreadySubscribed(ticker));
        }
        self.tickers.push(ticker);
        self.persist(store, origin)?;
        info!("{} subscribed to {ticker}", self.identity);
        Ok(())
    }

    /// Removes every occurrence of `ticker`, persists, and broadcasts.
    /// Succeeds silently when the ticker was not subscribed.
    pub fn unsubscribe(
        &mut self,
        store: &SharedStore,
        origin: TabId,
        ticker: Ticker,
    ) -> Result<()> {
        self.tickers.retain(|t| *t != ticker);
        self.persist(store, origin)?;
        info!("{} unsubscribed from {ticker}", self.identity);
        Ok(())
    }

    fn persist(&self, store: &SharedStore, origin: TabId) -> Result<()> {
        store.set(
            origin,
            &keys::subscriptions_key(&self.identity),
            payload::encode_subscriptions(&self.tickers)?,
        )?;
        store.set(
            origin,
            SUBSCRIPTION_SIGNAL_KEY,
            Utc::now().timestamp_millis().to_string(),
        )
    }

    /// The subscribed tickers in subscription order.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// The identity owning this book.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(store: &SharedStore) -> SubscriptionBook {
        SubscriptionBook::load(store, Identity::parse("a@b.co").unwrap()).unwrap()
    }

    #[test]
    fn starts_empty_for_a_fresh_identity() {
        let store = SharedStore::new();
        assert!(book(&store).tickers().is_empty());
    }

    #[test]
    fn duplicate_subscribe_is_rejected_and_changes_nothing() {
        let store = SharedStore::new();
        let tab = TabId::next();
        let mut subs = book(&store);
        subs.subscribe(&store, tab, Ticker::GOOG).unwrap();

        let err = subs.subscribe(&store, tab, Ticker::GOOG).unwrap_err();
        assert!(matches!(err, DashboardError::AlreadySubscribed(Ticker::GOOG)));
        assert_eq!(subs.tickers(), &[Ticker::GOOG]);

        // The persisted copy is unchanged too.
        assert_eq!(book(&store).tickers(), &[Ticker::GOOG]);
    }

    #[test]
    fn unsubscribe_of_absent_ticker_is_silent() {
        let store = SharedStore::new();
        let tab = TabId::next();
        let mut subs = book(&store);
        subs.subscribe(&store, tab, Ticker::TSLA).unwrap();

        subs.unsubscribe(&store, tab, Ticker::NVDA).unwrap();
        assert_eq!(subs.tickers(), &[Ticker::TSLA]);
    }

    #[test]
    fn persists_across_load_round_trip() {
        let store = SharedStore::new();
        let tab = TabId::next();
        let mut subs = book(&store);
        subs.subscribe(&store, tab, Ticker::META).unwrap();
        subs.subscribe(&store, tab, Ticker::AMZN).unwrap();

        let reloaded = book(&store);
        assert_eq!(reloaded.tickers(), &[Ticker::META, Ticker::AMZN]);
    }

    #[test]
    fn corrupt_persisted_list_loads_as_empty() {
        let store = SharedStore::new();
        let tab = TabId::next();
        let identity = Identity::parse("a@b.co").unwrap();
        store
            .set(tab, &keys::subscriptions_key(&identity), "{broken".to_string())
            .unwrap();

        assert!(book(&store).tickers().is_empty());
    }

    #[test]
    fn every_mutation_touches_the_signal_key() {
        let store = SharedStore::new();
        let tab = TabId::next();
        let mut subs = book(&store);
        subs.subscribe(&store, tab, Ticker::GOOG).unwrap();
        assert!(store.get(SUBSCRIPTION_SIGNAL_KEY).unwrap().is_some());
    }
}

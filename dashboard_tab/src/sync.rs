//! Routing of shared-store change events into tab-local state.
//!
//! Events arrive only from other tabs (the store never echoes a tab's own
//! writes back). Three kinds matter here:
//! - the subscription list of the currently signed-in identity → reload it;
//! - the shared price payload → adopt both tables verbatim (last write wins,
//!   no ordering or version check — a stale write observed after a newer
//!   local tick simply overwrites it, which is the accepted model);
//! - everything else (signal key, other identities) → ignored.

use dashboard_common::Result;
use dashboard_common::keys::{self, PRICE_UPDATE_KEY};
use dashboard_common::payload::PriceUpdate;
use dashboard_hub::{SharedStore, StoreEvent};
use log::{debug, warn};

use crate::simulator::PriceBook;
use crate::subscriptions::SubscriptionBook;

/// What applying one store event did to local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Event was not relevant to this tab.
    Ignored,
    /// The subscription book was reloaded from the store.
    SubscriptionsReloaded,
    /// The price tables were replaced with the broadcast payload.
    PricesAdopted,
}

/// Applies a change notification from another tab.
///
/// `subscriptions` is `None` when this tab has no signed-in identity, in
/// which case subscription events are ignored. Returns which part of local
/// state changed so the caller knows whether to re-render.
pub fn apply_store_event(
    store: &SharedStore,
    event: &StoreEvent,
    subscriptions: Option<&mut SubscriptionBook>,
    prices: &mut PriceBook,
) -> Result<SyncOutcome> {
    if let Some(changed_identity) = keys::subscriptions_key_identity(&event.key) {
        if let Some(book) = subscriptions {
            if book.identity().as_str() == changed_identity {
                book.reload(store)?;
                debug!("Reloaded subscriptions for {}", book.identity());
                return Ok(SyncOutcome::SubscriptionsReloaded);
            }
        }
        return Ok(SyncOutcome::Ignored);
    }

    if event.key == PRICE_UPDATE_KEY {
        return match PriceUpdate::from_json(&event.new_value) {
            Ok(update) => {
                prices.adopt(update);
                Ok(SyncOutcome::PricesAdopted)
            }
            Err(e) => {
                warn!("Ignoring unreadable price payload: {e}");
                Ok(SyncOutcome::Ignored)
            }
        };
    }

    Ok(SyncOutcome::Ignored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_common::keys::SUBSCRIPTION_SIGNAL_KEY;
    use dashboard_common::{Identity, Ticker};
    use dashboard_hub::TabId;

    fn event(key: &str, value: &str) -> StoreEvent {
        StoreEvent {
            key: key.to_string(),
            new_value: value.to_string(),
        }
    }

    #[test]
    fn own_identity_subscription_change_reloads_the_book() {
        let store = SharedStore::new();
        let writer = TabId::next();
        let identity = Identity::parse("a@b.co").unwrap();

        let mut remote = SubscriptionBook::load(&store, identity.clone()).unwrap();
        remote.subscribe(&store, writer, Ticker::TSLA).unwrap();

        let mut local = SubscriptionBook::load(&store, identity.clone()).unwrap();
        remote.subscribe(&store, writer, Ticker::GOOG).unwrap();

        let key = keys::subscriptions_key(&identity);
        let stored = store.get(&key).unwrap().unwrap();
        let outcome = apply_store_event(
            &store,
            &event(&key, &stored),
            Some(&mut local),
            &mut PriceBook::new(),
        )
        .unwrap();
        assert_eq!(outcome, SyncOutcome::SubscriptionsReloaded);
        assert_eq!(local.tickers(), &[Ticker::TSLA, Ticker::GOOG]);
    }

    #[test]
    fn other_identities_and_signal_keys_are_ignored() {
        let store = SharedStore::new();
        let identity = Identity::parse("a@b.co").unwrap();
        let mut book = SubscriptionBook::load(&store, identity).unwrap();
        let mut prices = PriceBook::new();

        let outcome = apply_store_event(
            &store,
            &event("subscriptions_other@x.io", "[]"),
            Some(&mut book),
            &mut prices,
        )
        .unwrap();
        assert_eq!(outcome, SyncOutcome::Ignored);

        let outcome = apply_store_event(
            &store,
            &event(SUBSCRIPTION_SIGNAL_KEY, "123"),
            Some(&mut book),
            &mut prices,
        )
        .unwrap();
        assert_eq!(outcome, SyncOutcome::Ignored);
    }

    #[test]
    fn price_payload_is_adopted_verbatim() {
        let store = SharedStore::new();
        let mut source = PriceBook::new();
        let mut rng = rand::rng();
        source.tick(&mut rng);
        let payload = source.snapshot().to_json().unwrap();

        let mut prices = PriceBook::new();
        let outcome =
            apply_store_event(&store, &event(PRICE_UPDATE_KEY, &payload), None, &mut prices)
                .unwrap();
        assert_eq!(outcome, SyncOutcome::PricesAdopted);
        for ticker in Ticker::ALL {
            assert_eq!(prices.price(ticker), source.price(ticker));
        }
    }

    #[test]
    fn unreadable_price_payload_is_ignored() {
        let store = SharedStore::new();
        let mut prices = PriceBook::new();
        let before = prices.price(Ticker::GOOG);
        let outcome =
            apply_store_event(&store, &event(PRICE_UPDATE_KEY, "{oops"), None, &mut prices)
                .unwrap();
        assert_eq!(outcome, SyncOutcome::Ignored);
        assert_eq!(prices.price(Ticker::GOOG), before);
    }
}

//! The profile-wide key-value store and its change-notification fan-out.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crossbeam_channel::{Receiver, Sender, unbounded};
use dashboard_common::Result;
use log::debug;

/// Identifier of one tab instance, unique within the process.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct TabId(u64);

static NEXT_TAB_ID: AtomicU64 = AtomicU64::new(1);

impl TabId {
    /// Allocates a fresh tab id.
    pub fn next() -> Self {
        TabId(NEXT_TAB_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// Change notification delivered to watching tabs after a write.
#[derive(Debug, Clone)]
pub struct StoreEvent {
    /// The key that changed.
    pub key: String,
    /// The value now stored under `key`.
    pub new_value: String,
}

struct Inner {
    values: HashMap<String, String>,
    watchers: Vec<(TabId, Sender<StoreEvent>)>,
}

/// Clone-able handle to one shared key-value space.
///
/// All tabs of a profile hold clones of the same store. Writes go through
/// [`SharedStore::set`], which fans the change out to every registered
/// watcher except the originating tab. Watchers whose receiving side has
/// been dropped are pruned on the next write.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Inner>>,
}

impl SharedStore {
    /// Creates an empty store for a fresh profile.
    pub fn new() -> Self {
        SharedStore {
            inner: Arc::new(Mutex::new(Inner {
                values: HashMap::new(),
                watchers: Vec::new(),
            })),
        }
    }

    /// Registers `tab` as a change listener and returns its event receiver.
    pub fn watch(&self, tab: TabId) -> Result<Receiver<StoreEvent>> {
        let (tx, rx) = unbounded::<StoreEvent>();
        let mut inner = self.inner.lock()?;
        inner.watchers.push((tab, tx));
        Ok(rx)
    }

    /// Writes `value` under `key` and notifies every watcher except `origin`.
    pub fn set(&self, origin: TabId, key: &str, value: String) -> Result<()> {
        let mut inner = self.inner.lock()?;
        inner.values.insert(key.to_string(), value.clone());
        debug!("{origin} wrote {key}");

        let event = StoreEvent {
            key: key.to_string(),
            new_value: value,
        };
        inner.watchers.retain(|(watcher, tx)| {
            if *watcher == origin {
                return true;
            }
            tx.send(event.clone()).is_ok()
        });
        Ok(())
    }

    /// Reads the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.lock()?;
        Ok(inner.values.get(key).cloned())
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let store = SharedStore::new();
        let tab = TabId::next();
        store.set(tab, "k", "v".to_string()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn events_skip_the_originating_tab() {
        let store = SharedStore::new();
        let (tab_a, tab_b) = (TabId::next(), TabId::next());
        let rx_a = store.watch(tab_a).unwrap();
        let rx_b = store.watch(tab_b).unwrap();

        store.set(tab_a, "k", "v".to_string()).unwrap();

        let event = rx_b.try_recv().unwrap();
        assert_eq!(event.key, "k");
        assert_eq!(event.new_value, "v");
        assert!(rx_a.try_recv().is_err());
    }

    #[test]
    fn disconnected_watchers_are_pruned() {
        let store = SharedStore::new();
        let (tab_a, tab_b) = (TabId::next(), TabId::next());
        let rx_a = store.watch(tab_a).unwrap();
        drop(store.watch(tab_b).unwrap());

        // The write from tab_a hits tab_b's dropped receiver and removes it.
        store.set(tab_a, "k", "v".to_string()).unwrap();
        assert_eq!(store.inner.lock().unwrap().watchers.len(), 1);

        store.set(tab_b, "k2", "v2".to_string()).unwrap();
        assert_eq!(rx_a.try_recv().unwrap().key, "k2");
    }

    #[test]
    fn clones_share_one_key_space() {
        let store = SharedStore::new();
        let other = store.clone();
        let tab = TabId::next();
        store.set(tab, "k", "v".to_string()).unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
    }
}

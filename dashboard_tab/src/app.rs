//! The per-tab application state object and its event loop.
//!
//! A `TabApp` bundles everything one tab owns: the tab-local session, the
//! subscription book for the signed-in identity, the simulated price tables,
//! and the rendered card list. Its lifecycle is tied to the session — login
//! starts the one-second price timer, logout cancels it — so no tick can fire
//! after the session ends.
//!
//! All handlers run to completion on the tab's single logical thread; the
//! `run` loop merely multiplexes the timer, the store's change notifications,
//! and shutdown with `crossbeam_channel::select!`. The step methods
//! (`on_tick`, `on_store_event`) carry the actual logic so tests can drive a
//! tab deterministically without the loop.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, never, select, tick};
use dashboard_common::keys::PRICE_UPDATE_KEY;
use dashboard_common::{DashboardError, Result, Ticker};
use dashboard_hub::{SharedStore, StoreEvent, TabId};
use log::{debug, info};

use crate::render::CardList;
use crate::session::Session;
use crate::simulator::PriceBook;
use crate::subscriptions::SubscriptionBook;
use crate::sync::{SyncOutcome, apply_store_event};

/// One independent tab instance of the dashboard.
pub struct TabApp {
    id: TabId,
    store: SharedStore,
    events: Receiver<StoreEvent>,
    session: Session,
    subscriptions: Option<SubscriptionBook>,
    prices: PriceBook,
    cards: CardList,
    timer: Option<Receiver<Instant>>,
    tick_interval: Duration,
}

impl TabApp {
    /// Opens a new tab against the profile's shared store.
    pub fn new(store: SharedStore, tick_interval: Duration) -> Result<Self> {
        let id = TabId::next();
        let events = store.watch(id)?;
        Ok(TabApp {
            id,
            store,
            events,
            session: Session::new(),
            subscriptions: None,
            prices: PriceBook::new(),
            cards: CardList::new(),
            timer: None,
            tick_interval,
        })
    }

    /// This tab's identifier.
    pub fn id(&self) -> TabId {
        self.id
    }

    /// Signs the tab in, loads the identity's persisted subscriptions,
    /// renders the dashboard, and starts the price timer.
    ///
    /// A malformed identity is rejected with no state change and the
    /// dashboard is not shown.
    pub fn login(&mut self, raw: &str) -> Result<()> {
        let identity = self.session.login(raw)?;
        self.subscriptions = Some(SubscriptionBook::load(&self.store, identity)?);
        self.render();
        self.timer = Some(tick(self.tick_interval));
        Ok(())
    }

    /// Signs the tab out: cancels the price timer and clears tab-local state.
    /// The persisted subscription list is retained for the next login.
    pub fn logout(&mut self) {
        self.timer = None;
        self.session.logout();
        self.subscriptions = None;
        self.cards.clear();
    }

    /// Subscribes to the selected ticker and re-renders.
    ///
    /// `None` models an empty selector. The store never echoes our own write
    /// back, so the re-render here is self-invoked.
    pub fn subscribe(&mut self, selection: Option<Ticker>) -> Result<()> {
        let ticker = selection.ok_or(DashboardError::NoSelection)?;
        let book = self
            .subscriptions
            .as_mut()
            .ok_or(DashboardError::NoSession)?;
        book.subscribe(&self.store, self.id, ticker)?;
        self.render();
        Ok(())
    }

    /// Unsubscribes from `ticker` (silently a no-op when absent) and
    /// re-renders.
    pub fn unsubscribe(&mut self, ticker: Ticker) -> Result<()> {
        let book = self
            .subscriptions
            .as_mut()
            .ok_or(DashboardError::NoSession)?;
        book.unsubscribe(&self.store, self.id, ticker)?;
        self.render();
        Ok(())
    }

    /// One simulation step: advance prices, re-render, broadcast the new
    /// tables. Does nothing while signed out.
    pub fn on_tick(&mut self) -> Result<()> {
        if !self.session.is_active() {
            return Ok(());
        }
        let mut rng = rand::rng();
        self.prices.tick(&mut rng);
        self.render();
        self.store
            .set(self.id, PRICE_UPDATE_KEY, self.prices.snapshot().to_json()?)
    }

    /// Applies a change notification from another tab and re-renders when it
    /// touched local state.
    pub fn on_store_event(&mut self, event: &StoreEvent) -> Result<()> {
        let outcome =
            apply_store_event(&self.store, event, self.subscriptions.as_mut(), &mut self.prices)?;
        if outcome != SyncOutcome::Ignored {
            debug!("{}: {outcome:?} after change to {}", self.id, event.key);
            self.render();
        }
        Ok(())
    }

    /// Drains and applies every pending store notification. Returns how many
    /// were processed.
    pub fn pump_events(&mut self) -> Result<usize> {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            self.on_store_event(&event)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// The rendered card list.
    pub fn cards(&self) -> &CardList {
        &self.cards
    }

    /// The current price tables as seen by this tab.
    pub fn prices(&self) -> &PriceBook {
        &self.prices
    }

    /// The signed-in identity's subscriptions, when logged in.
    pub fn subscriptions(&self) -> Option<&SubscriptionBook> {
        self.subscriptions.as_ref()
    }

    /// Whether this tab currently has a signed-in session.
    pub fn is_signed_in(&self) -> bool {
        self.session.is_active()
    }

    /// Whether the price timer is currently armed.
    pub fn timer_running(&self) -> bool {
        self.timer.is_some()
    }

    fn render(&mut self) {
        match &self.subscriptions {
            Some(book) => {
                let outcome = self.cards.reconcile(book.tickers(), &self.prices);
                debug!(
                    "{}: rendered {} cards ({} patched, {} rebuilt, {} removed)",
                    self.id,
                    self.cards.cards().len(),
                    outcome.patched,
                    outcome.rebuilt,
                    outcome.removed
                );
            }
            None => self.cards.clear(),
        }
    }

    /// Runs the tab until `shutdown` fires (or its sender is dropped).
    ///
    /// Multiplexes the price timer — `never()` while signed out — with the
    /// store's change notifications. Handlers run to completion before the
    /// next event is taken.
    pub fn run(&mut self, shutdown: &Receiver<()>) -> Result<()> {
        let shutdown = shutdown.clone();
        let events = self.events.clone();
        let idle = never::<Instant>();
        info!("{} event loop started", self.id);
        loop {
            let timer = self.timer.clone().unwrap_or_else(|| idle.clone());
            select! {
                recv(shutdown) -> _ => break,
                recv(timer) -> msg => {
                    if msg.is_ok() {
                        self.on_tick()?;
                    }
                },
                recv(events) -> msg => match msg {
                    Ok(event) => self.on_store_event(&event)?,
                    Err(_) => break,
                },
            }
        }
        info!("{} event loop stopped", self.id);
        Ok(())
    }
}

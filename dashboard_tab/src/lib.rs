//!
//! Per-tab dashboard application.
//!
//! Each `TabApp` is one independent tab instance: it owns a tab-local login
//! session, the subscription book for the signed-in identity, the simulated
//! price tables, and the rendered card list. Tabs of the same profile share
//! a `dashboard_hub::SharedStore` and converge through its change events.
//!
//! Modules:
//! - `session` — tab-local identity state (login/logout).
//! - `subscriptions` — the persisted, ordered subscription book.
//! - `simulator` — the ±2% random-walk price tables and change math.
//! - `render` — the card list and its incremental reconciliation.
//! - `sync` — routing of store change events into local state.
//! - `app` — the `TabApp` state object and its event loop.
#![warn(missing_docs)]
pub mod session;
pub mod subscriptions;
pub mod simulator;
pub mod render;
pub mod sync;
pub mod app;

pub use app::TabApp;

//!
//! Shared key-value storage medium for all tabs of one profile.
//!
//! This crate models the browser's profile-wide storage plus its change
//! notifications as a portable abstraction:
//! - `SharedStore` — a clone-able handle to one key-value space shared by
//!   every tab instance of the same profile.
//! - `StoreEvent` — a change notification delivered to every watching tab
//!   *except* the one that performed the write.
//!
//! The one deliberate asymmetry — the originating tab never hears its own
//! write — matches the notification semantics the rest of the system is
//! built around: tabs self-invoke their re-render after local mutations and
//! rely on events only for remote changes.
#![warn(missing_docs)]
pub mod store;

pub use store::{SharedStore, StoreEvent, TabId};

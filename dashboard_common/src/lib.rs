//!
//! Common types and utilities shared by the dashboard hub and tab crates.
//!
//! This crate aggregates:
//! - `error` — unified error type `DashboardError` used across the workspace.
//! - `result` — handy `Result<T, DashboardError>` alias.
//! - `tickers` — the fixed set of supported ticker symbols and base prices.
//! - `identity` — the email-shaped user identity that scopes subscriptions.
//! - `keys` — the shared storage key space and small helpers.
//! - `payload` — serialized values written to the shared store.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod tickers;
pub mod identity;
pub mod keys;
pub mod payload;

pub use error::DashboardError;
pub use result::Result;
pub use identity::Identity;
pub use tickers::Ticker;

//! The signed-in user identity.
//!
//! An `Identity` is an opaque email-shaped string. It scopes the persisted
//! subscription list but is not checked for uniqueness or authenticity beyond
//! a basic `text@text.text` format validation at login time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::result::Result;

/// The logged-in user's email-like identifier.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Identity(String);

impl Identity {
    /// Validates `raw` against a basic `text@text.text` shape and returns the
    /// trimmed identity on success.
    ///
    /// Accepted: exactly one `@`, a non-empty local part, and a domain that
    /// contains a `.` with non-empty labels on both sides. Whitespace anywhere
    /// in the value is rejected.
    pub fn parse(raw: &str) -> Result<Identity> {
        let trimmed = raw.trim();
        if Self::is_valid(trimmed) {
            Ok(Identity(trimmed.to_string()))
        } else {
            Err(DashboardError::InvalidIdentity(raw.to_string()))
        }
    }

    fn is_valid(s: &str) -> bool {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return false;
        }
        let mut parts = s.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        let Some(domain) = parts.next() else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        match domain.rsplit_once('.') {
            Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
            None => false,
        }
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Tab-local login session.
//!
//! The current identity lives only in this tab; other tabs of the same
//! profile keep their own independent sessions even for the same user.
//! Logging out clears the identity but never touches the subscription list
//! persisted in the shared store.

use dashboard_common::{Identity, Result};
use log::info;

/// The tab's current sign-in state.
#[derive(Debug, Default)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    /// Creates a signed-out session.
    pub fn new() -> Self {
        Session { identity: None }
    }

    /// Validates `raw` and signs this tab in.
    ///
    /// A malformed identity leaves the session unchanged.
    pub fn login(&mut self, raw: &str) -> Result<Identity> {
        let identity = Identity::parse(raw)?;
        info!("Signed in as {identity}");
        self.identity = Some(identity.clone());
        Ok(identity)
    }

    /// Signs this tab out. Persisted subscriptions are retained for the next
    /// login by the same identity.
    pub fn logout(&mut self) {
        if let Some(identity) = self.identity.take() {
            info!("Signed out {identity}");
        }
    }

    /// The signed-in identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Whether this tab currently has a signed-in identity.
    pub fn is_active(&self) -> bool {
        self.identity.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_common::DashboardError;

    #[test]
    fn login_then_logout() {
        let mut session = Session::new();
        session.login("a@b.co").unwrap();
        assert!(session.is_active());
        assert_eq!(session.identity().unwrap().as_str(), "a@b.co");

        session.logout();
        assert!(!session.is_active());
        assert!(session.identity().is_none());
    }

    #[test]
    fn failed_login_changes_nothing() {
        let mut session = Session::new();
        let err = session.login("bad-email").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidIdentity(_)));
        assert!(!session.is_active());
    }
}

//! Shared storage key space used by all tabs of one profile.

use crate::identity::Identity;

/// Key holding the serialized shared price/previous-price payload.
pub const PRICE_UPDATE_KEY: &str = "priceUpdate";
/// Signal key rewritten with a timestamp on every subscription mutation, so
/// other tabs receive a change notification even when only this key differs.
pub const SUBSCRIPTION_SIGNAL_KEY: &str = "lastSubscriptionChange";

/// Prefix of the per-identity subscription list keys.
const SUBSCRIPTIONS_PREFIX: &str = "subscriptions_";

/// Storage key of the subscription list persisted for `identity`.
pub fn subscriptions_key(identity: &Identity) -> String {
    format!("{}{}", SUBSCRIPTIONS_PREFIX, identity)
}

/// If `key` is a subscription list key, returns the identity part.
pub fn subscriptions_key_identity(key: &str) -> Option<&str> {
    key.strip_prefix(SUBSCRIPTIONS_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_key_embeds_identity() {
        let id = Identity::parse("a@b.co").unwrap();
        let key = subscriptions_key(&id);
        assert_eq!(key, "subscriptions_a@b.co");
        assert_eq!(subscriptions_key_identity(&key), Some("a@b.co"));
    }

    #[test]
    fn other_keys_are_not_subscription_keys() {
        assert_eq!(subscriptions_key_identity(PRICE_UPDATE_KEY), None);
        assert_eq!(subscriptions_key_identity(SUBSCRIPTION_SIGNAL_KEY), None);
    }
}

//! Per-key in-flight request tokens.
//!
//! "Loading" is derived from whether a token exists for a key rather than
//! from a separate boolean, so it can never drift from the request it
//! describes. Clearing the registry turns every outstanding token stale; a
//! completion holding a stale token must discard its result.

use std::collections::HashMap;
use std::hash::Hash;

/// Token handed to the request that owns a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestToken<K> {
    key: K,
    serial: u64,
}

impl<K> RequestToken<K> {
    /// Key the token was issued for.
    pub const fn key(&self) -> &K {
        &self.key
    }
}

/// Registry of outstanding requests keyed by `K`.
#[derive(Debug)]
pub struct InFlight<K> {
    pending: HashMap<K, u64>,
    next_serial: u64,
}

impl<K> Default for InFlight<K> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            next_serial: 1,
        }
    }
}

impl<K: Eq + Hash + Clone> InFlight<K> {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key`; `None` while another request holds it.
    pub fn begin(&mut self, key: K) -> Option<RequestToken<K>> {
        if self.pending.contains_key(&key) {
            return None;
        }
        let serial = self.next_serial;
        self.next_serial = self.next_serial.wrapping_add(1);
        self.pending.insert(key.clone(), serial);
        Some(RequestToken { key, serial })
    }

    /// Whether a request holds `key`.
    #[must_use]
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    /// Whether any request is outstanding.
    #[must_use]
    pub fn any_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Release the token. Returns `false` when the token went stale.
    pub fn finish(&mut self, token: &RequestToken<K>) -> bool {
        match self.pending.get(&token.key) {
            Some(serial) if *serial == token.serial => {
                self.pending.remove(&token.key);
                true
            }
            _ => false,
        }
    }

    /// Invalidate every outstanding token.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

//! Per-resource request sequencing
//!
//! Each mutating or loading request is tagged with a ticket from a
//! process-wide counter that only grows, so tickets from a discarded page
//! never match a newer page's. When a response arrives, it is applied only if its ticket
//! is still the latest one issued for the same resource; anything older is
//! dropped. This keeps a slow early response from overwriting a faster later
//! one (e.g. two quick showcase toggles).

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Logical resource a request acts on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    Post(i64),
    Profile(i64),
    CurrentProfile,
    Page(&'static str),
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post(id) => write!(f, "post:{id}"),
            Self::Profile(id) => write!(f, "profile:{id}"),
            Self::CurrentProfile => f.write_str("profile:me"),
            Self::Page(name) => write!(f, "page:{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    key: ResourceKey,
    seq: u64,
}

impl Ticket {
    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: HashMap<ResourceKey, u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier ticket for the same key.
    pub fn issue(&mut self, key: ResourceKey) -> Ticket {
        let seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
        self.latest.insert(key.clone(), seq);
        Ticket { key, seq }
    }

    pub fn is_latest(&self, ticket: &Ticket) -> bool {
        self.latest.get(&ticket.key) == Some(&ticket.seq)
    }

    /// Consume a ticket. Returns `true` if the response should be applied.
    pub fn complete(&mut self, ticket: &Ticket) -> bool {
        if self.is_latest(ticket) {
            self.latest.remove(&ticket.key);
            true
        } else {
            tracing::warn!("Discarding stale response for {} (seq {})", ticket.key, ticket.seq);
            false
        }
    }

    /// Is any request for this key still outstanding?
    pub fn is_pending(&self, key: &ResourceKey) -> bool {
        self.latest.contains_key(key)
    }

    /// Drop every outstanding ticket; their responses will be discarded.
    pub fn invalidate_all(&mut self) {
        self.latest.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let mut seq = RequestSequencer::new();
        let first = seq.issue(ResourceKey::Post(1));
        let second = seq.issue(ResourceKey::Post(1));

        // second resolves first, then the stale first arrives
        assert!(seq.complete(&second));
        assert!(!seq.complete(&first));
    }

    #[test]
    fn test_older_response_discarded_even_if_later_still_pending() {
        let mut seq = RequestSequencer::new();
        let first = seq.issue(ResourceKey::Post(1));
        let second = seq.issue(ResourceKey::Post(1));

        assert!(!seq.complete(&first));
        assert!(seq.is_pending(&ResourceKey::Post(1)));
        assert!(seq.complete(&second));
        assert!(!seq.is_pending(&ResourceKey::Post(1)));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut seq = RequestSequencer::new();
        let a = seq.issue(ResourceKey::Post(1));
        let b = seq.issue(ResourceKey::Post(2));
        assert!(seq.complete(&a));
        assert!(seq.complete(&b));
    }

    #[test]
    fn test_invalidate_all() {
        let mut seq = RequestSequencer::new();
        let ticket = seq.issue(ResourceKey::Page("home"));
        seq.invalidate_all();
        assert!(!seq.complete(&ticket));
    }

    #[test]
    fn test_tickets_from_another_sequencer_never_match() {
        let mut old_page = RequestSequencer::new();
        let stale = old_page.issue(ResourceKey::Post(3));
        let mut new_page = RequestSequencer::new();
        let fresh = new_page.issue(ResourceKey::Post(3));
        assert!(!new_page.complete(&stale));
        assert!(new_page.complete(&fresh));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(ResourceKey::Post(3).to_string(), "post:3");
        assert_eq!(ResourceKey::CurrentProfile.to_string(), "profile:me");
    }
}

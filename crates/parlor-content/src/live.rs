//! Live invalidation bus.
//!
//! The content platform notifies the server (via webhook) when tagged data
//! changes. The bus fans those notifications out to every connected browser.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Pending notifications kept for slow subscribers.
const BUS_CAPACITY: usize = 64;

/// A set of tags whose cached content is stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invalidation {
    /// Invalidated tags.
    pub tags: Vec<String>,
}

impl Invalidation {
    /// Create an invalidation for `tags`.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any of `watched` is invalidated.
    pub fn touches<S: AsRef<str>>(&self, watched: &[S]) -> bool {
        self.tags
            .iter()
            .any(|tag| watched.iter().any(|w| w.as_ref() == tag))
    }

    /// Wire form used in SSE event data.
    pub fn to_event_data(&self) -> String {
        self.tags.join(",")
    }

    /// Parse the SSE event data form.
    pub fn from_event_data(data: &str) -> Self {
        Self::new(
            data.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty()),
        )
    }
}

/// Broadcast channel for invalidations.
#[derive(Debug, Clone)]
pub struct LiveBus {
    tx: broadcast::Sender<Invalidation>,
}

impl LiveBus {
    /// Create a new bus.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Subscribe to future invalidations.
    pub fn subscribe(&self) -> broadcast::Receiver<Invalidation> {
        self.tx.subscribe()
    }

    /// Publish an invalidation; returns how many subscribers received it.
    pub fn invalidate(&self, invalidation: Invalidation) -> usize {
        tracing::info!(tags = ?invalidation.tags, "Invalidating live content");
        // No subscribers is not an error
        self.tx.send(invalidation).unwrap_or(0)
    }

    /// Number of connected subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for LiveBus {
    fn default() -> Self {
        Self::new()
    }
}

//! Live content subscriber.
//!
//! Listens to the server's invalidation stream and bumps a version counter
//! whenever a watched tag changes. Data views read the counter so their
//! resources refetch.

use futures::StreamExt;
use gloo_net::eventsource::futures::EventSource;
use leptos::prelude::*;

/// SSE event name carrying invalidated tags.
pub const INVALIDATE_EVENT: &str = "invalidate";

/// Counter bumped on every relevant invalidation.
#[derive(Debug, Clone, Copy)]
pub struct LiveVersion(RwSignal<u64>);

impl LiveVersion {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self(RwSignal::new(0))
    }

    /// Get the counter from context, or a detached one outside providers.
    pub fn use_version() -> Self {
        use_context::<Self>().unwrap_or_default()
    }

    /// Current version; tracks the counter.
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    /// Current version without tracking.
    pub fn get_untracked(&self) -> u64 {
        self.0.get_untracked()
    }

    /// Mark watched content as stale.
    pub fn bump(&self) {
        self.0.update(|v| *v = v.wrapping_add(1));
    }
}

impl Default for LiveVersion {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether comma-separated event data names any watched tag.
pub fn event_touches(data: &str, watched: &[String]) -> bool {
    data.split(',')
        .map(str::trim)
        .any(|tag| watched.iter().any(|w| w == tag))
}

/// Subscribes to the invalidation stream and bumps `version` on matches.
#[component]
pub fn LiveSubscriber(
    /// SSE endpoint.
    #[prop(default = "/api/live".to_string())]
    endpoint: String,
    /// Tags this page tree depends on.
    tags: Vec<String>,
    /// Counter shared with data views.
    version: LiveVersion,
) -> impl IntoView {
    leptos::task::spawn_local(async move {
        let mut source = match EventSource::new(&endpoint) {
            Ok(source) => source,
            Err(e) => {
                log::error!("Live updates unavailable: {e:?}");
                return;
            }
        };
        let mut events = match source.subscribe(INVALIDATE_EVENT) {
            Ok(events) => events,
            Err(e) => {
                log::error!("Failed to subscribe to live updates: {e:?}");
                return;
            }
        };

        while let Some(event) = events.next().await {
            match event {
                Ok((_, message)) => {
                    let data = message.data().as_string().unwrap_or_default();
                    if event_touches(&data, &tags) {
                        log::debug!("Live invalidation: {data}");
                        version.bump();
                    }
                }
                Err(e) => log::warn!("Live update stream error: {e:?}"),
            }
        }

        // The subscription ends when the source closes
        source.close();
    });
}

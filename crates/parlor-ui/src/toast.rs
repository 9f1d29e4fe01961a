//! Toast notifications.

use std::time::Duration;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

/// How long a toast stays up before dismissing itself.
const TOAST_TTL: Duration = Duration::from_secs(4);

/// Toasts beyond this count push out the oldest.
const MAX_VISIBLE: usize = 5;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    /// CSS modifier class.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Info => "parlor-toast-info",
            Self::Success => "parlor-toast-success",
            Self::Error => "parlor-toast-error",
        }
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Ordered, bounded list of visible toasts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Add a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        id
    }

    /// Remove a toast; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    /// Visible toasts, oldest first.
    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Toast queue handle shared through context.
#[derive(Debug, Clone, Copy)]
pub struct Toasts(RwSignal<ToastQueue>);

impl Toasts {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self(RwSignal::new(ToastQueue::default()))
    }

    /// Get the queue from context.
    pub fn use_toasts() -> Self {
        use_context::<Self>().unwrap_or_default()
    }

    /// Show a toast that dismisses itself.
    pub fn show(&self, kind: ToastKind, message: impl Into<String>) {
        let mut id = 0;
        let message = message.into();
        self.0.update(|queue| id = queue.push(kind, message));

        let this = *self;
        set_timeout(move || this.dismiss(id), TOAST_TTL);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(ToastKind::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    /// Remove a toast.
    pub fn dismiss(&self, id: u64) {
        self.0.update(|queue| queue.dismiss(id));
    }

    fn visible(&self) -> Vec<Toast> {
        self.0.with(|queue| queue.items().to_vec())
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the toasts in context.
#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = Toasts::use_toasts();

    view! {
      <div class="parlor-toaster" role="status" aria-live="polite">
        <For
          each=move || toasts.visible()
          key=|toast| toast.id
          children=move |toast| {
            let id = toast.id;
            view! {
              <div class=format!("parlor-toast {}", toast.kind.class())>
                <span class="parlor-toast-message">{toast.message}</span>
                <button
                  class="parlor-toast-close"
                  on:click=move |_| toasts.dismiss(id)
                  aria-label="Dismiss"
                >
                  "×"
                </button>
              </div>
            }
          }
        />
      </div>
    }
}

//! # locale-rs-signals
//!
//! Lifecycle signal dispatcher for translatable records. Save orchestration
//! in `locale-rs-db` fires these signals so observers see a uniform stream
//! of save notifications: a translation-only write is announced through the
//! same `post_save` signal as a base-record write, and observers cannot tell
//! the two apart without inspecting the payload.
//!
//! ## Usage
//!
//! ```
//! use locale_rs_signals::{Signal, PostSave};
//! use std::sync::Arc;
//!
//! let signal: Signal<PostSave> = Signal::new();
//!
//! signal.connect("audit_log", Arc::new(|event: &PostSave| {
//!     println!("record saved (created: {})", event.created);
//! }));
//!
//! signal.send(&PostSave { entity: "post", created: false });
//! assert_eq!(signal.receiver_count(), 1);
//! ```

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

/// The type signature for a signal receiver callback.
///
/// Receivers must be `Send + Sync` so signals can be dispatched from any
/// thread.
pub type SignalReceiver<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A signal that receivers can connect to and senders can dispatch.
///
/// Receivers are called in connection order. Connecting under an existing
/// receiver ID replaces the previous callback.
pub struct Signal<T: 'static> {
    receivers: RwLock<Vec<(String, SignalReceiver<T>)>>,
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Signal<T> {
    /// Creates a new signal with no connected receivers.
    pub fn new() -> Self {
        Self {
            receivers: RwLock::new(Vec::new()),
        }
    }

    /// Connects a receiver under `receiver_id`, replacing any receiver
    /// already connected under that ID.
    pub fn connect(&self, receiver_id: impl Into<String>, callback: SignalReceiver<T>) {
        let id = receiver_id.into();
        let mut receivers = self.receivers.write().expect("signal lock poisoned");

        if let Some(entry) = receivers.iter_mut().find(|(rid, _)| *rid == id) {
            entry.1 = callback;
        } else {
            receivers.push((id, callback));
        }
    }

    /// Disconnects the receiver with the given ID.
    ///
    /// Returns `true` if a receiver was found and removed.
    pub fn disconnect(&self, receiver_id: &str) -> bool {
        let mut receivers = self.receivers.write().expect("signal lock poisoned");
        let len_before = receivers.len();
        receivers.retain(|(id, _)| id != receiver_id);
        receivers.len() < len_before
    }

    /// Sends the signal to all connected receivers, in connection order.
    pub fn send(&self, payload: &T) {
        let receivers = self.receivers.read().expect("signal lock poisoned");
        for (_, callback) in receivers.iter() {
            callback(payload);
        }
    }

    /// Returns the number of connected receivers.
    pub fn receiver_count(&self) -> usize {
        self.receivers.read().expect("signal lock poisoned").len()
    }
}

// ── Lifecycle payloads ───────────────────────────────────────────────

/// Sent before any write is attempted for a record.
#[derive(Debug, Clone)]
pub struct PreSave {
    /// The base table of the record being saved.
    pub entity: &'static str,
}

/// Sent after a successful save.
///
/// Fired when the base record was written, and also when only translations
/// were written: observers receive the same notification in both cases
/// (with `created` false for the latter).
#[derive(Debug, Clone)]
pub struct PostSave {
    /// The base table of the saved record.
    pub entity: &'static str,
    /// Whether the base record was inserted for the first time.
    pub created: bool,
}

/// Sent after one or more translation records were written.
#[derive(Debug, Clone)]
pub struct TranslationsSaved {
    /// The base table of the owning record.
    pub entity: &'static str,
    /// The locales whose translation records were written.
    pub locales: Vec<String>,
}

// ── Global registry ──────────────────────────────────────────────────

/// The well-known lifecycle signals.
pub struct ModelSignals {
    /// Fired before any write is attempted.
    pub pre_save: Signal<PreSave>,
    /// Fired after a successful save (base write or translation-only write).
    pub post_save: Signal<PostSave>,
    /// Fired after translation records were written.
    pub translations_saved: Signal<TranslationsSaved>,
}

/// The global lifecycle signal registry.
pub static MODEL_SIGNALS: Lazy<ModelSignals> = Lazy::new(|| ModelSignals {
    pre_save: Signal::new(),
    post_save: Signal::new(),
    translations_saved: Signal::new(),
});

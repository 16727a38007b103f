//! Best-effort pub/sub fan-out of rate-change events
//!
//! A live notification channel, not a durable queue: delivery is
//! at-most-once with no replay. Subscribers attached before a publish
//! receive the event; later subscribers do not. Each subscriber has a
//! bounded mailbox so one stalled client can never block the publisher or
//! starve its peers - a subscriber whose mailbox overflows is dropped from
//! the channel and must re-subscribe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, SyncSender, TrySendError};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

/// The single deployment-wide channel carrying all rate-change events
pub const RATES_CHANNEL: &str = "rates";

/// Default per-subscriber mailbox capacity
const DEFAULT_BUFFER: usize = 64;

/// A rate creation or update, as seen by real-time clients
///
/// Field names and the ISO-8601 timestamp encoding are a stable wire
/// contract. The event carries no identity beyond this tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateChangeEvent {
    pub rate_id: u32,
    pub bank_id: u32,
    pub term_months: u32,
    /// Fractional decimal (0.035 = 3.5%), not a percentage
    pub interest_rate: f64,
    pub changed_at: DateTime<Utc>,
}

struct SubscriberSlot {
    id: u64,
    sender: SyncSender<RateChangeEvent>,
}

struct NotifierInner {
    channels: Mutex<HashMap<String, Vec<SubscriberSlot>>>,
    buffer: usize,
    next_id: AtomicU64,
}

impl NotifierInner {
    fn unsubscribe(&self, channel: &str, id: u64) {
        let mut channels = self.channels.lock().unwrap();
        if let Some(slots) = channels.get_mut(channel) {
            slots.retain(|slot| slot.id != id);
            if slots.is_empty() {
                channels.remove(channel);
            }
        }
    }
}

/// Fan-out hub for rate-change events
///
/// Cheap to clone; all clones share the same subscriber registry. The write
/// path holds one clone and calls [`publish`](Self::publish) after each
/// successful rate mutation; the transport layer holds another and calls
/// [`subscribe`](Self::subscribe) per client connection.
#[derive(Clone)]
pub struct ChangeNotifier {
    inner: Arc<NotifierInner>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::with_buffer(DEFAULT_BUFFER)
    }

    /// Create a notifier with a specific per-subscriber mailbox capacity
    pub fn with_buffer(buffer: usize) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                channels: Mutex::new(HashMap::new()),
                buffer: buffer.max(1),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Register a subscriber on the named channel
    ///
    /// The returned handle receives every event published after this call
    /// returns, until it is closed or dropped.
    pub fn subscribe(&self, channel: &str) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::sync_channel(self.inner.buffer);

        let mut channels = self.inner.channels.lock().unwrap();
        channels
            .entry(channel.to_string())
            .or_default()
            .push(SubscriberSlot { id, sender });

        Subscription {
            channel: channel.to_string(),
            id,
            receiver,
            inner: Arc::clone(&self.inner),
        }
    }

    /// Deliver an event to every current subscriber of the channel
    ///
    /// Fire-and-forget: never blocks and never fails the caller. A
    /// subscriber with a full mailbox or a dropped receiver is removed from
    /// the channel; delivery to the remaining subscribers is unaffected.
    pub fn publish(&self, channel: &str, event: RateChangeEvent) {
        let mut channels = self.inner.channels.lock().unwrap();
        let Some(slots) = channels.get_mut(channel) else {
            return;
        };

        slots.retain(|slot| match slot.sender.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::warn!(
                    "dropping subscriber {} on channel '{}': mailbox full",
                    slot.id,
                    channel
                );
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        });

        if slots.is_empty() {
            channels.remove(channel);
        }
    }

    /// Number of live subscribers on a channel
    pub fn subscriber_count(&self, channel: &str) -> usize {
        let channels = self.inner.channels.lock().unwrap();
        channels.get(channel).map_or(0, Vec::len)
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a channel subscription; unsubscribes on drop
pub struct Subscription {
    channel: String,
    id: u64,
    receiver: Receiver<RateChangeEvent>,
    inner: Arc<NotifierInner>,
}

impl Subscription {
    /// Take the next buffered event, if any
    pub fn try_recv(&self) -> Option<RateChangeEvent> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Option<RateChangeEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Drain all currently buffered events
    pub fn drain(&self) -> Vec<RateChangeEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Explicitly unsubscribe
    pub fn close(self) {
        // Drop does the work
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.inner.unsubscribe(&self.channel, self.id);
    }
}

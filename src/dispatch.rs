//! Cross-thread bridge between worker tasks and the UI loop.
//!
//! Workers never touch UI-owned state directly; every observable update is
//! posted here as a [`UiEvent`] and applied by the single UI loop, which is
//! the sole writer of the transcript and connection state.

use tokio::sync::mpsc;

/// Events posted by worker tasks for the UI loop to apply.
#[derive(Debug)]
pub enum UiEvent {
    /// A provider call is in flight; show the thinking indicator
    ThinkingStarted,
    /// A provider call finished: the assistant reply, or a display-ready
    /// error description
    CompletionFinished { result: Result<String, String> },
    /// A pending connect finished its health check
    ConnectionChecked { result: Result<(), String> },
    /// One animation tick of the breathing circle
    BreathingFrame { label: String, scale: f64 },
}

/// Posting half of the UI bridge.
///
/// Cloneable so each worker task carries its own sender. `post` never
/// blocks and never runs the event inline; events from the same sender are
/// delivered in post order. No ordering is promised between senders.
#[derive(Debug, Clone)]
pub struct UiDispatch {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl UiDispatch {
    /// Create the bridge, returning the dispatch handle and the receiver
    /// half the UI loop drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueue an event for the UI loop.
    ///
    /// Send failures are ignored: the receiver only disappears during
    /// shutdown, when there is nothing left to update.
    pub fn post(&self, event: UiEvent) {
        let _ = self.tx.send(event);
    }
}

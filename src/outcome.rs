//! Single-delivery outcome channel.
//!
//! Bridges a grant evaluation to a caller-supplied continuation: exactly
//! one [`GrantOutcome`] is delivered per channel, enforced at the type
//! level because [`OutcomeSender::deliver`] consumes the sender. A sender
//! dropped without delivering (the data port never completed, or an
//! infrastructure fault escaped first) surfaces as `None` on the
//! receiving side.

use log::debug;
use tokio::sync::oneshot;

use crate::grant::GrantOutcome;

/// Creates a channel carrying one [`GrantOutcome`].
#[must_use]
pub fn channel() -> (OutcomeSender, OutcomeReceiver) {
    let (tx, rx) = oneshot::channel();
    (OutcomeSender(tx), OutcomeReceiver(rx))
}

/// The delivering half of an outcome channel.
#[derive(Debug)]
pub struct OutcomeSender(oneshot::Sender<GrantOutcome>);

impl OutcomeSender {
    /// Delivers the outcome, consuming the sender.
    ///
    /// # Errors
    ///
    /// Returns the outcome back when the receiver was already dropped.
    pub fn deliver(self, outcome: GrantOutcome) -> Result<(), GrantOutcome> {
        self.0.send(outcome).map_err(|refused| {
            debug!("outcome receiver dropped before delivery");
            refused
        })
    }
}

/// The receiving half of an outcome channel.
#[derive(Debug)]
pub struct OutcomeReceiver(oneshot::Receiver<GrantOutcome>);

impl OutcomeReceiver {
    /// Waits for the outcome.
    ///
    /// `None` means the sender was dropped without delivering.
    pub async fn recv(self) -> Option<GrantOutcome> {
        self.0.await.ok()
    }

    /// Blocking variant of [`recv`](Self::recv) for synchronous hosts.
    ///
    /// Must not be called from within an async runtime.
    #[must_use]
    pub fn blocking_recv(self) -> Option<GrantOutcome> {
        self.0.blocking_recv().ok()
    }
}

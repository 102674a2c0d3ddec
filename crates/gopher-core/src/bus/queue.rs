//! Async event bus between the socket listener and the bot loop.
//!
//! Uses a tokio::sync::mpsc bounded channel. Producers clone the sender;
//! the single consumer holds the receiver behind a mutex.

use super::types::InboundEvent;
use tokio::sync::mpsc;

/// The queue connecting the platform listener to the bot loop.
pub struct EventBus {
    inbound_tx: mpsc::Sender<InboundEvent>,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundEvent>>,
}

impl EventBus {
    /// Create a new bus with the given buffer capacity.
    pub fn new(buffer_size: usize) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::channel(buffer_size);

        EventBus {
            inbound_tx,
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
        }
    }

    /// Publish an event from the listener (inbound).
    pub async fn publish(
        &self,
        event: InboundEvent,
    ) -> Result<(), mpsc::error::SendError<InboundEvent>> {
        self.inbound_tx.send(event).await
    }

    /// Consume the next event (waits until one is available).
    /// Returns None if all senders are dropped.
    pub async fn consume(&self) -> Option<InboundEvent> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await
    }

    /// Get a clone of the inbound sender.
    pub fn sender(&self) -> mpsc::Sender<InboundEvent> {
        self.inbound_tx.clone()
    }
}

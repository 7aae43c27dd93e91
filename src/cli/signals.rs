//! Ctrl+C handling
//!
//! Interrupts are delivered as messages instead of terminating the process,
//! so an active capture can be stopped and its recording kept.

use tokio::sync::mpsc;

/// Stream of Ctrl+C presses
pub struct InterruptSignal {
    receiver: mpsc::Receiver<()>,
}

impl InterruptSignal {
    /// Start listening for Ctrl+C
    pub fn listen() -> Self {
        let (tx, rx) = mpsc::channel(4);

        tokio::spawn(async move {
            loop {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    log::warn!("Ctrl+C handler unavailable: {}", e);
                    break;
                }
                log::debug!("Received Ctrl+C");
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });

        Self::from_receiver(rx)
    }

    fn from_receiver(receiver: mpsc::Receiver<()>) -> Self {
        Self { receiver }
    }

    /// Wait for the next interrupt.
    ///
    /// Pends forever once the listener is gone.
    pub async fn recv(&mut self) {
        if self.receiver.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

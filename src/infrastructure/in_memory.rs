use crate::domain::checkout::{PendingCancellation, PendingCheckout};
use crate::domain::ports::{CheckoutLedger, LedgerDepth};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Default)]
struct Queues {
    checkouts: VecDeque<PendingCheckout>,
    cancellations: VecDeque<PendingCancellation>,
}

/// An in-memory ledger pairing checkouts and cancellations by position.
///
/// Both queues are appended together on `push` and drained independently, so
/// the Nth push is always consumed before the (N+1)th. Consuming a checkout
/// leaves its cancellation behind until a cancellation pop reaches it.
#[derive(Default, Clone)]
pub struct PositionalLedger {
    queues: Arc<Mutex<Queues>>,
}

impl PositionalLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CheckoutLedger for PositionalLedger {
    async fn push(
        &self,
        checkout: PendingCheckout,
        cancellation: PendingCancellation,
    ) -> Result<()> {
        let mut queues = self.queues.lock().await;
        queues.checkouts.push_back(checkout);
        queues.cancellations.push_back(cancellation);
        Ok(())
    }

    async fn pop_checkout(&self) -> Result<Option<PendingCheckout>> {
        Ok(self.queues.lock().await.checkouts.pop_front())
    }

    async fn pop_cancellation(&self) -> Result<Option<PendingCancellation>> {
        Ok(self.queues.lock().await.cancellations.pop_front())
    }

    async fn clear(&self) -> Result<()> {
        let mut queues = self.queues.lock().await;
        queues.checkouts.clear();
        queues.cancellations.clear();
        Ok(())
    }

    async fn depth(&self) -> Result<LedgerDepth> {
        let queues = self.queues.lock().await;
        Ok(LedgerDepth {
            checkouts: queues.checkouts.len(),
            cancellations: queues.cancellations.len(),
        })
    }
}

use super::checkout::{PendingCancellation, PendingCheckout};
use super::payout::PayoutAssertion;
use crate::error::Result;
use async_trait::async_trait;

/// Number of entries waiting in each queue of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerDepth {
    pub checkouts: usize,
    pub cancellations: usize,
}

/// Remembers pending checkouts between payment start and completion.
///
/// The redirect flow carries no correlation id back, so implementations decide
/// which entry a completion call consumes.
#[async_trait]
pub trait CheckoutLedger: Send + Sync {
    async fn push(
        &self,
        checkout: PendingCheckout,
        cancellation: PendingCancellation,
    ) -> Result<()>;
    async fn pop_checkout(&self) -> Result<Option<PendingCheckout>>;
    async fn pop_cancellation(&self) -> Result<Option<PendingCancellation>>;
    async fn clear(&self) -> Result<()>;
    async fn depth(&self) -> Result<LedgerDepth>;
}

/// Turns a payout assertion into a compact signed token.
pub trait AssertionSigner: Send + Sync {
    fn sign(&self, assertion: &PayoutAssertion) -> Result<String>;
}

pub type CheckoutLedgerBox = Box<dyn CheckoutLedger>;
pub type AssertionSignerBox = Box<dyn AssertionSigner>;

use super::assertion::AssertionBuilder;
use crate::domain::checkout::{PendingCancellation, PendingCheckout, Redirect};
use crate::domain::payout::{PayoutLineItem, PayoutState};
use crate::domain::ports::{CheckoutLedgerBox, LedgerDepth};
use crate::error::{GatewayError, Result};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Process-wide values shared by every checkout.
#[derive(Debug, Default)]
struct Session {
    /// Last bearer token seen on a payment start.
    bearer_token: String,
    /// Forces the next assertion to `PENDING`.
    pending_next: bool,
}

/// Emulates the redirect hand-off of a real payment gateway.
///
/// A payment start records where the browser goes back to; a later completion
/// call, which carries no identifier, consumes the oldest pending entry.
/// Every operation runs under the session lock, so a start and a completion
/// never interleave.
pub struct RedirectCoordinator {
    ledger: CheckoutLedgerBox,
    builder: AssertionBuilder,
    session: Mutex<Session>,
    confirmation_url: String,
    fallback_url: Option<String>,
}

impl RedirectCoordinator {
    /// Creates a coordinator.
    ///
    /// # Arguments
    ///
    /// * `ledger` - Where pending checkouts wait for completion.
    /// * `builder` - Signs the assertion of each started payment.
    /// * `confirmation_url` - Returned by every payment start.
    pub fn new(
        ledger: CheckoutLedgerBox,
        builder: AssertionBuilder,
        confirmation_url: impl Into<String>,
    ) -> Self {
        Self {
            ledger,
            builder,
            session: Mutex::new(Session::default()),
            confirmation_url: confirmation_url.into(),
            fallback_url: None,
        }
    }

    /// Destination used when a completion finds nothing to consume.
    pub fn with_fallback_url(mut self, fallback_url: Option<String>) -> Self {
        self.fallback_url = fallback_url;
        self
    }

    /// Records a started payment and returns the URL the caller navigates to.
    pub async fn start(
        &self,
        items: &[PayoutLineItem],
        success_url: String,
        cancel_url: String,
        auth_token: Option<String>,
    ) -> Result<String> {
        let mut session = self.session.lock().await;
        session.bearer_token = auth_token.unwrap_or_default();

        let state = if session.pending_next {
            PayoutState::Pending
        } else {
            PayoutState::Processed
        };
        session.pending_next = false;

        let signed_assertion = self.builder.build(items, state)?;
        info!(items = items.len(), %state, success_url = %success_url, "Payment started");

        self.ledger
            .push(
                PendingCheckout {
                    success_destination: success_url,
                    signed_assertion,
                },
                PendingCancellation {
                    cancel_destination: cancel_url,
                },
            )
            .await?;

        Ok(self.confirmation_url.clone())
    }

    /// Completes the oldest pending payment, falling back to a cancellation.
    pub async fn complete(&self) -> Result<Redirect> {
        let session = self.session.lock().await;

        if let Some(checkout) = self.ledger.pop_checkout().await? {
            info!(target_url = %checkout.success_destination, "Checkin");
            return Ok(Redirect::success(&checkout, &session.bearer_token));
        }

        self.cancel(&session).await
    }

    /// Sends the browser to the oldest pending cancellation destination.
    pub async fn complete_as_cancellation(&self) -> Result<Redirect> {
        let session = self.session.lock().await;
        self.cancel(&session).await
    }

    async fn cancel(&self, session: &Session) -> Result<Redirect> {
        if let Some(cancellation) = self.ledger.pop_cancellation().await? {
            info!(target_url = %cancellation.cancel_destination, "Cancellation");
            return Ok(Redirect::cancellation(
                &cancellation.cancel_destination,
                &session.bearer_token,
            ));
        }

        match &self.fallback_url {
            Some(fallback) => {
                warn!(target_url = %fallback, "Nothing pending, redirecting to fallback");
                Ok(Redirect::cancellation(fallback, &session.bearer_token))
            }
            None => {
                warn!("Nothing pending to complete");
                Err(GatewayError::NothingPending)
            }
        }
    }

    /// Marks the next started payment as `PENDING`.
    pub async fn set_pending_next(&self) {
        self.session.lock().await.pending_next = true;
        info!("Next payment will be PENDING");
    }

    /// Drops every pending entry. The bearer token and pending flag survive.
    pub async fn clear(&self) -> Result<()> {
        let _session = self.session.lock().await;
        self.ledger.clear().await?;
        info!("Cleared pending payments");
        Ok(())
    }

    /// Number of checkouts and cancellations still waiting.
    pub async fn depth(&self) -> Result<LedgerDepth> {
        let _session = self.session.lock().await;
        self.ledger.depth().await
    }

    /// The token the next redirect will carry.
    pub async fn bearer_token(&self) -> String {
        self.session.lock().await.bearer_token.clone()
    }
}

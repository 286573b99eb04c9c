use crate::domain::payout::{AssertionOptions, PayoutAssertion, PayoutLineItem, PayoutState};
use crate::domain::ports::AssertionSignerBox;
use crate::error::Result;
use tracing::debug;

/// Produces signed payout assertions for a list of line items.
///
/// The unsigned payload is a pure function of the items, the state and the
/// configured options.
pub struct AssertionBuilder {
    signer: AssertionSignerBox,
    options: AssertionOptions,
}

impl AssertionBuilder {
    pub fn new(signer: AssertionSignerBox, options: AssertionOptions) -> Self {
        Self { signer, options }
    }

    pub fn options(&self) -> &AssertionOptions {
        &self.options
    }

    /// Builds and signs the assertion for `items`, all stamped with `state`.
    pub fn build(&self, items: &[PayoutLineItem], state: PayoutState) -> Result<String> {
        let assertion = PayoutAssertion::new(items, state, &self.options);
        debug!(payload = ?assertion, "Built payout assertion");
        self.signer.sign(&assertion)
    }
}

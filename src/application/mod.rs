//! Application layer of the mock payment gateway.
//!
//! `AssertionBuilder` signs payout decisions and `RedirectCoordinator` pairs
//! payment starts with the completion calls that arrive later, uncorrelated.

pub mod assertion;
pub mod coordinator;

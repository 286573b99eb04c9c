//! Value types of the mock gateway and the ports the application layer
//! depends on.

pub mod checkout;
pub mod payout;
pub mod ports;

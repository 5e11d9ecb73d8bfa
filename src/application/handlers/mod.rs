//! Command handlers, grouped by flow.

pub mod checkout;
pub mod refund;

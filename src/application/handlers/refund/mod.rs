//! Refund flow handlers.

mod preview_refund;

pub use preview_refund::{PreviewRefundCommand, PreviewRefundHandler, PreviewRefundResult};

//! Application layer - orchestration handlers.

pub mod handlers;

//! Prepbill - Coupon & Refund Financial Engine
//!
//! This crate implements the money-critical core of an exam-prep
//! subscription platform: coupon validation with a stacking guard,
//! discount calculation, usage recording, and prorated cancellation
//! refunds. Persistence and payment-gateway flows live behind ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

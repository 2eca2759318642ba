//! Reservation Pricing
//!
//! Computes the total shown on the checkout form:
//! service price + item lines − discount, clamped at zero.

mod calculator;

pub use calculator::*;

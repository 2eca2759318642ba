//! 预约业务流程
//!
//! Rules that span several tables: opening-hour checks, teacher checks,
//! pricing quotes and the checkout of a court reservation.

mod checkout;
mod rules;

pub use checkout::{checkout, quote};
pub use rules::{create_reservation, remove_reservation, update_reservation, validate_window};

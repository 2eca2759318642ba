//! Data models
//!
//! Shared between court-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, every row carries `created_at` (Unix millis).

pub mod client;
pub mod court;
pub mod court_reservation;
pub mod discount;
pub mod employee;
pub mod item;
pub mod item_reservation;
pub mod list;
pub mod price;
pub mod serde_helpers;
pub mod transaction;

// Re-exports
pub use client::*;
pub use court::*;
pub use court_reservation::*;
pub use discount::*;
pub use employee::*;
pub use item::*;
pub use item_reservation::*;
pub use list::*;
pub use price::*;
pub use transaction::*;

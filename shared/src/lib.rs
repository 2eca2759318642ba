//! Shared types for the court reservation service
//!
//! Domain models exchanged with the frontend, the unified error system, and
//! the two pure computations behind the scheduler page: the slot grid
//! ([`scheduler`]) and the reservation total ([`pricing`]).

pub mod error;
pub mod models;
pub mod pricing;
pub mod scheduler;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorBody, ErrorCode};

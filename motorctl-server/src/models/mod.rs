//! Domain models
//!
//! The motor record is decoded as-is; the only validation performed is the
//! filter decision for lookups.

pub mod filter;
pub mod motor;
pub mod validation;

pub use filter::{FetchParams, MotorFilter};
pub use motor::Motor;
pub use validation::ValidationError;

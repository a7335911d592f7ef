//! Repository implementations for database access
//!
//! Every statement is parameterized; values are never formatted into SQL.

pub mod motors;

pub use motors::PgMotorStore;

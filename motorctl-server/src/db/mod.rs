//! Database layer - connection pool and motor storage
//!
//! Handlers only see the [`MotorStore`] trait. The PostgreSQL
//! implementation shares one pool for the whole process; the in-memory one
//! backs router tests.

pub mod memory;
pub mod pool;
pub mod repos;

use async_trait::async_trait;

use crate::models::{Motor, MotorFilter};

pub use memory::MemoryMotorStore;
pub use pool::{connect, create_pool, ping};
pub use repos::PgMotorStore;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Storage for motor records
#[async_trait]
pub trait MotorStore: Send + Sync {
    /// Insert one record with all twelve fields bound positionally.
    async fn insert(&self, motor: &Motor) -> Result<(), DbError>;

    /// Select the records matching `filter`, in storage order.
    async fn find(&self, filter: &MotorFilter) -> Result<Vec<Motor>, DbError>;
}

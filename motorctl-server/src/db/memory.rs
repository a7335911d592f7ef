//! In-memory motor store
//!
//! Same contract as [`PgMotorStore`](super::PgMotorStore): insertion order
//! is storage order, nothing is deduplicated. [`MemoryMotorStore::close`]
//! makes every later call fail the way a closed pool does.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{DbError, MotorStore};
use crate::models::{Motor, MotorFilter};

#[derive(Default)]
pub struct MemoryMotorStore {
    motors: Mutex<Vec<Motor>>,
    closed: AtomicBool,
}

impl MemoryMotorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail all subsequent calls with `PoolClosed`.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Motor>> {
        self.motors.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_open(&self) -> Result<(), DbError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

fn matches(motor: &Motor, filter: &MotorFilter) -> bool {
    match filter {
        MotorFilter::SerialAndParty {
            serial_no,
            party_name,
        } => motor.serial_no == *serial_no && motor.party_name == *party_name,
        MotorFilter::Serial(serial_no) => motor.serial_no == *serial_no,
        MotorFilter::Party(party_name) => motor.party_name == *party_name,
    }
}

#[async_trait]
impl MotorStore for MemoryMotorStore {
    async fn insert(&self, motor: &Motor) -> Result<(), DbError> {
        self.check_open()?;
        self.lock().push(motor.clone());
        Ok(())
    }

    async fn find(&self, filter: &MotorFilter) -> Result<Vec<Motor>, DbError> {
        self.check_open()?;
        Ok(self
            .lock()
            .iter()
            .filter(|m| matches(m, filter))
            .cloned()
            .collect())
    }
}

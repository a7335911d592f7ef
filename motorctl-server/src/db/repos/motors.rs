//! Motor repository
//!
//! - insert: plain INSERT, duplicate handling left to the table's constraints
//! - find: one SELECT per filter shape, no ORDER BY

use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::{DbError, MotorStore};
use crate::models::{Motor, MotorFilter};

const INSERT_MOTOR: &str = r#"
    INSERT INTO motors (serial_no, motor_model, rpm, phase, party_name, dispatch_date,
                        transport_agency, lr_or_eway_bill, test_certificate, party_address,
                        hp_kw, remarks)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
"#;

const SELECT_BY_SERIAL_AND_PARTY: &str = r#"
    SELECT serial_no, motor_model, rpm, phase, party_name, dispatch_date,
           transport_agency, lr_or_eway_bill, test_certificate, party_address,
           hp_kw, remarks
    FROM motors
    WHERE serial_no = $1 AND party_name = $2
"#;

const SELECT_BY_SERIAL: &str = r#"
    SELECT serial_no, motor_model, rpm, phase, party_name, dispatch_date,
           transport_agency, lr_or_eway_bill, test_certificate, party_address,
           hp_kw, remarks
    FROM motors
    WHERE serial_no = $1
"#;

const SELECT_BY_PARTY: &str = r#"
    SELECT serial_no, motor_model, rpm, phase, party_name, dispatch_date,
           transport_agency, lr_or_eway_bill, test_certificate, party_address,
           hp_kw, remarks
    FROM motors
    WHERE party_name = $1
"#;

/// PostgreSQL-backed motor store. Cloning shares the pool.
#[derive(Clone)]
pub struct PgMotorStore {
    pool: PgPool,
}

impl PgMotorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MotorStore for PgMotorStore {
    async fn insert(&self, motor: &Motor) -> Result<(), DbError> {
        sqlx::query(INSERT_MOTOR)
            .bind(&motor.serial_no)
            .bind(&motor.motor_model)
            .bind(motor.rpm)
            .bind(&motor.phase)
            .bind(&motor.party_name)
            .bind(&motor.dispatch_date)
            .bind(&motor.transport_agency)
            .bind(&motor.lr_eway_bill)
            .bind(&motor.test_certificate)
            .bind(&motor.party_address)
            .bind(&motor.hp_kw)
            .bind(&motor.remarks)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find(&self, filter: &MotorFilter) -> Result<Vec<Motor>, DbError> {
        let query = match filter {
            MotorFilter::SerialAndParty {
                serial_no,
                party_name,
            } => sqlx::query_as::<_, Motor>(SELECT_BY_SERIAL_AND_PARTY)
                .bind(serial_no)
                .bind(party_name),
            MotorFilter::Serial(serial_no) => {
                sqlx::query_as::<_, Motor>(SELECT_BY_SERIAL).bind(serial_no)
            }
            MotorFilter::Party(party_name) => {
                sqlx::query_as::<_, Motor>(SELECT_BY_PARTY).bind(party_name)
            }
        };

        Ok(query.fetch_all(&self.pool).await?)
    }
}

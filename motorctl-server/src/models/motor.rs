//! Motor dispatch record

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// One dispatched motor as stored in the `motors` table.
///
/// Absent or `null` JSON keys decode to empty strings (or `0` for `rpm`); a
/// key with the wrong type is a decode error. The JSON key `lr_eway_bill` is
/// stored in the `lr_or_eway_bill` column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Motor {
    #[serde(deserialize_with = "null_as_default")]
    pub serial_no: String,
    #[serde(deserialize_with = "null_as_default")]
    pub motor_model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rpm: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub phase: String,
    #[serde(deserialize_with = "null_as_default")]
    pub party_name: String,
    /// Free text, not parsed as a date
    #[serde(deserialize_with = "null_as_default")]
    pub dispatch_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transport_agency: String,
    #[sqlx(rename = "lr_or_eway_bill")]
    #[serde(deserialize_with = "null_as_default")]
    pub lr_eway_bill: String,
    #[serde(deserialize_with = "null_as_default")]
    pub test_certificate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub party_address: String,
    /// Power rating as written on the plate (e.g. `5HP`, `3.7kW`)
    #[serde(deserialize_with = "null_as_default")]
    pub hp_kw: String,
    #[serde(deserialize_with = "null_as_default")]
    pub remarks: String,
}

impl Motor {
    /// Decode a record from a raw request body. A `null` body is an empty
    /// record.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Option<Self>>(body).map(Option::unwrap_or_default)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

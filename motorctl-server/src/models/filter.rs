//! Lookup filter for `GET /fetch`

use super::ValidationError;

/// Raw query parameters, before trimming
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FetchParams {
    pub serial_no: Option<String>,
    pub party_name: Option<String>,
}

impl FetchParams {
    /// Pick the parameters out of decoded query pairs.
    ///
    /// A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "serial_no" => &mut params.serial_no,
                "party_name" => &mut params.party_name,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// Which rows a lookup selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotorFilter {
    SerialAndParty { serial_no: String, party_name: String },
    Serial(String),
    Party(String),
}

impl MotorFilter {
    /// Decide the filter from the two optional parameters.
    ///
    /// Values are whitespace-trimmed; a blank value counts as absent.
    pub fn new(serial_no: Option<&str>, party_name: Option<&str>) -> Result<Self, ValidationError> {
        let serial_no = present(serial_no);
        let party_name = present(party_name);

        match (serial_no, party_name) {
            (Some(serial_no), Some(party_name)) => Ok(Self::SerialAndParty {
                serial_no: serial_no.to_owned(),
                party_name: party_name.to_owned(),
            }),
            (Some(serial_no), None) => Ok(Self::Serial(serial_no.to_owned())),
            (None, Some(party_name)) => Ok(Self::Party(party_name.to_owned())),
            (None, None) => Err(ValidationError::NoFilter),
        }
    }
}

impl TryFrom<FetchParams> for MotorFilter {
    type Error = ValidationError;

    fn try_from(params: FetchParams) -> Result<Self, Self::Error> {
        Self::new(params.serial_no.as_deref(), params.party_name.as_deref())
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

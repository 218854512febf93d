use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub dob: jiff::civil::Date,
    pub gender: String,
    pub created_at: jiff::Timestamp,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive substring match against "first last".
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty() || self.full_name().to_lowercase().contains(&query)
    }
}

/// Demographics supplied when registering a patient. The store assigns the
/// id and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub dob: jiff::civil::Date,
    pub gender: String,
}

impl NewPatient {
    /// Build from loosely-typed request fields. Every field is required and
    /// `dob` must be an ISO 8601 date (`YYYY-MM-DD`).
    pub fn from_parts(
        first_name: Option<String>,
        last_name: Option<String>,
        dob: Option<String>,
        gender: Option<String>,
    ) -> Result<Self, CoreError> {
        let first_name = required("first_name", first_name)?;
        let last_name = required("last_name", last_name)?;
        let dob_raw = required("dob", dob)?;
        let gender = required("gender", gender)?;

        let dob = dob_raw
            .parse::<jiff::civil::Date>()
            .map_err(|e| CoreError::InvalidDate {
                value: dob_raw.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            first_name,
            last_name,
            dob,
            gender,
        })
    }

    pub fn into_patient(self, id: Uuid, created_at: jiff::Timestamp) -> Patient {
        Patient {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            dob: self.dob,
            gender: self.gender,
            created_at,
        }
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::MissingField(field.to_string())),
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AllergyKind {
    Allergy,
    Addiction,
}

impl AllergyKind {
    pub fn label(&self) -> &'static str {
        match self {
            AllergyKind::Allergy => "Allergy",
            AllergyKind::Addiction => "Addiction",
        }
    }
}

impl fmt::Display for AllergyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AllergyKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allergy" => Ok(AllergyKind::Allergy),
            "addiction" => Ok(AllergyKind::Addiction),
            _ => Err(CoreError::UnknownKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AllergyEntry {
    pub id: Uuid,
    pub patient_id: Uuid,
    #[serde(rename = "type")]
    pub kind: AllergyKind,
    pub description: String,
    /// Position in the patient's allergy list, starting at 1.
    pub sequence: u64,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewAllergy {
    #[serde(rename = "type")]
    pub kind: AllergyKind,
    pub description: String,
}

impl NewAllergy {
    pub fn into_entry(
        self,
        patient_id: Uuid,
        sequence: u64,
        created_at: jiff::Timestamp,
    ) -> AllergyEntry {
        AllergyEntry {
            id: Uuid::new_v4(),
            patient_id,
            kind: self.kind,
            description: self.description,
            sequence,
            created_at,
        }
    }
}

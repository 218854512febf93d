use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A dictated or typed general examination transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExaminationNote {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub notes: String,
    pub sequence: u64,
    pub created_at: jiff::Timestamp,
}

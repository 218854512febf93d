use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// The four raw DAS28 inputs as submitted by the clinician.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Das28Inputs {
    pub tender_count: i64,
    pub swollen_count: i64,
    /// ESR (mm/h) or CRP (mg/L). Must be strictly positive.
    pub esr_value: f64,
    /// Patient global assessment, nominally 0–100.
    pub global_assessment: f64,
}

/// A persisted DAS28 computation. `score` is always the score of `inputs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    pub id: Uuid,
    pub patient_id: Uuid,
    #[serde(flatten)]
    pub inputs: Das28Inputs,
    pub score: f64,
    pub sequence: u64,
    pub created_at: jiff::Timestamp,
}

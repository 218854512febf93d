use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use arthra_core::models::score::Das28Inputs;

use crate::error::ScoringError;

pub const TENDER_WEIGHT: f64 = 0.56;
pub const SWOLLEN_WEIGHT: f64 = 0.28;
pub const MARKER_WEIGHT: f64 = 0.70;
pub const GLOBAL_WEIGHT: f64 = 0.014;

/// Compute DAS28 from its four inputs.
///
/// ```text
/// 0.56·√tender + 0.28·√swollen + 0.70·ln(marker) + 0.014·global
/// ```
///
/// Counts must be non-negative and the marker strictly positive. The global
/// assessment is not range-checked; only non-finite values are rejected.
pub fn compute_score(
    tender_count: i64,
    swollen_count: i64,
    esr_value: f64,
    global_assessment: f64,
) -> Result<f64, ScoringError> {
    if tender_count < 0 {
        return Err(ScoringError::invalid("tender_count", "must not be negative"));
    }
    if swollen_count < 0 {
        return Err(ScoringError::invalid("swollen_count", "must not be negative"));
    }
    if !esr_value.is_finite() {
        return Err(ScoringError::invalid("esr_value", "must be a finite number"));
    }
    if esr_value <= 0.0 {
        return Err(ScoringError::invalid("esr_value", "must be greater than zero"));
    }
    if !global_assessment.is_finite() {
        return Err(ScoringError::invalid(
            "global_assessment",
            "must be a finite number",
        ));
    }

    Ok(TENDER_WEIGHT * (tender_count as f64).sqrt()
        + SWOLLEN_WEIGHT * (swollen_count as f64).sqrt()
        + MARKER_WEIGHT * esr_value.ln()
        + GLOBAL_WEIGHT * global_assessment)
}

/// [`compute_score`] over a stored or submitted input set.
pub fn score_inputs(inputs: &Das28Inputs) -> Result<f64, ScoringError> {
    compute_score(
        inputs.tender_count,
        inputs.swollen_count,
        inputs.esr_value,
        inputs.global_assessment,
    )
}

/// Extract the four inputs from a loosely-typed JSON body.
///
/// Absent, `null` or non-numeric fields fail with the offending field name.
/// Counts must be whole numbers; `3.0` is accepted as `3`.
pub fn parse_inputs(body: &Value) -> Result<Das28Inputs, ScoringError> {
    let inputs = Das28Inputs {
        tender_count: count_field(body, "tender_count")?,
        swollen_count: count_field(body, "swollen_count")?,
        esr_value: number_field(body, "esr_value")?,
        global_assessment: number_field(body, "global_assessment")?,
    };
    Ok(inputs)
}

fn number_field(body: &Value, field: &str) -> Result<f64, ScoringError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ScoringError::invalid(field, "missing")),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| ScoringError::invalid(field, "must be a number")),
    }
}

fn count_field(body: &Value, field: &str) -> Result<i64, ScoringError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ScoringError::invalid(field, "missing")),
        Some(value) => {
            if let Some(n) = value.as_i64() {
                return Ok(n);
            }
            match value.as_f64() {
                Some(n) if !n.is_finite() || n.fract() != 0.0 => {
                    Err(ScoringError::invalid(field, "must be a whole number"))
                }
                Some(n) if n.abs() >= i64::MAX as f64 => {
                    Err(ScoringError::invalid(field, "is out of range"))
                }
                Some(n) => Ok(n as i64),
                None => Err(ScoringError::invalid(field, "must be a number")),
            }
        }
    }
}

/// Conventional interpretation bands for a DAS28 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DiseaseActivity {
    /// Below 2.6.
    Remission,
    /// 2.6 up to (not including) 3.2.
    Low,
    /// 3.2 up to and including 5.1.
    Moderate,
    /// Above 5.1.
    High,
}

impl DiseaseActivity {
    pub fn from_score(score: f64) -> Self {
        if score > 5.1 {
            DiseaseActivity::High
        } else if score >= 3.2 {
            DiseaseActivity::Moderate
        } else if score >= 2.6 {
            DiseaseActivity::Low
        } else {
            DiseaseActivity::Remission
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DiseaseActivity::Remission => "Remission",
            DiseaseActivity::Low => "Low activity",
            DiseaseActivity::Moderate => "Moderate activity",
            DiseaseActivity::High => "High disease activity",
        }
    }
}

use serde::{Deserialize, Serialize};

use super::allergy::AllergyEntry;
use super::examination::ExaminationNote;
use super::joint::JointObservation;
use super::patient::Patient;
use super::score::ScoreResult;

/// Everything a patient report is rendered from, captured in one read pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBundle {
    pub patient: Patient,
    pub allergies: Vec<AllergyEntry>,
    pub examination: ExaminationSection,
    pub joints: Vec<JointObservation>,
    pub score: ScoreSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExaminationSection {
    Recorded(ExaminationNote),
    NotRecorded,
}

impl From<Option<ExaminationNote>> for ExaminationSection {
    fn from(note: Option<ExaminationNote>) -> Self {
        note.map_or(ExaminationSection::NotRecorded, ExaminationSection::Recorded)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScoreSection {
    Recorded(ScoreResult),
    NotRecorded,
}

impl From<Option<ScoreResult>> for ScoreSection {
    fn from(result: Option<ScoreResult>) -> Self {
        result.map_or(ScoreSection::NotRecorded, ScoreSection::Recorded)
    }
}

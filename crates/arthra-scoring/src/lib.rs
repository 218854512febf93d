//! arthra-scoring
//!
//! DAS28 disease-activity scoring. Pure computation with no storage or AWS
//! dependency. Defines the score formula, its input validation, the activity
//! bands used to interpret a score, and the 28-joint set the counts refer to.

pub mod das28;
pub mod error;
pub mod joints;

pub use das28::{compute_score, parse_inputs, score_inputs, DiseaseActivity};
pub use error::ScoringError;

pub mod allergy;
pub mod examination;
pub mod joint;
pub mod patient;
pub mod report;
pub mod score;

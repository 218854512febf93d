//! arthra-export
//!
//! Patient report synthesis: gathers a patient's records from a
//! [`PatientStore`](arthra_storage::PatientStore), lays them out into fixed
//! sections and pages, and writes the pages as PDF or DOCX.

pub mod aggregate;
pub mod docx;
pub mod error;
pub mod format;
pub mod layout;
pub mod pdf;
pub mod render;
pub mod styles;

pub use aggregate::aggregate;
pub use format::ExportFormat;
pub use render::{build_report, render, Document};

use uuid::Uuid;

use arthra_core::models::report::{ExaminationSection, ReportBundle, ScoreSection};
use arthra_storage::PatientStore;

use crate::aggregate::aggregate;
use crate::error::ExportError;
use crate::format::ExportFormat;
use crate::layout::{paginate, Line, LineStyle, Page};
use crate::styles::DocumentStyles;

pub const ALLERGIES_HEADING: &str = "Allergies & Addictions:";
pub const EXAMINATION_HEADING: &str = "General Examination Notes:";
pub const JOINTS_HEADING: &str = "Joint Assessment:";
pub const SCORE_HEADING: &str = "DAS28 Result:";

pub const NO_EXAMINATION: &str = "No examination recorded.";
pub const NO_SCORE: &str = "No score recorded.";

/// A rendered report, ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub pages: usize,
    pub format: ExportFormat,
    pub file_name: String,
}

impl Document {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

pub fn file_name(patient_id: Uuid, format: ExportFormat) -> String {
    format!("Patient_{patient_id}_Report.{}", format.extension())
}

/// The report's lines in their fixed section order: header, allergies,
/// examination notes, joints, DAS28.
pub fn report_lines(bundle: &ReportBundle, styles: &DocumentStyles) -> Vec<Line> {
    let patient = &bundle.patient;
    let gap = styles.section_gap;
    let mut lines = vec![
        Line::new(
            format!("Patient Report: {}", patient.full_name()),
            LineStyle::Title,
        ),
        Line::new(
            format!("DOB: {}    Gender: {}", patient.dob, patient.gender),
            LineStyle::Subtitle,
        ),
        Line::new(ALLERGIES_HEADING, LineStyle::Heading),
    ];

    lines.extend(
        bundle
            .allergies
            .iter()
            .map(|a| Line::new(format!("- {}: {}", a.kind, a.description), LineStyle::Item)),
    );

    lines.push(Line::new(EXAMINATION_HEADING, LineStyle::Heading).with_space_before(gap));
    match &bundle.examination {
        ExaminationSection::Recorded(note) => lines.extend(
            note.notes
                .split('\n')
                .map(|l| Line::new(l.trim_end_matches('\r'), LineStyle::Note)),
        ),
        ExaminationSection::NotRecorded => lines.push(Line::new(NO_EXAMINATION, LineStyle::Note)),
    }

    lines.push(Line::new(JOINTS_HEADING, LineStyle::Heading).with_space_before(gap));
    lines.extend(bundle.joints.iter().map(|j| {
        Line::new(format!("- {}: {}", j.joint_name, j.status()), LineStyle::Item)
    }));

    lines.push(Line::new(SCORE_HEADING, LineStyle::Heading).with_space_before(gap));
    match &bundle.score {
        ScoreSection::Recorded(result) => {
            let inputs = &result.inputs;
            lines.extend([
                Line::new(format!("Tender count: {}", inputs.tender_count), LineStyle::Item),
                Line::new(format!("Swollen count: {}", inputs.swollen_count), LineStyle::Item),
                Line::new(format!("ESR/CRP: {}", decimal(inputs.esr_value)), LineStyle::Item),
                Line::new(
                    format!("Global assessment: {}", decimal(inputs.global_assessment)),
                    LineStyle::Item,
                ),
                Line::new(
                    format!("Calculated DAS28 score: {:.2}", result.score),
                    LineStyle::Item,
                ),
            ]);
        }
        ScoreSection::NotRecorded => lines.push(Line::new(NO_SCORE, LineStyle::Item)),
    }

    lines
}

/// Lay the report out into pages.
pub fn layout_report(bundle: &ReportBundle, styles: &DocumentStyles) -> Vec<Page> {
    paginate(report_lines(bundle, styles), styles)
}

/// Render a bundle into a paginated document. Never fails on missing
/// sub-records; only the output writer can fail.
pub fn render(
    bundle: &ReportBundle,
    format: ExportFormat,
    styles: &DocumentStyles,
) -> Result<Document, ExportError> {
    let pages = layout_report(bundle, styles);
    let title = format!("Patient Report: {}", bundle.patient.full_name());

    let bytes = match format {
        ExportFormat::Pdf => crate::pdf::generate_pdf(&title, &pages, styles)?,
        ExportFormat::Docx => crate::docx::generate_docx(&pages, styles)?,
    };

    tracing::info!(
        patient_id = %bundle.patient.id,
        format = %format,
        pages = pages.len(),
        bytes = bytes.len(),
        "report rendered"
    );

    Ok(Document {
        bytes,
        pages: pages.len(),
        format,
        file_name: file_name(bundle.patient.id, format),
    })
}

/// Aggregate a patient's records and render them in one step.
pub async fn build_report<S: PatientStore>(
    store: &S,
    patient_id: Uuid,
    format: ExportFormat,
    styles: &DocumentStyles,
) -> Result<Document, ExportError> {
    let bundle = aggregate(store, patient_id).await?;
    render(&bundle, format, styles)
}

/// Floats always show a decimal point, so `25` prints as `25.0`.
fn decimal(value: f64) -> String {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

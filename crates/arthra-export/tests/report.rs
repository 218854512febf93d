use arthra_core::models::allergy::{AllergyKind, NewAllergy};
use arthra_core::models::joint::NewJointObservation;
use arthra_core::models::patient::{NewPatient, Patient};
use arthra_core::models::report::{ExaminationSection, ScoreSection};
use arthra_core::models::score::Das28Inputs;
use arthra_export::error::{AggregateError, ExportError};
use arthra_export::layout::LineStyle;
use arthra_export::render::{
    layout_report, report_lines, ALLERGIES_HEADING, EXAMINATION_HEADING, JOINTS_HEADING,
    NO_EXAMINATION, NO_SCORE, SCORE_HEADING,
};
use arthra_export::styles::DocumentStyles;
use arthra_export::{aggregate, build_report, render, ExportFormat};
use arthra_storage::{MemoryStore, PatientStore};
use uuid::Uuid;

async fn store_with_patient() -> (MemoryStore, Patient) {
    let store = MemoryStore::new();
    let patient = store
        .create_patient(NewPatient {
            first_name: "Marie".to_string(),
            last_name: "Curie".to_string(),
            dob: jiff::civil::date(1967, 11, 7),
            gender: "F".to_string(),
        })
        .await
        .unwrap();
    (store, patient)
}

fn texts(lines: &[arthra_export::layout::Line]) -> Vec<&str> {
    lines.iter().map(|l| l.text.as_str()).collect()
}

#[tokio::test]
async fn empty_record_renders_all_sections_on_one_page() {
    let (store, patient) = store_with_patient().await;
    let styles = DocumentStyles::default();

    let bundle = aggregate(&store, patient.id).await.unwrap();
    assert!(bundle.allergies.is_empty());
    assert!(bundle.joints.is_empty());
    assert_eq!(bundle.examination, ExaminationSection::NotRecorded);
    assert_eq!(bundle.score, ScoreSection::NotRecorded);

    let lines = report_lines(&bundle, &styles);
    assert_eq!(
        texts(&lines),
        [
            "Patient Report: Marie Curie",
            "DOB: 1967-11-07    Gender: F",
            ALLERGIES_HEADING,
            EXAMINATION_HEADING,
            NO_EXAMINATION,
            JOINTS_HEADING,
            SCORE_HEADING,
            NO_SCORE,
        ]
    );

    let pages = layout_report(&bundle, &styles);
    assert_eq!(pages.len(), 1);

    let pdf = render(&bundle, ExportFormat::Pdf, &styles).unwrap();
    assert_eq!(pdf.pages, 1);
    assert!(pdf.bytes.starts_with(b"%PDF"));
    assert_eq!(pdf.content_type(), "application/pdf");
    assert_eq!(pdf.file_name, format!("Patient_{}_Report.pdf", patient.id));
}

#[tokio::test]
async fn allergies_render_in_insertion_order() {
    let (store, patient) = store_with_patient().await;
    store
        .append_allergies(
            patient.id,
            vec![
                NewAllergy {
                    kind: AllergyKind::Allergy,
                    description: "pollen".to_string(),
                },
                NewAllergy {
                    kind: AllergyKind::Addiction,
                    description: "nicotine".to_string(),
                },
            ],
        )
        .await
        .unwrap();

    let bundle = aggregate(&store, patient.id).await.unwrap();
    let lines = report_lines(&bundle, &DocumentStyles::default());
    let at = lines.iter().position(|l| l.text == ALLERGIES_HEADING).unwrap();
    assert_eq!(lines[at + 1].text, "- Allergy: pollen");
    assert_eq!(lines[at + 2].text, "- Addiction: nicotine");
    assert_eq!(lines[at + 1].style, LineStyle::Item);
}

#[tokio::test]
async fn latest_examination_is_reported_line_by_line() {
    let (store, patient) = store_with_patient().await;
    for notes in ["first visit", "second visit", "third visit\n  swelling noted\n"] {
        store
            .append_examination(patient.id, notes.to_string())
            .await
            .unwrap();
    }

    let bundle = aggregate(&store, patient.id).await.unwrap();
    let lines = report_lines(&bundle, &DocumentStyles::default());
    let all = texts(&lines);
    assert!(!all.contains(&"first visit"));
    let at = all.iter().position(|t| *t == EXAMINATION_HEADING).unwrap();
    assert_eq!(all[at + 1], "third visit");
    assert_eq!(all[at + 2], "  swelling noted");
    assert_eq!(all[at + 3], "");
    assert_eq!(all[at + 4], JOINTS_HEADING);
}

#[tokio::test]
async fn joint_status_and_score_lines() {
    let (store, patient) = store_with_patient().await;
    let joints = [
        ("Left Wrist", true, true),
        ("Right Wrist", false, true),
        ("Left Knee", true, false),
        ("Right Knee", false, false),
    ];
    store
        .append_joint_observations(
            patient.id,
            joints
                .iter()
                .map(|(name, swollen, tender)| NewJointObservation {
                    joint_name: name.to_string(),
                    is_swollen: *swollen,
                    is_tender: *tender,
                })
                .collect(),
        )
        .await
        .unwrap();
    let inputs = Das28Inputs {
        tender_count: 10,
        swollen_count: 8,
        esr_value: 25.0,
        global_assessment: 50.0,
    };
    store.append_score(patient.id, inputs, 5.5152).await.unwrap();

    let bundle = aggregate(&store, patient.id).await.unwrap();
    let lines = report_lines(&bundle, &DocumentStyles::default());
    let all = texts(&lines);

    let at = all.iter().position(|t| *t == JOINTS_HEADING).unwrap();
    assert_eq!(
        &all[at + 1..at + 5],
        [
            "- Left Wrist: Swollen, Tender",
            "- Right Wrist: Tender",
            "- Left Knee: Swollen",
            "- Right Knee: Normal",
        ]
    );

    let at = all.iter().position(|t| *t == SCORE_HEADING).unwrap();
    assert_eq!(
        &all[at + 1..],
        [
            "Tender count: 10",
            "Swollen count: 8",
            "ESR/CRP: 25.0",
            "Global assessment: 50.0",
            "Calculated DAS28 score: 5.52",
        ]
    );
}

#[tokio::test]
async fn long_joint_list_spills_onto_further_pages() {
    let (store, patient) = store_with_patient().await;
    let observations: Vec<_> = (0..120)
        .map(|i| NewJointObservation {
            joint_name: format!("Joint {i}"),
            is_swollen: i % 2 == 0,
            is_tender: i % 3 == 0,
        })
        .collect();
    store
        .append_joint_observations(patient.id, observations)
        .await
        .unwrap();

    let styles = DocumentStyles::default();
    let bundle = aggregate(&store, patient.id).await.unwrap();
    let expected = report_lines(&bundle, &styles);
    let pages = layout_report(&bundle, &styles);
    assert!(pages.len() > 1, "expected several pages, got {}", pages.len());

    let placed: Vec<&str> = pages
        .iter()
        .flat_map(|p| p.lines.iter().map(|l| l.text.as_str()))
        .collect();
    assert_eq!(placed, texts(&expected), "every line placed once, in order");

    for page in &pages {
        assert!(!page.is_empty());
        assert_eq!(page.lines[0].top, styles.margin_top);
        for line in &page.lines {
            assert!(line.top >= styles.margin_top);
            assert!(line.bottom <= styles.content_bottom());
        }
    }

    let pdf = render(&bundle, ExportFormat::Pdf, &styles).unwrap();
    assert_eq!(pdf.pages, pages.len());

    let docx = render(&bundle, ExportFormat::Docx, &styles).unwrap();
    assert!(docx.bytes.starts_with(b"PK"));
    assert!(docx.file_name.ends_with("_Report.docx"));
    assert_eq!(docx.pages, pages.len());

    let parsed = docx_rs::read_docx(&docx.bytes).unwrap();
    let breaks = parsed
        .document
        .children
        .iter()
        .filter(|child| {
            matches!(child, docx_rs::DocumentChild::Paragraph(p)
                if p.property.page_break_before == Some(true))
        })
        .count();
    assert_eq!(breaks, pages.len() - 1);
}

#[tokio::test]
async fn unknown_patient_is_not_found() {
    let store = MemoryStore::new();
    let missing = Uuid::new_v4();

    let err = aggregate(&store, missing).await.unwrap_err();
    assert!(matches!(err, AggregateError::PatientNotFound(id) if id == missing));

    let err = build_report(&store, missing, ExportFormat::Pdf, &DocumentStyles::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ExportError::Aggregate(AggregateError::PatientNotFound(_))
    ));
}

use arthra_core::models::score::{Das28Inputs, ScoreResult};
use arthra_storage::state::{decode, encode};
use uuid::Uuid;

fn result(sequence: u64, esr_value: f64, global_assessment: f64, score: f64) -> ScoreResult {
    ScoreResult {
        id: Uuid::new_v4(),
        patient_id: Uuid::nil(),
        inputs: Das28Inputs {
            tender_count: (sequence % 29) as i64,
            swollen_count: (sequence % 17) as i64,
            esr_value,
            global_assessment,
        },
        score,
        sequence,
        created_at: jiff::Timestamp::UNIX_EPOCH,
    }
}

/// Deterministic spread of finite doubles across several binades.
fn doubles(count: usize) -> Vec<f64> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..count)
        .map(|i| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let exponent = 1013 + (i as u64 % 24);
            f64::from_bits((exponent << 52) | (state >> 12))
        })
        .collect()
}

#[test]
fn stored_scores_keep_exact_float_bits() {
    let values = doubles(20_000);
    let mut results: Vec<ScoreResult> = values
        .chunks(3)
        .filter(|c| c.len() == 3)
        .enumerate()
        .map(|(i, c)| result(i as u64 + 1, c[0], c[1], c[2]))
        .collect();
    results.push(result(0, 502.077_231_695_085_23, 50.0, 5.515_054_543_652_91));

    let bytes = encode(&results).unwrap();
    let decoded: Vec<ScoreResult> = decode(&bytes).unwrap();

    assert_eq!(decoded.len(), results.len());
    for (before, after) in results.iter().zip(&decoded) {
        assert_eq!(before.inputs.esr_value.to_bits(), after.inputs.esr_value.to_bits());
        assert_eq!(
            before.inputs.global_assessment.to_bits(),
            after.inputs.global_assessment.to_bits()
        );
        assert_eq!(before.score.to_bits(), after.score.to_bits());
        assert_eq!(before.sequence, after.sequence);
    }
}

#[test]
fn decode_rejects_malformed_documents() {
    let err = decode::<Vec<ScoreResult>>(b"[{\"score\": 1.0}]").unwrap_err();
    assert!(matches!(err, arthra_storage::error::StorageError::Serialization(_)));
}

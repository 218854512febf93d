use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use arthra_core::models::joint::JointObservation;

/// The 28 joints assessed for DAS28: shoulders, elbows, wrists, MCP 1–5,
/// PIP 1–5 (PIP 1 being the thumb IP) and knees, left then right.
pub const DAS28_JOINTS: [&str; 28] = [
    "Left Shoulder",
    "Right Shoulder",
    "Left Elbow",
    "Right Elbow",
    "Left Wrist",
    "Right Wrist",
    "Left MCP 1",
    "Right MCP 1",
    "Left MCP 2",
    "Right MCP 2",
    "Left MCP 3",
    "Right MCP 3",
    "Left MCP 4",
    "Right MCP 4",
    "Left MCP 5",
    "Right MCP 5",
    "Left PIP 1",
    "Right PIP 1",
    "Left PIP 2",
    "Right PIP 2",
    "Left PIP 3",
    "Right PIP 3",
    "Left PIP 4",
    "Right PIP 4",
    "Left PIP 5",
    "Right PIP 5",
    "Left Knee",
    "Right Knee",
];

pub fn is_das28_joint(name: &str) -> bool {
    DAS28_JOINTS.iter().any(|j| j.eq_ignore_ascii_case(name.trim()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JointCounts {
    pub tender_count: i64,
    pub swollen_count: i64,
}

/// Derive tender/swollen counts from recorded observations.
///
/// Only DAS28 joints are counted, and for a joint observed more than once the
/// observation with the highest sequence wins.
pub fn joint_counts(observations: &[JointObservation]) -> JointCounts {
    let mut latest: HashMap<String, &JointObservation> = HashMap::new();
    for obs in observations.iter().filter(|o| is_das28_joint(&o.joint_name)) {
        let key = obs.joint_name.trim().to_ascii_lowercase();
        match latest.get(&key) {
            Some(seen) if seen.sequence > obs.sequence => {}
            _ => {
                latest.insert(key, obs);
            }
        }
    }

    latest.values().fold(JointCounts::default(), |mut acc, obs| {
        if obs.is_tender {
            acc.tender_count += 1;
        }
        if obs.is_swollen {
            acc.swollen_count += 1;
        }
        acc
    })
}

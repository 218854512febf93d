use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JointObservation {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub joint_name: String,
    pub is_swollen: bool,
    pub is_tender: bool,
    pub sequence: u64,
    pub created_at: jiff::Timestamp,
}

impl JointObservation {
    /// `Swollen`, `Tender` or `Swollen, Tender`; `Normal` when neither flag is set.
    pub fn status(&self) -> String {
        let mut flags = Vec::with_capacity(2);
        if self.is_swollen {
            flags.push("Swollen");
        }
        if self.is_tender {
            flags.push("Tender");
        }
        if flags.is_empty() {
            "Normal".to_string()
        } else {
            flags.join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewJointObservation {
    pub joint_name: String,
    #[serde(default)]
    pub is_swollen: bool,
    #[serde(default)]
    pub is_tender: bool,
}

impl NewJointObservation {
    pub fn into_observation(
        self,
        patient_id: Uuid,
        sequence: u64,
        created_at: jiff::Timestamp,
    ) -> JointObservation {
        JointObservation {
            id: Uuid::new_v4(),
            patient_id,
            joint_name: self.joint_name,
            is_swollen: self.is_swollen,
            is_tender: self.is_tender,
            sequence,
            created_at,
        }
    }
}

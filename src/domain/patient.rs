//! What a doctor sees after looking up a patient id.

use serde::{Deserialize, Serialize};

use super::ids;
use super::profile::PatientProfile;
use super::record::MedicalRecord;
use super::session::PatientId;

/// Profile subset shared with doctors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSummary {
    pub date_of_birth: String,
    pub gender: String,
    pub medical_conditions: String,
    pub allergies: String,
}

impl From<&PatientProfile> for ProfileSummary {
    fn from(profile: &PatientProfile) -> Self {
        Self {
            date_of_birth: profile.date_of_birth.clone(),
            gender: profile.gender.clone(),
            medical_conditions: profile.medical_conditions.clone(),
            allergies: profile.allergies.clone(),
        }
    }
}

/// A patient as composed for the doctor dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSnapshot {
    pub id: String,
    pub patient_id: PatientId,
    pub name: String,
    pub records: Vec<MedicalRecord>,
    #[serde(default)]
    pub profile: ProfileSummary,
}

impl PatientSnapshot {
    /// Compose a snapshot; the display name comes from the id suffix.
    #[must_use]
    pub fn compose(
        patient_id: PatientId,
        records: Vec<MedicalRecord>,
        profile: Option<&PatientProfile>,
    ) -> Self {
        Self {
            id: ids::uuid_v4(),
            name: format!("Patient {}", patient_id.suffix()),
            patient_id,
            records,
            profile: profile.map(ProfileSummary::from).unwrap_or_default(),
        }
    }
}

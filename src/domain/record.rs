//! Medical record metadata.
//!
//! A record only describes an uploaded document; the file itself never
//! leaves the user's machine and only its name is kept.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids;
use super::validation::ValidationError;

/// Kind of document a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    #[default]
    Prescription,
    LabResult,
    DoctorNote,
    PersonalInfo,
}

impl RecordType {
    /// All kinds, in the order the upload form cycles through them.
    pub const ALL: [RecordType; 4] = [
        Self::Prescription,
        Self::LabResult,
        Self::DoctorNote,
        Self::PersonalInfo,
    ];

    /// Human-readable label used in lists and the timeline.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prescription => "Prescription",
            Self::LabResult => "Lab Result",
            Self::DoctorNote => "Doctor's Notes",
            Self::PersonalInfo => "Personal Info",
        }
    }

    /// Next kind in form order (wraps).
    #[must_use]
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous kind in form order (wraps).
    #[must_use]
    pub fn prev(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: RecordType,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Date as entered (`YYYY-MM-DD`).
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl MedicalRecord {
    /// Case-insensitive substring match over the searchable fields.
    ///
    /// A blank term matches everything.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        if term.trim().is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        let hit = |field: &str| field.to_lowercase().contains(&needle);

        hit(self.title.as_str())
            || self.doctor.as_deref().is_some_and(hit)
            || self.details.as_deref().is_some_and(hit)
            || self.file_name.as_deref().is_some_and(hit)
    }

    /// Parsed date, if the stored string is a calendar date.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Upload form contents before they become a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub kind: RecordType,
    pub title: String,
    pub date: String,
    pub doctor: String,
    pub details: String,
    /// Name of the attached file; `None` until one is picked.
    pub file_name: Option<String>,
}

impl RecordDraft {
    /// Title, date and an attached file are required.
    ///
    /// # Errors
    /// Returns `MissingRecordFields` if any is missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let has_file = self.file_name.as_deref().is_some_and(|f| !f.is_empty());
        if self.title.is_empty() || self.date.is_empty() || !has_file {
            return Err(ValidationError::MissingRecordFields);
        }
        Ok(())
    }

    /// Build the stored record; blank optional fields are dropped.
    ///
    /// # Errors
    /// Returns the validation failure, if any.
    pub fn into_record(self) -> Result<MedicalRecord, ValidationError> {
        self.validate()?;
        let non_blank = |s: String| (!s.is_empty()).then_some(s);

        Ok(MedicalRecord {
            id: ids::uuid_v4(),
            kind: self.kind,
            title: self.title,
            file_name: self.file_name,
            date: self.date,
            doctor: non_blank(self.doctor),
            details: non_blank(self.details),
        })
    }
}

/// Records newest-first by date; undated entries go last, ties keep order.
#[must_use]
pub fn timeline(records: &[MedicalRecord]) -> Vec<MedicalRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| match (a.parsed_date(), b.parsed_date()) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted
}

/// Records seeded on the first patient dashboard visit.
#[must_use]
pub fn sample_records() -> Vec<MedicalRecord> {
    vec![
        MedicalRecord {
            id: "1".to_string(),
            kind: RecordType::Prescription,
            title: "Amoxicillin Prescription".to_string(),
            file_name: Some("amoxicillin_prescription.pdf".to_string()),
            date: "2023-04-15".to_string(),
            doctor: Some("Dr. Sarah Johnson".to_string()),
            details: Some("500mg, three times daily for 7 days".to_string()),
        },
        MedicalRecord {
            id: "2".to_string(),
            kind: RecordType::LabResult,
            title: "Blood Test Results".to_string(),
            file_name: Some("blood_test_apr2023.pdf".to_string()),
            date: "2023-04-10".to_string(),
            doctor: Some("Dr. David Chen".to_string()),
            details: Some("Complete blood count and lipid panel".to_string()),
        },
        MedicalRecord {
            id: "3".to_string(),
            kind: RecordType::DoctorNote,
            title: "Annual Checkup Notes".to_string(),
            file_name: Some("checkup_notes.pdf".to_string()),
            date: "2023-03-22".to_string(),
            doctor: Some("Dr. Sarah Johnson".to_string()),
            details: Some("General examination, follow-up in 6 months".to_string()),
        },
    ]
}

//! Session identity: the single logged-in user and their role.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids;

/// Prefix every synthetic patient id carries.
pub const PATIENT_ID_PREFIX: &str = "PID-";

/// Which dashboard a session may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    /// Route a session of this role lands on after login.
    #[must_use]
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Self::Patient => "/patient-dashboard",
            Self::Doctor => "/doctor-dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patient => write!(f, "patient"),
            Self::Doctor => write!(f, "doctor"),
        }
    }
}

/// Synthetic patient identifier of the form `PID-NNNNN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(String);

impl PatientId {
    /// Generate a fresh id with a random five-digit suffix.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{PATIENT_ID_PREFIX}{}", ids::five_digits()))
    }

    /// Accept any string carrying the `PID-` prefix.
    ///
    /// The suffix is not checked: lookups only ever matched on the prefix.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.starts_with(PATIENT_ID_PREFIX)
            .then(|| Self(raw.to_string()))
    }

    /// Everything after `PID-`.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.0[PATIENT_ID_PREFIX.len()..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The persisted session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<PatientId>,
}

impl User {
    /// Fabricate a session; only patients receive a patient id.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: ids::uuid_v4(),
            email: email.into(),
            name: name.into(),
            role,
            patient_id: (role == Role::Patient).then(PatientId::generate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_id_format() {
        let id = PatientId::generate();
        assert!(id.as_str().starts_with("PID-"));
        assert_eq!(id.suffix().len(), 5);
        assert!(id.suffix().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_patient_id_parse() {
        assert_eq!(PatientId::parse("PID-12345").unwrap().suffix(), "12345");
        assert_eq!(PatientId::parse("PID-").unwrap().suffix(), "");
        assert!(PatientId::parse("pid-12345").is_none());
        assert!(PatientId::parse("12345").is_none());
    }

    #[test]
    fn test_only_patients_get_ids() {
        assert!(User::new("a@b.co", "a", Role::Patient).patient_id.is_some());
        assert!(User::new("a@b.co", "a", Role::Doctor).patient_id.is_none());
    }

    #[test]
    fn test_user_json_layout() {
        let mut user = User::new("jane@clinic.org", "jane", Role::Patient);
        user.id = "u1".to_string();
        user.patient_id = PatientId::parse("PID-10001");
        let json = serde_json::to_string(&user).expect("Should serialize");
        assert_eq!(
            json,
            r#"{"id":"u1","email":"jane@clinic.org","name":"jane","role":"patient","patientId":"PID-10001"}"#
        );

        let doctor: User = serde_json::from_str(
            r#"{"id":"u2","email":"d@x.io","name":"d","role":"doctor"}"#,
        )
        .expect("Should parse");
        assert_eq!(doctor.role, Role::Doctor);
        assert!(doctor.patient_id.is_none());
    }
}

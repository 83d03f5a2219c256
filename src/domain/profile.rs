//! Patient profile: demographic and medical-history fields.

use serde::{Deserialize, Serialize};

use super::session::User;

/// The single persisted patient profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientProfile {
    pub full_name: String,
    /// Fixed at account creation; not editable from the profile form.
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub emergency_contact: String,
    pub medical_conditions: String,
    pub allergies: String,
}

/// Editable profile fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FullName,
    Email,
    Phone,
    DateOfBirth,
    Gender,
    Address,
    EmergencyContact,
    MedicalConditions,
    Allergies,
}

impl ProfileField {
    pub const ALL: [ProfileField; 9] = [
        Self::FullName,
        Self::Email,
        Self::Phone,
        Self::DateOfBirth,
        Self::Gender,
        Self::Address,
        Self::EmergencyContact,
        Self::MedicalConditions,
        Self::Allergies,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::DateOfBirth => "Date of Birth",
            Self::Gender => "Gender",
            Self::Address => "Address",
            Self::EmergencyContact => "Emergency Contact",
            Self::MedicalConditions => "Medical Conditions",
            Self::Allergies => "Allergies",
        }
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Email)
    }
}

impl PatientProfile {
    /// Defaults for a user who has never saved a profile.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self {
            full_name: user.name.clone(),
            email: user.email.clone(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FullName => &self.full_name,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::DateOfBirth => &self.date_of_birth,
            ProfileField::Gender => &self.gender,
            ProfileField::Address => &self.address,
            ProfileField::EmergencyContact => &self.emergency_contact,
            ProfileField::MedicalConditions => &self.medical_conditions,
            ProfileField::Allergies => &self.allergies,
        }
    }

    /// Mutable access to an editable field; `None` for read-only ones.
    pub fn field_mut(&mut self, field: ProfileField) -> Option<&mut String> {
        match field {
            ProfileField::FullName => Some(&mut self.full_name),
            ProfileField::Email => None,
            ProfileField::Phone => Some(&mut self.phone),
            ProfileField::DateOfBirth => Some(&mut self.date_of_birth),
            ProfileField::Gender => Some(&mut self.gender),
            ProfileField::Address => Some(&mut self.address),
            ProfileField::EmergencyContact => Some(&mut self.emergency_contact),
            ProfileField::MedicalConditions => Some(&mut self.medical_conditions),
            ProfileField::Allergies => Some(&mut self.allergies),
        }
    }
}

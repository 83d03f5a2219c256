//! Contact page message form.

use super::validation::is_valid_email;

/// A message typed into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Per-field errors; every field is checked on each submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl ContactErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }
}

impl ContactMessage {
    /// # Errors
    /// Returns every failing field at once.
    pub fn validate(&self) -> Result<(), ContactErrors> {
        let errors = ContactErrors {
            name: self.name.is_empty().then_some("Name is required"),
            email: if self.email.is_empty() {
                Some("Email is required")
            } else if !is_valid_email(&self.email) {
                Some("Please enter a valid email")
            } else {
                None
            },
            message: self.message.is_empty().then_some("Message is required"),
        };

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

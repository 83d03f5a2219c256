//! Form input validation for login and registration.
//!
//! Checks run in a fixed order and stop at the first failure, so the user
//! only ever sees one message per submit.

use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

/// Minimum password length (in characters).
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum display name length on registration (in characters).
pub const MIN_NAME_LEN: usize = 2;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

/// User-facing validation failures.
///
/// The `Display` text is shown verbatim in the notification area.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter both email and password")]
    MissingCredentials,

    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Name must be at least 2 characters long")]
    NameTooShort,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("Please fill in all required fields")]
    MissingRecordFields,

    #[error("Please enter a patient ID")]
    EmptyPatientId,
}

/// `local@domain.tld` with no whitespace and a single `@`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Valid regex"))
        .is_match(email)
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ValidationError::PasswordTooShort)
    }
}

/// Login form contents.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: Zeroizing<String>,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Presence, then email shape, then password length.
    ///
    /// # Errors
    /// Returns the first failing check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        check_email(&self.email)?;
        check_password(&self.password)
    }

    /// Display name derived from the email local part.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or_default()
    }
}

/// Registration form contents.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub credentials: Credentials,
}

impl Registration {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            credentials: Credentials::new(email, password),
        }
    }

    /// Presence, then name length, then email shape, then password length.
    ///
    /// # Errors
    /// Returns the first failing check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let creds = &self.credentials;
        if self.name.is_empty() || creds.email.is_empty() || creds.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if self.name.chars().count() < MIN_NAME_LEN {
            return Err(ValidationError::NameTooShort);
        }
        check_email(&creds.email)?;
        check_password(&creds.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("jane@clinic.org"));
        assert!(is_valid_email("a.b+c@sub.domain.io"));
        assert!(!is_valid_email("jane.clinic.org"));
        assert!(!is_valid_email("jane@clinic"));
        assert!(!is_valid_email("jane@@clinic.org"));
        assert!(!is_valid_email("ja ne@clinic.org"));
        assert!(!is_valid_email("@clinic.org"));
        assert!(!is_valid_email("jane@.org"));
    }

    #[test]
    fn test_login_check_order() {
        assert_eq!(
            Credentials::new("", "secret1").validate(),
            Err(ValidationError::MissingCredentials)
        );
        assert_eq!(
            Credentials::new("bad", "x").validate(),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            Credentials::new("jane@clinic.org", "12345").validate(),
            Err(ValidationError::PasswordTooShort)
        );
        assert!(Credentials::new("jane@clinic.org", "123456").validate().is_ok());
    }

    #[test]
    fn test_registration_check_order() {
        assert_eq!(
            Registration::new("", "jane@clinic.org", "secret1").validate(),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            Registration::new("J", "bad", "x").validate(),
            Err(ValidationError::NameTooShort)
        );
        assert_eq!(
            Registration::new("Jo", "bad", "x").validate(),
            Err(ValidationError::InvalidEmail)
        );
        assert!(Registration::new("Jo", "jo@clinic.org", "secret").validate().is_ok());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Credentials::new("jane.doe@clinic.org", "x").display_name(), "jane.doe");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters long"
        );
        assert_eq!(
            ValidationError::NameTooShort.to_string(),
            "Name must be at least 2 characters long"
        );
    }
}

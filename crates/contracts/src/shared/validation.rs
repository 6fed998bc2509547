//! Field-level form validation shared by the console and the server.
//!
//! Forms implement [`Validate`] with a [`Validator`] chain. The console runs it
//! before submitting and the server runs it again before writing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

/// First message reported for `field`, if any
pub fn message_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}

/// Collects at most one error per field, in rule order.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &str, message: &str) {
        if self.errors.iter().any(|e| e.field == field) {
            return;
        }
        self.errors.push(FieldError::new(field, message));
    }

    /// Generic rule: reports `message` when `ok` is false
    pub fn check(mut self, field: &str, ok: bool, message: &str) -> Self {
        if !ok {
            self.push(field, message);
        }
        self
    }

    pub fn required(self, field: &str, value: &str, message: &str) -> Self {
        self.check(field, !value.trim().is_empty(), message)
    }

    pub fn required_value<T>(self, field: &str, value: &Option<T>, message: &str) -> Self {
        self.check(field, value.is_some(), message)
    }

    pub fn max_len(self, field: &str, value: &str, max: usize, message: &str) -> Self {
        self.check(field, value.trim().chars().count() <= max, message)
    }

    /// Optional e-mail: blank passes, anything else must look like an address
    pub fn email(self, field: &str, value: &str, message: &str) -> Self {
        let value = value.trim();
        self.check(field, value.is_empty() || is_email(value), message)
    }

    /// Inclusive range check; a missing value is left to `required_value`
    pub fn range<T: PartialOrd>(
        self,
        field: &str,
        value: Option<T>,
        min: T,
        max: T,
        message: &str,
    ) -> Self {
        let ok = match value {
            Some(v) => v >= min && v <= max,
            None => true,
        };
        self.check(field, ok, message)
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// `local@domain.tld` with no whitespace and a dot inside the domain
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Uppercase latin letters, digits and `_`, as used by role and payment codes
pub fn is_code(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Blank input becomes `None`, anything else is trimmed
pub fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_error_per_field() {
        let errors = Validator::new()
            .required("name", "", "Name is required")
            .max_len("name", "", 3, "Too long")
            .required("code", "X", "Code is required")
            .finish()
            .unwrap_err();

        assert_eq!(errors, vec![FieldError::new("name", "Name is required")]);
        assert_eq!(message_for(&errors, "name"), Some("Name is required"));
        assert_eq!(message_for(&errors, "code"), None);
    }

    #[test]
    fn range_and_required_value() {
        let result = Validator::new()
            .required_value::<u8>("decimals", &None, "Decimals are required")
            .range("decimals", None::<u8>, 0, 36, "0..36")
            .range("precision", Some(9u8), 0, 8, "Precision must be 0..8")
            .finish();

        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(message_for(&errors, "decimals"), Some("Decimals are required"));
        assert_eq!(message_for(&errors, "precision"), Some("Precision must be 0..8"));

        assert!(Validator::new()
            .range("fee", Some(0.5f64), 0.0, 1.0, "bad")
            .finish()
            .is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("ops@example.com"));
        assert!(!is_email("ops@example"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("ops example@x.io"));
        assert!(!is_email("a@b@c.io"));

        assert!(Validator::new().email("email", "  ", "bad").finish().is_ok());
        assert!(Validator::new().email("email", "nope", "bad").finish().is_err());
    }

    #[test]
    fn code_shape() {
        assert!(is_code("ADMIN"));
        assert!(is_code("BANK_CARD_2"));
        assert!(!is_code("admin"));
        assert!(!is_code(""));
        assert_eq!(non_blank("  x "), Some("x".to_string()));
        assert_eq!(non_blank("   "), None);
    }
}

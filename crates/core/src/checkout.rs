//! Checkout form validation.
//!
//! Checkout is mocked: nothing is charged or shipped. The form is still
//! validated field by field so the shopper sees every problem at once.

use serde::{Deserialize, Serialize};

use crate::types::Email;

const MAX_NAME: usize = 100;
const MAX_ADDRESS: usize = 200;
const MAX_CITY: usize = 100;
const POSTAL_CODE_LEN: std::ops::RangeInclusive<usize> = 3..=12;

/// Raw checkout form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
}

/// Validated shipping details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: Email,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// A problem with one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl CheckoutForm {
    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns all field errors, in form order, if any field is invalid.
    pub fn validate(&self) -> Result<ShippingDetails, Vec<FieldError>> {
        let mut errors = Vec::new();

        let full_name = required_text(&mut errors, "full_name", "Full name", &self.full_name, MAX_NAME);

        let email = match Email::parse(&self.email) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.push(FieldError::new("email", capitalize_first(&e.to_string())));
                None
            }
        };

        let address = required_text(&mut errors, "address", "Address", &self.address, MAX_ADDRESS);
        let city = required_text(&mut errors, "city", "City", &self.city, MAX_CITY);
        let postal_code = postal_code(&mut errors, &self.postal_code);

        match (full_name, email, address, city, postal_code) {
            (Some(full_name), Some(email), Some(address), Some(city), Some(postal_code))
                if errors.is_empty() =>
            {
                Ok(ShippingDetails {
                    full_name,
                    email,
                    address,
                    city,
                    postal_code,
                })
            }
            _ => Err(errors),
        }
    }
}

fn required_text(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    label: &str,
    value: &str,
    max: usize,
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
        return None;
    }
    if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("{label} must be at most {max} characters"),
        ));
        return None;
    }
    Some(value.to_owned())
}

fn postal_code(errors: &mut Vec<FieldError>, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.push(FieldError::new("postal_code", "Postal code is required"));
        return None;
    }
    let well_formed = POSTAL_CODE_LEN.contains(&value.chars().count())
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-');
    if !well_formed {
        errors.push(FieldError::new(
            "postal_code",
            "Postal code must be 3-12 letters, digits, spaces or dashes",
        ));
        return None;
    }
    Some(value.to_uppercase())
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            full_name: "  Ada Lovelace ".to_string(),
            email: "ada@example.com".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            postal_code: "sw1a 1aa".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let details = valid_form().validate().unwrap();
        assert_eq!(details.full_name, "Ada Lovelace");
        assert_eq!(details.email.as_str(), "ada@example.com");
        assert_eq!(details.postal_code, "SW1A 1AA");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = CheckoutForm::default().validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["full_name", "email", "address", "city", "postal_code"]);
    }

    #[test]
    fn test_bad_email_message() {
        let form = CheckoutForm {
            email: "ada".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().unwrap().message, "Email must contain a single @ symbol");
    }

    #[test]
    fn test_postal_code_rules() {
        for bad in ["12", "1234567890123", "12#45"] {
            let form = CheckoutForm {
                postal_code: bad.to_string(),
                ..valid_form()
            };
            assert!(form.validate().is_err(), "{bad} should be rejected");
        }

        let form = CheckoutForm {
            postal_code: "90210-1234".to_string(),
            ..valid_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_name_too_long() {
        let form = CheckoutForm {
            full_name: "x".repeat(101),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.first().unwrap().field, "full_name");
    }
}

//! Shipping/contact form and its synchronous validation rules.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use covercraft_core::Email;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("Invalid regex"));
static PINCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{6}$").expect("Invalid regex"));

/// Indian states and union territories accepted by the `state` field.
pub const INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];

/// Fields of the checkout form, used as keys in the per-field error map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Whatsapp,
    Address,
    Pincode,
    City,
    State,
}

/// Per-field validation error messages.
pub type FieldErrors = BTreeMap<FormField, String>;

/// Customer-supplied shipping and contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub pincode: String,
    pub city: String,
    pub state: String,
}

impl CheckoutForm {
    /// Fill the WhatsApp number from the phone number (the "same as phone"
    /// checkbox in the UI).
    pub fn copy_phone_to_whatsapp(&mut self) {
        self.whatsapp = self.phone.clone();
    }

    /// Validate every field against the fixed rule set.
    ///
    /// # Errors
    ///
    /// Returns the full per-field error map; the checkout pipeline makes no
    /// remote call while any field is invalid.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, "Name is required".to_owned());
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert(FormField::Email, "Email is required".to_owned());
        } else if Email::parse(email).is_err() {
            errors.insert(FormField::Email, "Enter a valid email address".to_owned());
        }

        if !PHONE_RE.is_match(self.phone.trim()) {
            errors.insert(
                FormField::Phone,
                "Phone number must be exactly 10 digits".to_owned(),
            );
        }

        if !PHONE_RE.is_match(self.whatsapp.trim()) {
            errors.insert(
                FormField::Whatsapp,
                "WhatsApp number must be exactly 10 digits".to_owned(),
            );
        }

        if self.address.trim().is_empty() {
            errors.insert(FormField::Address, "Address is required".to_owned());
        }

        if !PINCODE_RE.is_match(self.pincode.trim()) {
            errors.insert(
                FormField::Pincode,
                "Pincode must be exactly 6 digits".to_owned(),
            );
        }

        if self.city.trim().is_empty() {
            errors.insert(FormField::City, "City is required".to_owned());
        }

        let state = self.state.trim();
        if state.is_empty() {
            errors.insert(FormField::State, "State is required".to_owned());
        } else if !INDIAN_STATES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(state))
        {
            errors.insert(FormField::State, "Select a valid state".to_owned());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// The address as one line, the shape stored in order metadata.
    #[must_use]
    pub fn full_address(&self) -> String {
        format!(
            "{}, {}, {} - {}",
            self.address.trim(),
            self.city.trim(),
            self.state.trim(),
            self.pincode.trim()
        )
    }

    /// Split the single name field into the first/last pair the order API
    /// stores. Everything after the first word lands in the last name.
    #[must_use]
    pub fn split_name(&self) -> (String, String) {
        let trimmed = self.name.trim();
        match trimmed.split_once(' ') {
            Some((first, rest)) => (first.to_owned(), rest.trim().to_owned()),
            None => (trimmed.to_owned(), String::new()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn valid_form() -> CheckoutForm {
        CheckoutForm {
            name: "Asha Verma".to_owned(),
            email: "asha@example.com".to_owned(),
            phone: "9876543210".to_owned(),
            whatsapp: "9876543210".to_owned(),
            address: "14 MG Road".to_owned(),
            pincode: "560001".to_owned(),
            city: "Bengaluru".to_owned(),
            state: "Karnataka".to_owned(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert_eq!(valid_form().validate(), Ok(()));
    }

    #[test]
    fn test_short_phone_flags_only_phone() {
        let mut form = valid_form();
        form.phone = "12345".to_owned();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&FormField::Phone));
    }

    #[test]
    fn test_phone_rejects_non_digits() {
        let mut form = valid_form();
        form.phone = "98765x3210".to_owned();
        assert!(form.validate().unwrap_err().contains_key(&FormField::Phone));
    }

    #[test]
    fn test_pincode_must_be_six_digits() {
        let mut form = valid_form();
        form.pincode = "5600".to_owned();
        assert!(
            form.validate()
                .unwrap_err()
                .contains_key(&FormField::Pincode)
        );
    }

    #[test]
    fn test_invalid_email_shape() {
        let mut form = valid_form();
        form.email = "not-an-email".to_owned();
        assert!(form.validate().unwrap_err().contains_key(&FormField::Email));
    }

    #[test]
    fn test_unknown_state_rejected() {
        let mut form = valid_form();
        form.state = "Atlantis".to_owned();
        assert!(form.validate().unwrap_err().contains_key(&FormField::State));
    }

    #[test]
    fn test_empty_form_flags_every_field() {
        let errors = CheckoutForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 8);
    }

    #[test]
    fn test_copy_phone_to_whatsapp() {
        let mut form = valid_form();
        form.whatsapp = String::new();
        form.copy_phone_to_whatsapp();
        assert_eq!(form.whatsapp, form.phone);
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_split_name() {
        let mut form = valid_form();
        assert_eq!(
            form.split_name(),
            ("Asha".to_owned(), "Verma".to_owned())
        );
        form.name = "Asha".to_owned();
        assert_eq!(form.split_name(), ("Asha".to_owned(), String::new()));
        form.name = "Asha Kumari Verma".to_owned();
        assert_eq!(
            form.split_name(),
            ("Asha".to_owned(), "Kumari Verma".to_owned())
        );
    }

    #[test]
    fn test_full_address_single_line() {
        assert_eq!(
            valid_form().full_address(),
            "14 MG Road, Bengaluru, Karnataka - 560001"
        );
    }
}

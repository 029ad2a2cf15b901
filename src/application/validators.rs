use validator::ValidateEmail;

use crate::{
    app_error::{AppError, AppResult, FieldError},
    domain::entities::waitlist_entry::NewWaitlistEntry,
};

/// Validates that the input looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.validate_email()
}

/// Checks a submitted waitlist form and turns it into a registry candidate.
///
/// Surrounding whitespace is trimmed from every field. Every failing field is
/// reported, not just the first one.
pub fn validate_waitlist_form(
    email: &str,
    clinic_name: &str,
    clinic_size: &str,
) -> AppResult<NewWaitlistEntry> {
    let email = email.trim();
    let clinic_name = clinic_name.trim();
    let clinic_size = clinic_size.trim();

    let mut errors = Vec::new();
    if !is_valid_email(email) {
        errors.push(FieldError::field(
            "email",
            "Please enter a valid email address",
        ));
    }
    if clinic_name.is_empty() {
        errors.push(FieldError::field("clinicName", "Clinic name is required"));
    }
    if clinic_size.is_empty() {
        errors.push(FieldError::field("clinicSize", "Please select clinic size"));
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(NewWaitlistEntry {
        email: email.to_string(),
        clinic_name: clinic_name.to_string(),
        clinic_size: clinic_size.to_string(),
    })
}

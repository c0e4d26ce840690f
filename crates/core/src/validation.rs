//! Input rules for registration and login.
//!
//! Inputs are normalized before validation: names are trimmed, emails are
//! trimmed and lowercased. Passwords are never altered.

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::wire::{LoginRequest, RegisterRequest};

/// Fallback message when a rule fails without a message of its own.
const INVALID_DATA: &str = "Invalid data";

/// Canonical form of an email address used for storage and lookup.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize and validate a registration request.
pub fn validate_registration(input: RegisterRequest) -> Result<RegisterRequest, CoreError> {
    let normalized = RegisterRequest {
        full_name: input.full_name.trim().to_string(),
        email: normalize_email(&input.email),
        password: input.password,
    };
    normalized
        .validate()
        .map_err(|e| CoreError::Validation(first_message(&e, &["full_name", "email", "password"])))?;
    Ok(normalized)
}

/// Normalize and validate a login request.
///
/// Only presence is checked; a malformed email simply fails to match a user.
pub fn validate_login(input: LoginRequest) -> Result<LoginRequest, CoreError> {
    let normalized = LoginRequest {
        email: normalize_email(&input.email),
        password: input.password,
    };
    normalized
        .validate()
        .map_err(|e| CoreError::Validation(first_message(&e, &["email", "password"])))?;
    Ok(normalized)
}

/// Pick the message of the first failing field, in form order.
fn first_message(errors: &ValidationErrors, order: &[&str]) -> String {
    let fields = errors.field_errors();
    order
        .iter()
        .filter_map(|name| fields.get(*name))
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| INVALID_DATA.to_string())
}

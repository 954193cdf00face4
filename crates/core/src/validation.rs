//! Credential field rules and conversion of `validator` failures into
//! [`CoreError::Validation`].
//!
//! Request structs in the API crate derive [`validator::Validate`] with
//! `length(max = 128)` on every credential field. [`validate_credential`]
//! repeats that bound and also rejects NUL characters, which PostgreSQL
//! cannot store in `TEXT`/`VARCHAR` columns.

use validator::{ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// Maximum length, in characters, of a username or password.
pub const MAX_CREDENTIAL_LEN: usize = 128;

/// Check a single credential field. Empty strings are allowed.
pub fn validate_credential(field: &str, value: &str) -> Result<(), CoreError> {
    if value.chars().count() > MAX_CREDENTIAL_LEN {
        return Err(CoreError::Validation(format!(
            "{field}: must be at most {MAX_CREDENTIAL_LEN} characters"
        )));
    }
    if value.contains('\0') {
        return Err(CoreError::Validation(format!(
            "{field}: must not contain NUL characters"
        )));
    }
    Ok(())
}

/// Flatten `validator` output into a single, deterministic message.
///
/// Fields are sorted by name so the same input always yields the same text,
/// e.g. `"password: must be at most 128 characters; username: ..."`.
pub fn into_core_error(errors: &ValidationErrors) -> CoreError {
    let mut parts: Vec<String> = errors
        .errors()
        .iter()
        .flat_map(|(field, kind)| describe(&field.to_string(), kind))
        .collect();
    parts.sort();

    if parts.is_empty() {
        parts.push("request body is invalid".to_string());
    }
    CoreError::Validation(parts.join("; "))
}

fn describe(field: &str, kind: &ValidationErrorsKind) -> Vec<String> {
    match kind {
        ValidationErrorsKind::Field(errors) => errors
            .iter()
            .map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map_or_else(|| err.code.to_string(), ToString::to_string);
                format!("{field}: {message}")
            })
            .collect(),
        ValidationErrorsKind::Struct(inner) => into_messages(field, inner),
        ValidationErrorsKind::List(items) => items
            .iter()
            .flat_map(|(index, inner)| into_messages(&format!("{field}[{index}]"), inner))
            .collect(),
    }
}

fn into_messages(prefix: &str, errors: &ValidationErrors) -> Vec<String> {
    errors
        .errors()
        .iter()
        .flat_map(|(field, kind)| describe(&format!("{prefix}.{field}"), kind))
        .collect()
}

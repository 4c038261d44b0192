//! Input validation helpers built on the `validator` crate.
//!
//! DTOs derive [`Validate`]; [`validate`] runs the derived checks and turns
//! the result into [`CoreError::Validation`] with one [`FieldError`] per
//! failed rule.

use std::borrow::Cow;

use validator::{Validate, ValidateUrl, ValidationError, ValidationErrors};

use crate::error::{CoreError, FieldError};
use crate::localized::LocalizedText;
use crate::types::DbId;

/// Run the derived checks on `input`.
pub fn validate<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(into_core_error)
}

/// Flatten `validator` errors into field errors, ordered by path.
pub fn into_core_error(errors: ValidationErrors) -> CoreError {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(path, errs)| {
            let path = path.to_string();
            errs.iter().map(move |err| FieldError::new(path.clone(), message_for(err)))
        })
        .collect();
    fields.sort_by(|a, b| a.path.cmp(&b.path));
    CoreError::Validation(fields)
}

fn message_for(err: &ValidationError) -> String {
    match &err.message {
        Some(message) => message.to_string(),
        None => format!("Invalid value ({})", err.code),
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Parse a client-supplied identifier, reporting failures against `path`.
pub fn parse_id(path: &str, raw: &str) -> Result<DbId, CoreError> {
    DbId::parse_str(raw.trim()).map_err(|_| CoreError::invalid(path, "Invalid uuid"))
}

/// Localized text must carry at least one non-empty translation.
pub fn localized_required(text: &LocalizedText) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(error("required", "At least one translation is required"));
    }
    Ok(())
}

/// Every entry must be an absolute http(s) URL.
pub fn url_list(urls: &[String]) -> Result<(), ValidationError> {
    if urls.iter().all(|url| is_http_url(url)) {
        Ok(())
    } else {
        Err(error("url", "Every image must be a valid URL"))
    }
}

/// Image URLs may be absolute or site-relative (`/placeholder.svg`).
pub fn image_url(url: &str) -> Result<(), ValidationError> {
    if is_http_url(url) || (url.starts_with('/') && !url.starts_with("//")) {
        Ok(())
    } else {
        Err(error("url", "Must be a valid URL"))
    }
}

fn is_http_url(url: &str) -> bool {
    (url.starts_with("http://") || url.starts_with("https://")) && url.validate_url()
}

//! Shared query parameter types for API handlers.

use ambassadors_core::error::CoreError;
use ambassadors_core::locale;
use serde::Deserialize;

/// Optional `?locale=` used by list endpoints to sort by localized name.
#[derive(Debug, Default, Deserialize)]
pub struct LocaleParams {
    pub locale: Option<String>,
}

impl LocaleParams {
    /// The requested locale, normalized to a supported one.
    ///
    /// Returns `Ok(None)` when no locale was given and a validation error
    /// when the locale is not supported.
    pub fn resolve(&self) -> Result<Option<&'static str>, CoreError> {
        match self.locale.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => locale::normalize(raw)
                .map(Some)
                .ok_or_else(|| CoreError::invalid("locale", "Unsupported locale")),
        }
    }
}

/// `?projectId=` for the vote status check. A missing value is reported as
/// an invalid id rather than a bare extractor rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdParams {
    #[serde(default)]
    pub project_id: String,
}

//! Supported locales and locale-code normalization.

/// Locale codes the site publishes content in.
pub const SUPPORTED_LOCALES: &[&str] = &[
    "bg", "en", "de", "fr", "es", "it", "pl", "ro", "cs", "sk", "sl", "hr", "sr", "mk", "al", "me",
];

/// Locale used when a request does not name one, and the fallback key for
/// localized text.
pub const DEFAULT_LOCALE: &str = "bg";

/// Normalize a client-provided locale (`"EN"`, `"en-US"`, `"de_AT"`) to one of
/// [`SUPPORTED_LOCALES`]. Returns `None` for anything else.
pub fn normalize(raw: &str) -> Option<&'static str> {
    let primary = raw
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|locale| *locale == primary)
}

/// BCP-47 tag to hand the collator for a site locale.
///
/// The site uses `al` for Albanian and `me` for Montenegrin, neither of which
/// is a language subtag CLDR knows.
pub fn collation_tag(locale: &str) -> &str {
    match locale {
        "al" => "sq",
        "me" => "sr-Latn",
        other => other,
    }
}

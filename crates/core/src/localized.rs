//! Localized text: one field translated into several locales.
//!
//! Stored as a JSON object (`{"bg": "...", "en": "..."}`) and resolved to a
//! single display string with a fixed fallback chain.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use serde::{Deserialize, Serialize};

use crate::locale::{self, DEFAULT_LOCALE};

/// Mapping from locale code to a translated string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, locale: &str) -> Option<&str> {
        self.0
            .get(locale)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, locale: impl Into<String>, value: impl Into<String>) {
        self.0.insert(locale.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|value| value.is_empty())
    }

    /// Resolve to a single string.
    ///
    /// Tries `locale`, then `fallback`, then the first non-empty translation
    /// in locale-code order, and finally returns `""`. An empty translation
    /// never wins the last step, even when it sorts first.
    pub fn resolve(&self, locale: &str, fallback: &str) -> &str {
        self.get(locale)
            .or_else(|| self.get(fallback))
            .or_else(|| self.0.values().map(String::as_str).find(|v| !v.is_empty()))
            .unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Compares strings using the collation rules of a site locale.
///
/// Falls back to code-point order when no collation data exists for the
/// locale.
pub struct LocaleCollator {
    collator: Option<Collator>,
}

impl LocaleCollator {
    pub fn new(locale: &str) -> Self {
        let collator = locale::collation_tag(locale)
            .parse::<Locale>()
            .ok()
            .and_then(|parsed| Collator::try_new(&parsed.into(), CollatorOptions::new()).ok());
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

/// Sort `items` by a localized name resolved to `locale`, falling back to
/// [`DEFAULT_LOCALE`]. The sort is stable.
pub fn sort_by_localized<T, F>(items: &mut [T], locale: &str, name: F)
where
    F: Fn(&T) -> &LocalizedText,
{
    let collator = LocaleCollator::new(locale);
    items.sort_by(|a, b| {
        collator.compare(
            name(a).resolve(locale, DEFAULT_LOCALE),
            name(b).resolve(locale, DEFAULT_LOCALE),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(pairs: &[(&str, &str)]) -> LocalizedText {
        pairs.iter().copied().collect()
    }

    #[test]
    fn resolves_requested_locale() {
        let t = text(&[("en", "A"), ("bg", "B")]);
        assert_eq!(t.resolve("en", "bg"), "A");
    }

    #[test]
    fn falls_back_to_fallback_locale() {
        let t = text(&[("en", "A"), ("bg", "B")]);
        assert_eq!(t.resolve("de", "bg"), "B");
    }

    #[test]
    fn falls_back_to_any_member() {
        let t = text(&[("fr", "C")]);
        assert_eq!(t.resolve("de", "bg"), "C");

        let t = text(&[("cs", ""), ("fr", "C")]);
        assert_eq!(t.resolve("de", "bg"), "C");
    }

    #[test]
    fn empty_map_resolves_to_empty_string() {
        assert_eq!(LocalizedText::new().resolve("de", "bg"), "");
    }

    #[test]
    fn empty_translation_counts_as_missing() {
        let t = text(&[("de", ""), ("bg", "B")]);
        assert_eq!(t.resolve("de", "bg"), "B");
        assert!(text(&[("de", "")]).is_empty());
    }

    #[test]
    fn deserializes_from_json_object() {
        let t: LocalizedText = serde_json::from_str(r#"{"bg":"Проект","en":"Project"}"#).unwrap();
        assert_eq!(t.get("en"), Some("Project"));
        assert_eq!(serde_json::to_value(&t).unwrap()["bg"], "Проект");
    }

    #[test]
    fn sorts_accented_names_by_collation_not_code_points() {
        let mut names = vec![text(&[("fr", "Zoé")]), text(&[("fr", "Émile")])];
        sort_by_localized(&mut names, "fr", |n| n);
        assert_eq!(names[0].resolve("fr", "bg"), "Émile");
        assert_eq!(names[1].resolve("fr", "bg"), "Zoé");
    }

    #[test]
    fn sort_resolves_names_through_fallback() {
        let mut names = vec![
            text(&[("bg", "Борис")]),
            text(&[("en", "Anna"), ("bg", "Анна")]),
        ];
        sort_by_localized(&mut names, "en", |n| n);
        // "Anna" resolves in English; "Борис" only through the fallback.
        assert_eq!(names[0].resolve("en", "bg"), "Anna");
        assert_eq!(names[1].resolve("en", "bg"), "Борис");
    }

    #[test]
    fn bulgarian_collation_orders_cyrillic_before_latin() {
        let mut names = vec![text(&[("bg", "Zack")]), text(&[("bg", "Анна")])];
        sort_by_localized(&mut names, "bg", |n| n);
        assert_eq!(names[0].resolve("bg", "bg"), "Анна");
    }

    #[test]
    fn unknown_collation_locale_uses_code_point_order() {
        let collator = LocaleCollator::new("not a locale!");
        assert_eq!(collator.compare("b", "a"), Ordering::Greater);
    }
}

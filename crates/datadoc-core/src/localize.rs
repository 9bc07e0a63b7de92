//! Localization resolver: fallback-chain string picks and license display
//!
//! The read path of the engine. Given a validated document and a requested
//! language, this module builds the projected view: the best-matching
//! description string, the resolved license display data (with the "or any
//! later version" wrapper for `+`-suffixed codes), and the raw sources
//! markup. Resolution is pure; given identical inputs it always produces
//! identical output.
//!
//! Copyright (c) 2025 Datadoc Team
//! Licensed under the MIT or Apache-2.0 license

use crate::config::{Config, LocaleConfig};
use crate::document::ValidatedDocument;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A parsed license code. The trailing `+` means "this version or any
/// later"; `base` is the registry lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseCode {
    /// The code as written, e.g. `cc-by-4.0+`
    pub code: String,
    /// The code without the `+` suffix, e.g. `cc-by-4.0`
    pub base: String,
    /// True when the code ends in `+`
    pub later_version: bool,
}

impl LicenseCode {
    pub fn parse<C: Into<String>>(code: C) -> Self {
        let code = code.into();
        match code.strip_suffix('+') {
            Some(base) => Self {
                base: base.to_string(),
                later_version: true,
                code,
            },
            None => Self {
                base: code.clone(),
                later_version: false,
                code,
            },
        }
    }
}

/// Language-resolved license display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedLicense {
    /// The code as stored in the document, `+` suffix included
    pub code: String,
    /// Display text, wrapped with the "or later" message when applicable
    pub text: String,
    /// Display URL
    pub url: String,
}

/// The localized projection of a validated document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<LocalizedLicense>,
    /// Wiki-markup source attribution, passed through unresolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<String>,
}

/// Which view of a document a consumer wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangTarget<'a> {
    /// Data for every language: the whole normalized tree
    All,
    /// Data resolved for one language
    Code(&'a str),
}

impl<'a> LangTarget<'a> {
    /// Interpret the `_` sentinel used at the interface boundary as
    /// [`LangTarget::All`].
    pub fn from_code(code: &'a str) -> Self {
        if code == "_" {
            LangTarget::All
        } else {
            LangTarget::Code(code)
        }
    }
}

/// A projected document view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataView {
    /// The normalized tree, language-unresolved
    All(Value),
    /// The single-language projection
    Localized(LocalizedData),
}

/// Resolution order for `lang`: the language itself, then its fallback
/// chain, then the configured ultimate fallback.
fn candidate_codes(lang: &str, locales: &LocaleConfig) -> Vec<String> {
    let mut codes = vec![lang.to_string()];
    codes.extend(locales.chain_for(lang));
    codes
}

/// Pick the best string from a canonical localized-string map for `lang`.
///
/// Falls back along the configured chain; when no candidate code is present
/// the alphabetically-first entry is returned as a deterministic last
/// resort. Never errors: `None` only for an empty map.
pub fn pick_localized_string<'a>(
    map: &'a Map<String, Value>,
    lang: &str,
    locales: &LocaleConfig,
) -> Option<&'a str> {
    for code in candidate_codes(lang, locales) {
        if let Some(found) = map.get(&code).and_then(Value::as_str) {
            return Some(found);
        }
    }
    let first = map
        .iter()
        .filter(|(_, v)| v.is_string())
        .min_by(|a, b| a.0.cmp(b.0));
    if let Some((code, value)) = first {
        log::debug!(
            "No fallback for '{}' matched; using alphabetically-first entry '{}'",
            lang,
            code
        );
        return value.as_str();
    }
    None
}

/// [`pick_localized_string`] for plain string catalogs (license registry
/// entries, message templates).
fn pick_from_catalog<'a>(
    map: &'a BTreeMap<String, String>,
    lang: &str,
    locales: &LocaleConfig,
) -> Option<&'a str> {
    for code in candidate_codes(lang, locales) {
        if let Some(found) = map.get(&code) {
            return Some(found.as_str());
        }
    }
    map.iter().next().map(|(_, v)| v.as_str())
}

/// Resolve the license display data for a validated code.
///
/// Returns `None` when the base code has no registry entry; that is a
/// configuration defect (the allowed list and the registry disagree), so it
/// is logged rather than silently ignored.
fn resolve_license(code: &str, lang: &str, config: &Config) -> Option<LocalizedLicense> {
    let parsed = LicenseCode::parse(code);
    let entry = match config.licenses.get(&parsed.base) {
        Some(entry) => entry,
        None => {
            log::warn!(
                "License '{}' passed validation but has no registry entry for '{}'",
                code,
                parsed.base
            );
            return None;
        }
    };
    let text = pick_from_catalog(&entry.text, lang, &config.locales)?;
    let url = pick_from_catalog(&entry.url, lang, &config.locales)?;

    let text = if parsed.later_version {
        let template = pick_from_catalog(&config.or_later_messages, lang, &config.locales)
            .unwrap_or("$1");
        template.replace("$1", text)
    } else {
        text.to_string()
    };

    Some(LocalizedLicense {
        code: parsed.code,
        text,
        url: url.to_string(),
    })
}

/// Build the localized projection of a validated document.
///
/// Returns `None` when the document is invalid or does not support
/// localization. Fields absent from the normalized tree are absent from the
/// projection.
pub fn localized_data(
    doc: &ValidatedDocument,
    lang: &str,
    config: &Config,
) -> Option<LocalizedData> {
    if !doc.is_valid() {
        log::debug!("Localization requested for an invalid document");
        return None;
    }
    if !doc.supports_localization() {
        return None;
    }

    let mut result = LocalizedData::default();

    if let Some(description) = doc.data().get("description").and_then(Value::as_object) {
        result.description =
            pick_localized_string(description, lang, &config.locales).map(str::to_owned);
    }
    if let Some(code) = doc.data().get("license").and_then(Value::as_str) {
        result.license = resolve_license(code, lang, config);
    }
    if let Some(sources) = doc.data().get("sources").and_then(Value::as_str) {
        result.sources = Some(sources.to_string());
    }

    Some(result)
}

/// Project a validated document for a consumer.
///
/// `None` for invalid documents. [`LangTarget::All`] yields the whole
/// normalized tree; [`LangTarget::Code`] yields the localized projection
/// when the document kind supports one, and falls back to the full tree
/// when it does not.
pub fn project(
    doc: &ValidatedDocument,
    target: LangTarget<'_>,
    config: &Config,
) -> Option<DataView> {
    if !doc.is_valid() {
        return None;
    }
    match target {
        LangTarget::All => Some(DataView::All(doc.data().clone())),
        LangTarget::Code(lang) => {
            if doc.supports_localization() {
                localized_data(doc, lang, config).map(DataView::Localized)
            } else {
                Some(DataView::All(doc.data().clone()))
            }
        }
    }
}

impl ValidatedDocument {
    /// Convenience wrapper around [`localized_data`].
    pub fn localized(&self, lang: &str, config: &Config) -> Option<LocalizedData> {
        localized_data(self, lang, config)
    }

    /// Convenience wrapper around [`project`].
    pub fn project(&self, target: LangTarget<'_>, config: &Config) -> Option<DataView> {
        project(self, target, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_license_code_parse_plain() {
        let parsed = LicenseCode::parse("cc-by-4.0");
        assert_eq!(parsed.code, "cc-by-4.0");
        assert_eq!(parsed.base, "cc-by-4.0");
        assert!(!parsed.later_version);
    }

    #[test]
    fn test_license_code_parse_later_version() {
        let parsed = LicenseCode::parse("cc-by-4.0+");
        assert_eq!(parsed.code, "cc-by-4.0+");
        assert_eq!(parsed.base, "cc-by-4.0");
        assert!(parsed.later_version);
    }

    #[test]
    fn test_pick_exact_match() {
        let map = as_map(json!({"en": "A", "fr": "B"}));
        let locales = LocaleConfig::default();
        assert_eq!(pick_localized_string(&map, "fr", &locales), Some("B"));
    }

    #[test]
    fn test_pick_follows_fallback_chain() {
        let map = as_map(json!({"en": "A", "fr": "B"}));
        let locales = LocaleConfig::default().with_fallback("de", vec!["en".to_string()]);
        assert_eq!(pick_localized_string(&map, "de", &locales), Some("A"));
    }

    #[test]
    fn test_pick_implicit_parent() {
        let map = as_map(json!({"pt": "P"}));
        let locales = LocaleConfig::default();
        assert_eq!(pick_localized_string(&map, "pt-br", &locales), Some("P"));
    }

    #[test]
    fn test_pick_alphabetical_last_resort() {
        // no chain reaches fr; the alphabetically-first entry wins
        let map = as_map(json!({"fr": "B"}));
        let locales = LocaleConfig::default();
        assert_eq!(pick_localized_string(&map, "de", &locales), Some("B"));

        let multi = as_map(json!({"zh": "Z", "fr": "B"}));
        assert_eq!(pick_localized_string(&multi, "de", &locales), Some("B"));
    }

    #[test]
    fn test_pick_empty_map() {
        let map = Map::new();
        let locales = LocaleConfig::default();
        assert_eq!(pick_localized_string(&map, "en", &locales), None);
    }

    #[test]
    fn test_resolve_license_plain() {
        let config = Config::default();
        let license = resolve_license("cc0-1.0", "en", &config).unwrap();
        assert_eq!(license.code, "cc0-1.0");
        assert_eq!(license.text, "Creative Commons Zero v1.0 Universal");
        assert!(license.url.contains("creativecommons.org"));
    }

    #[test]
    fn test_resolve_license_later_version_wraps_text() {
        let config = Config::default();
        let license = resolve_license("cc-by-4.0+", "en", &config).unwrap();
        assert_eq!(license.code, "cc-by-4.0+");
        assert_eq!(
            license.text,
            "Creative Commons Attribution 4.0, or any later version"
        );
    }

    #[test]
    fn test_resolve_license_unknown_base() {
        let config = Config::default();
        assert!(resolve_license("wtfpl", "en", &config).is_none());
    }

    #[test]
    fn test_lang_target_sentinel() {
        assert_eq!(LangTarget::from_code("_"), LangTarget::All);
        assert_eq!(LangTarget::from_code("fr"), LangTarget::Code("fr"));
    }
}

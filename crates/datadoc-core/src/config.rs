//! Explicit configuration for validation and localization
//!
//! Everything the engine needs from its host -- allowed licenses, the
//! license registry, language fallback chains, message templates -- is
//! threaded through [`Config`]. There is no ambient global state.
//!
//! Copyright (c) 2025 Datadoc Team
//! Licensed under the MIT or Apache-2.0 license

use crate::error::{Error, Result};
use crate::localize::LicenseCode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default maximum length for single-line and localized strings.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 400;

/// Language fallback configuration: the consumed fallback-chain service.
///
/// `chain_for` yields the resolution order for a requested language:
/// configured fallbacks first, then implicit parent codes obtained by
/// stripping trailing subtags (`de-at` falls back to `de` even when no chain
/// is configured), then the ultimate fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Per-language fallback chains, e.g. `de-at` -> `["de"]`
    pub fallbacks: HashMap<String, Vec<String>>,
    /// Last configured resort, typically `en`
    pub ultimate: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            fallbacks: HashMap::new(),
            ultimate: "en".to_string(),
        }
    }
}

impl LocaleConfig {
    pub fn new<U: Into<String>>(ultimate: U) -> Self {
        Self {
            fallbacks: HashMap::new(),
            ultimate: ultimate.into(),
        }
    }

    /// Add a fallback chain for one language.
    pub fn with_fallback<L: Into<String>>(mut self, lang: L, chain: Vec<String>) -> Self {
        self.fallbacks.insert(lang.into(), chain);
        self
    }

    /// Resolution order for `lang`, excluding `lang` itself.
    pub fn chain_for(&self, lang: &str) -> Vec<String> {
        let mut chain: Vec<String> = Vec::new();
        if let Some(configured) = self.fallbacks.get(lang) {
            chain.extend(configured.iter().cloned());
        }
        // implicit parents: strip trailing -subtags one at a time
        let mut parent = lang;
        while let Some(cut) = parent.rfind('-') {
            parent = &parent[..cut];
            if !chain.iter().any(|c| c == parent) {
                chain.push(parent.to_string());
            }
        }
        if lang != self.ultimate && !chain.iter().any(|c| c == &self.ultimate) {
            chain.push(self.ultimate.clone());
        }
        chain
    }
}

/// Display text and URL for one license, keyed by language code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicenseEntry {
    pub text: BTreeMap<String, String>,
    pub url: BTreeMap<String, String>,
}

impl LicenseEntry {
    /// Entry with English text and a language-independent URL.
    pub fn simple<T: Into<String>, U: Into<String>>(text: T, url: U) -> Self {
        let mut entry = Self::default();
        entry.text.insert("en".to_string(), text.into());
        entry.url.insert("en".to_string(), url.into());
        entry
    }
}

/// The consumed license-registry service: base license code to per-language
/// display data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LicenseRegistry {
    entries: BTreeMap<String, LicenseEntry>,
}

impl LicenseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<C: Into<String>>(&mut self, code: C, entry: LicenseEntry) {
        self.entries.insert(code.into(), entry);
    }

    pub fn with_entry<C: Into<String>>(mut self, code: C, entry: LicenseEntry) -> Self {
        self.insert(code, entry);
        self
    }

    /// Look up by base code (no `+` suffix).
    pub fn get(&self, base_code: &str) -> Option<&LicenseEntry> {
        self.entries.get(base_code)
    }

    pub fn contains(&self, base_code: &str) -> bool {
        self.entries.contains_key(base_code)
    }

    pub fn remove(&mut self, base_code: &str) -> Option<LicenseEntry> {
        self.entries.remove(base_code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Engine configuration threaded through the document validator and the
/// localization resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum character length for single-line strings
    pub max_line_length: usize,
    /// License codes accepted by the license validator; a trailing `+`
    /// means "this version or any later"
    pub allowed_licenses: Vec<String>,
    /// Language fallback chains
    pub locales: LocaleConfig,
    /// License display registry, keyed by base code
    pub licenses: LicenseRegistry,
    /// Per-language "or later version" wrapper, `$1` = license text
    pub or_later_messages: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        let licenses = LicenseRegistry::new()
            .with_entry(
                "cc0-1.0",
                LicenseEntry::simple(
                    "Creative Commons Zero v1.0 Universal",
                    "https://creativecommons.org/publicdomain/zero/1.0/",
                ),
            )
            .with_entry(
                "cc-by-4.0",
                LicenseEntry::simple(
                    "Creative Commons Attribution 4.0",
                    "https://creativecommons.org/licenses/by/4.0/",
                ),
            )
            .with_entry(
                "cc-by-sa-4.0",
                LicenseEntry::simple(
                    "Creative Commons Attribution-ShareAlike 4.0",
                    "https://creativecommons.org/licenses/by-sa/4.0/",
                ),
            );

        let mut or_later_messages = BTreeMap::new();
        or_later_messages.insert("en".to_string(), "$1, or any later version".to_string());

        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            allowed_licenses: vec![
                "cc0-1.0".to_string(),
                "cc-by-4.0".to_string(),
                "cc-by-4.0+".to_string(),
                "cc-by-sa-4.0".to_string(),
                "cc-by-sa-4.0+".to_string(),
            ],
            locales: LocaleConfig::default(),
            licenses,
            or_later_messages,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    pub fn with_allowed_licenses(mut self, allowed: Vec<String>) -> Self {
        self.allowed_licenses = allowed;
        self
    }

    pub fn with_locales(mut self, locales: LocaleConfig) -> Self {
        self.locales = locales;
        self
    }

    pub fn with_licenses(mut self, licenses: LicenseRegistry) -> Self {
        self.licenses = licenses;
        self
    }

    /// Check internal consistency: every allowed license must resolve to a
    /// registry entry, or localized projections would silently drop the
    /// license section.
    pub fn validate(&self) -> Result<()> {
        for code in &self.allowed_licenses {
            let parsed = LicenseCode::parse(code);
            if !self.licenses.contains(&parsed.base) {
                log::warn!(
                    "Allowed license '{}' has no registry entry for base code '{}'",
                    code,
                    parsed.base
                );
                return Err(Error::Configuration {
                    message: format!("allowed license '{}' has no registry entry", code),
                    source: Some(anyhow::anyhow!(
                        "license registry is missing base code '{}'",
                        parsed.base
                    )),
                });
            }
        }
        Ok(())
    }
}

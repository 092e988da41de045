//! Translation Dictionaries
//!
//! One nested JSON tree per locale, embedded at compile time and parsed once
//! at startup. Keys are dotted paths into the tree (`hero.title`); array
//! elements are addressed by index (`testimonials.items.0.quote`).

use std::{collections::BTreeSet, sync::Arc};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::locale::Locale;

const EN_SOURCE: &str = include_str!("../locales/en.json");
const FR_SOURCE: &str = include_str!("../locales/fr.json");

/// Errors raised while loading dictionaries.
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The embedded JSON did not parse.
    #[error("failed to parse {locale} dictionary: {source}")]
    Parse {
        locale: Locale,
        source: serde_json::Error,
    },

    /// The root of the dictionary is not a JSON object.
    #[error("{0} dictionary root must be an object")]
    NotAnObject(Locale),

    /// A locale lacks keys that another locale defines.
    #[error("{locale} dictionary is missing keys: {}", keys.join(", "))]
    MissingKeys { locale: Locale, keys: Vec<String> },
}

/// Localized strings for a single locale.
#[derive(Debug, Clone)]
pub struct Dictionary {
    locale: Locale,
    root: Map<String, Value>,
}

/// A JSON object inside a dictionary, e.g. one testimonial.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    fields: &'a Map<String, Value>,
}

impl Record<'_> {
    /// String field, or an empty string when absent.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).and_then(Value::as_str).unwrap_or_default()
    }

    /// String array field, empty when absent.
    pub fn list(&self, field: &str) -> Vec<&str> {
        strings(self.fields.get(field))
    }
}

impl Dictionary {
    /// Parses a dictionary from its JSON source.
    pub fn from_json(locale: Locale, raw: &str) -> Result<Self, DictionaryError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|source| DictionaryError::Parse { locale, source })?;

        match value {
            Value::Object(root) => Ok(Self { locale, root }),
            _ => Err(DictionaryError::NotAnObject(locale)),
        }
    }

    /// The locale these strings belong to.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Looks up a string by dotted key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lookup(key).and_then(Value::as_str)
    }

    /// Looks up a string, falling back to the key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or_else(|| {
            tracing::debug!(locale = %self.locale, key, "missing translation");
            key
        })
    }

    /// String array at `key`, empty when absent.
    pub fn list(&self, key: &str) -> Vec<&str> {
        strings(self.lookup(key))
    }

    /// Object array at `key`, empty when absent.
    pub fn records(&self, key: &str) -> Vec<Record<'_>> {
        self.lookup(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|fields| Record { fields })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Every leaf key in the tree.
    pub fn leaf_keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        for (name, value) in &self.root {
            collect_leaves(name.clone(), value, &mut keys);
        }
        keys
    }
}

fn collect_leaves(prefix: String, value: &Value, keys: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                collect_leaves(format!("{prefix}.{name}"), child, keys);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                collect_leaves(format!("{prefix}.{index}"), child, keys);
            }
        }
        _ => {
            keys.insert(prefix);
        }
    }
}

fn strings(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Dictionaries for every supported locale.
#[derive(Debug, Clone)]
pub struct Dictionaries {
    en: Arc<Dictionary>,
    fr: Arc<Dictionary>,
}

impl Dictionaries {
    /// Loads the dictionaries embedded in the binary.
    pub fn load() -> Result<Self, DictionaryError> {
        Self::from_sources(EN_SOURCE, FR_SOURCE)
    }

    /// Parses both dictionaries and checks they define the same keys.
    pub fn from_sources(en: &str, fr: &str) -> Result<Self, DictionaryError> {
        let en = Dictionary::from_json(Locale::En, en)?;
        let fr = Dictionary::from_json(Locale::Fr, fr)?;

        let en_keys = en.leaf_keys();
        let fr_keys = fr.leaf_keys();
        check_parity(Locale::Fr, &en_keys, &fr_keys)?;
        check_parity(Locale::En, &fr_keys, &en_keys)?;

        tracing::debug!(keys = en_keys.len(), "loaded dictionaries");

        Ok(Self {
            en: Arc::new(en),
            fr: Arc::new(fr),
        })
    }

    /// The dictionary for `locale`.
    pub fn get(&self, locale: Locale) -> Arc<Dictionary> {
        match locale {
            Locale::En => Arc::clone(&self.en),
            Locale::Fr => Arc::clone(&self.fr),
        }
    }
}

fn check_parity(
    locale: Locale,
    expected: &BTreeSet<String>,
    actual: &BTreeSet<String>,
) -> Result<(), DictionaryError> {
    let missing: Vec<String> = expected.difference(actual).cloned().collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DictionaryError::MissingKeys { locale, keys: missing })
    }
}

//! Attribute value translation between locale-neutral and locale-specific forms.

use crate::error::TranslationError;
use crate::routing::parameters::ParamValue;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Translates single attribute values for a route and locale.
///
/// `translate` turns the locale-specific stored value found in a match into
/// its neutral form; `reverse_translate` is the inverse used before
/// generating a URL.
pub trait AttributeTranslator: Send + Sync {
    fn translate(
        &self,
        route: &str,
        locale: &str,
        attribute: &str,
        value: &ParamValue,
    ) -> Result<ParamValue, TranslationError>;

    fn reverse_translate(
        &self,
        route: &str,
        locale: &str,
        attribute: &str,
        value: &ParamValue,
    ) -> Result<ParamValue, TranslationError>;
}

type CatalogKey = (String, String, String);

/// In-memory translator backed by `(route, locale, attribute)` tables.
///
/// Values missing from the tables pass through unchanged, and list values
/// are translated element by element.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    /// neutral -> localized
    forward: HashMap<CatalogKey, HashMap<String, String>>,
    /// localized -> neutral
    backward: HashMap<CatalogKey, HashMap<String, String>>,
}

/// `{ route: { locale: { attribute: { neutral: localized } } } }`
type CatalogFile = HashMap<String, HashMap<String, HashMap<String, HashMap<String, String>>>>;

impl CatalogTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one neutral/localized pair.
    pub fn insert(
        &mut self,
        route: &str,
        locale: &str,
        attribute: &str,
        neutral: impl Into<String>,
        localized: impl Into<String>,
    ) {
        let key = (route.to_string(), locale.to_string(), attribute.to_string());
        let neutral = neutral.into();
        let localized = localized.into();

        self.forward
            .entry(key.clone())
            .or_default()
            .insert(neutral.clone(), localized.clone());
        self.backward.entry(key).or_default().insert(localized, neutral);
    }

    /// Builder-style `insert`.
    pub fn with(
        mut self,
        route: &str,
        locale: &str,
        attribute: &str,
        neutral: impl Into<String>,
        localized: impl Into<String>,
    ) -> Self {
        self.insert(route, locale, attribute, neutral, localized);
        self
    }

    /// Parse a JSON catalog.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).context("Failed to parse translation catalog")?;

        let mut catalog = Self::new();
        for (route, locales) in file {
            for (locale, attributes) in locales {
                for (attribute, values) in attributes {
                    for (neutral, localized) in values {
                        catalog.insert(&route, &locale, &attribute, neutral, localized);
                    }
                }
            }
        }
        Ok(catalog)
    }

    /// Load a JSON catalog from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read translation catalog {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.forward.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(
        table: &HashMap<CatalogKey, HashMap<String, String>>,
        route: &str,
        locale: &str,
        attribute: &str,
        value: &ParamValue,
    ) -> ParamValue {
        let key = (route.to_string(), locale.to_string(), attribute.to_string());
        let Some(values) = table.get(&key) else {
            return value.clone();
        };

        value.map(|v| values.get(v).cloned().unwrap_or_else(|| v.to_string()))
    }
}

impl AttributeTranslator for CatalogTranslator {
    fn translate(
        &self,
        route: &str,
        locale: &str,
        attribute: &str,
        value: &ParamValue,
    ) -> Result<ParamValue, TranslationError> {
        Ok(Self::lookup(&self.backward, route, locale, attribute, value))
    }

    fn reverse_translate(
        &self,
        route: &str,
        locale: &str,
        attribute: &str,
        value: &ParamValue,
    ) -> Result<ParamValue, TranslationError> {
        Ok(Self::lookup(&self.forward, route, locale, attribute, value))
    }
}

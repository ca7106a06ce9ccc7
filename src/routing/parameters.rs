//! Parameter values, generation options and match results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reserved match key holding the resolved route name.
pub const ROUTE_KEY: &str = "_route";
/// Reserved match key holding the locale the route definition carries.
pub const LOCALE_KEY: &str = "_locale";
/// Reserved match key listing attributes whose values are locale-specific.
pub const TRANSLATE_KEY: &str = "_translate";

/// Legacy control key: explicit locale for a single `generate` call.
pub const LOCALE_OPTION: &str = "locale";
/// Legacy control key: attributes to pass through the translator before generating.
pub const TRANSLATE_OPTION: &str = "translate";

/// A single attribute value: one string, or a list of strings for
/// multi-segment attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    List(Vec<String>),
}

impl ParamValue {
    /// Borrow the value as a string if it holds exactly one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::List(_) => None,
        }
    }

    /// All strings held by the value, in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(value) => vec![value.as_str()],
            ParamValue::List(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Apply `f` to every string, keeping the shape.
    pub fn map(&self, mut f: impl FnMut(&str) -> String) -> Self {
        match self {
            ParamValue::Single(value) => ParamValue::Single(f(value)),
            ParamValue::List(values) => ParamValue::List(values.iter().map(|value| f(value)).collect()),
        }
    }

    /// Render the value as a path fragment; list entries are joined with `/`.
    pub fn to_path_segment(&self) -> String {
        self.values().join("/")
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::List(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Attribute name to value mapping used for generation input and match output.
pub type Parameters = HashMap<String, ParamValue>;

/// Build a `Parameters` map from string pairs.
pub fn params<K, V, I>(pairs: I) -> Parameters
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ParamValue>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// Per-call locale directives for `I18nRouter::generate`.
///
/// Kept apart from the attribute map so an attribute that happens to be
/// called `locale` is never mistaken for a directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Explicit locale, taking priority over the request context and the default.
    pub locale: Option<String>,
    /// Attributes whose neutral values must be translated to the locale before generating.
    pub translate: Vec<String>,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with an explicit locale.
    pub fn locale(locale: impl Into<String>) -> Self {
        Self {
            locale: Some(locale.into()),
            translate: Vec::new(),
        }
    }

    /// Add an attribute to translate.
    pub fn with_translate(mut self, attribute: impl Into<String>) -> Self {
        self.translate.push(attribute.into());
        self
    }

    /// Whether the call asks for locale-specific generation.
    pub fn requests_locale(&self) -> bool {
        self.locale.is_some() || !self.translate.is_empty()
    }

    /// Split the legacy `locale`/`translate` control keys out of a parameter map.
    ///
    /// Both keys are removed from `parameters`, so they are never forwarded to
    /// the underlying generator. `translate` may hold a single attribute name
    /// or a list of names.
    pub fn take_from(parameters: &mut Parameters) -> Self {
        let locale = match parameters.remove(LOCALE_OPTION) {
            Some(ParamValue::Single(locale)) => Some(locale),
            Some(ParamValue::List(values)) => values.into_iter().next(),
            None => None,
        };
        let translate = match parameters.remove(TRANSLATE_OPTION) {
            Some(ParamValue::Single(name)) => vec![name],
            Some(ParamValue::List(names)) => names,
            None => Vec::new(),
        };

        Self { locale, translate }
    }
}

/// The attributes produced by matching a path, including the reserved
/// `_route`, `_locale` and `_translate` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteMatch {
    attributes: Parameters,
}

impl RouteMatch {
    pub fn new(attributes: Parameters) -> Self {
        Self { attributes }
    }

    /// The resolved route name (`_route`).
    pub fn route(&self) -> Option<&str> {
        self.get_str(ROUTE_KEY)
    }

    /// The locale embedded in the route definition (`_locale`), if non-empty.
    pub fn locale(&self) -> Option<&str> {
        self.get_str(LOCALE_KEY).filter(|locale| !locale.is_empty())
    }

    /// Names listed under `_translate`.
    pub fn translate_attributes(&self) -> Vec<String> {
        self.attributes
            .get(TRANSLATE_KEY)
            .map(|value| value.values().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.attributes.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(ParamValue::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn attributes(&self) -> &Parameters {
        &self.attributes
    }

    pub fn into_attributes(self) -> Parameters {
        self.attributes
    }
}

impl From<Parameters> for RouteMatch {
    fn from(attributes: Parameters) -> Self {
        Self::new(attributes)
    }
}

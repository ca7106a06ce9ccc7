//! Request context shared by matchers and generators.

use std::collections::HashMap;

/// How `generate` renders the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferenceType {
    /// `https://example.com/dir/file`
    AbsoluteUrl,
    /// `/dir/file`
    #[default]
    AbsolutePath,
    /// `../parent-file`, relative to the context path
    RelativePath,
    /// `//example.com/dir/file`
    NetworkPath,
}

impl ReferenceType {
    /// Parse the names used by the HTTP demo (`url`, `path`, `relative`, `network`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "url" | "absolute_url" => Some(Self::AbsoluteUrl),
            "path" | "absolute_path" => Some(Self::AbsolutePath),
            "relative" | "relative_path" => Some(Self::RelativePath),
            "network" | "network_path" => Some(Self::NetworkPath),
            _ => None,
        }
    }
}

/// Information about the current request, used when matching and generating.
///
/// Besides the URL parts it carries free-form parameters; a `_locale`
/// parameter is the ambient locale for locale-aware generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub base_url: String,
    pub path_info: String,
    pub method: String,
    pub host: String,
    pub scheme: String,
    parameters: HashMap<String, String>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            path_info: "/".to_string(),
            method: "GET".to_string(),
            host: "localhost".to_string(),
            scheme: "http".to_string(),
            parameters: HashMap::new(),
        }
    }
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>, host: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            host: host.into(),
            scheme: scheme.into(),
            ..Self::default()
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_parameter(key, value);
        self
    }

    pub fn has_parameter(&self, key: &str) -> bool {
        self.parameters.contains_key(key)
    }

    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    pub fn set_parameter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.parameters.insert(key.into(), value.into());
    }

    pub fn remove_parameter(&mut self, key: &str) -> Option<String> {
        self.parameters.remove(key)
    }

    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }
}

//! Route definitions and the ordered collection a router is built from.

use crate::routing::inflector::RouteNameInflector;
use crate::routing::parameters::{ParamValue, Parameters, LOCALE_KEY};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// A single route: a path pattern with `{placeholder}` segments plus
/// defaults, placeholder requirements and allowed methods.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    #[serde(default)]
    pub defaults: Parameters,
    /// Placeholder name -> regex the value must match (default `[^/]+`).
    #[serde(default)]
    pub requirements: HashMap<String, String>,
    /// Allowed HTTP methods; empty allows any.
    #[serde(default)]
    pub methods: Vec<String>,
}

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn with_requirement(mut self, key: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.requirements.insert(key.into(), pattern.into());
        self
    }

    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = methods
            .into_iter()
            .map(|method| method.into().to_uppercase())
            .collect();
        self
    }
}

/// Named routes in insertion order. Matching tries them in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteCollection {
    routes: Vec<(String, Route)>,
}

/// One entry of a JSON route file.
#[derive(Debug, Deserialize)]
struct RouteDefinition {
    name: String,
    #[serde(default)]
    path: Option<String>,
    /// locale -> path; expands into one locale-specific route per entry
    #[serde(default)]
    locales: BTreeMap<String, String>,
    #[serde(default)]
    defaults: Parameters,
    #[serde(default)]
    requirements: HashMap<String, String>,
    #[serde(default)]
    methods: Vec<String>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route. A route already registered under `name` is replaced and
    /// moves to the end of the collection.
    pub fn add(&mut self, name: impl Into<String>, route: Route) {
        let name = name.into();
        self.remove(&name);
        self.routes.push((name, route));
    }

    /// Register one locale-specific route per `(locale, path)` pair.
    ///
    /// Each route is named `inflector.inflect(name, locale)`, copies the
    /// defaults, requirements and methods of `base`, takes the locale's path
    /// and carries `_locale` as a default.
    pub fn add_localized<I, L, P>(
        &mut self,
        name: &str,
        locales: I,
        base: &Route,
        inflector: &dyn RouteNameInflector,
    ) where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: Into<String>,
    {
        for (locale, path) in locales {
            let locale = locale.into();
            let mut route = base.clone();
            route.path = path.into();
            route
                .defaults
                .insert(LOCALE_KEY.to_string(), ParamValue::Single(locale.clone()));
            self.add(inflector.inflect(name, &locale), route);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|(route_name, _)| route_name == name)
            .map(|(_, route)| route)
    }

    pub fn remove(&mut self, name: &str) -> Option<Route> {
        let index = self.routes.iter().position(|(route_name, _)| route_name == name)?;
        Some(self.routes.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.routes.iter().map(|(name, route)| (name.as_str(), route))
    }

    pub fn names(&self) -> Vec<&str> {
        self.routes.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Parse a JSON array of route definitions.
    ///
    /// ```json
    /// [
    ///   { "name": "home", "path": "/" },
    ///   { "name": "about", "locales": { "en": "/en/about", "fr": "/fr/a-propos" } }
    /// ]
    /// ```
    pub fn from_json(json: &str, inflector: &dyn RouteNameInflector) -> Result<Self> {
        let definitions: Vec<RouteDefinition> =
            serde_json::from_str(json).context("Failed to parse route definitions")?;

        let mut collection = Self::new();
        for definition in definitions {
            if definition.path.is_none() && definition.locales.is_empty() {
                bail!(
                    "Route '{}' needs either a path or per-locale paths",
                    definition.name
                );
            }

            let base = Route {
                path: definition.path.clone().unwrap_or_default(),
                defaults: definition.defaults,
                requirements: definition.requirements,
                methods: definition
                    .methods
                    .into_iter()
                    .map(|method| method.to_uppercase())
                    .collect(),
            };

            if definition.path.is_some() {
                collection.add(definition.name.clone(), base.clone());
            }
            collection.add_localized(&definition.name, definition.locales, &base, inflector);
        }

        Ok(collection)
    }

    /// Load route definitions from a JSON file.
    pub fn load(path: impl AsRef<Path>, inflector: &dyn RouteNameInflector) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read routes file {}", path.display()))?;
        Self::from_json(&json, inflector)
    }
}

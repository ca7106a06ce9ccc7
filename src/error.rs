//! Error types shared by the routing layer.
//!
//! `RoutingError` covers every failure a matcher, a generator or the
//! locale-aware facade can report. Attribute translators have their own
//! `TranslationError` so they can be implemented without depending on the
//! routing taxonomy; it converts into `RoutingError::Translation`.

use thiserror::Error;

/// Failures raised while matching or generating routes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// The facade was built without a usable router backend.
    #[error("{0} is not a valid router: a full router or a matcher and generator pair is required")]
    InvalidRouter(String),

    /// Locale-specific generation was requested but no locale could be resolved.
    #[error("The locale must be available when using the \"translate\" option.")]
    MissingLocale,

    /// The generator does not know the route.
    #[error("Unable to generate a URL for the named route \"{name}\" as such route does not exist.")]
    RouteNotFound { name: String },

    /// The locale-specific variant of a logical route does not exist.
    #[error("I18n route \"{name}\" ({locale}) does not exist.")]
    LocalizedRouteNotFound { name: String, locale: String },

    /// Generation is missing values for placeholders of the route path.
    #[error("Some mandatory parameters are missing (\"{}\") to generate a URL for route \"{route}\".", .parameters.join("\", \""))]
    MissingMandatoryParameters {
        route: String,
        parameters: Vec<String>,
    },

    /// A parameter value does not satisfy the route requirement.
    #[error("Parameter \"{parameter}\" for route \"{route}\" must match \"{requirement}\" (\"{value}\" given).")]
    InvalidParameter {
        route: String,
        parameter: String,
        requirement: String,
        value: String,
    },

    /// No route matches the path.
    #[error("No routes found for \"{path}\".")]
    ResourceNotFound { path: String },

    /// A route matches the path but not the request method.
    #[error("Method \"{method}\" is not allowed (allowed: {}).", .allowed.join(", "))]
    MethodNotAllowed {
        method: String,
        allowed: Vec<String>,
    },

    /// The path handed to a matcher is not a valid request target.
    #[error("Invalid path \"{path}\": {reason}")]
    InvalidPath { path: String, reason: String },

    /// A route definition could not be compiled.
    #[error("Invalid route \"{name}\": {reason}")]
    InvalidRoute { name: String, reason: String },

    /// The attribute translator failed.
    #[error(transparent)]
    Translation(#[from] TranslationError),
}

impl RoutingError {
    /// Helper to create a route not found error
    pub fn route_not_found(name: impl Into<String>) -> Self {
        Self::RouteNotFound { name: name.into() }
    }

    /// Helper to create a locale-qualified route not found error
    pub fn localized_route_not_found(name: impl Into<String>, locale: impl Into<String>) -> Self {
        Self::LocalizedRouteNotFound {
            name: name.into(),
            locale: locale.into(),
        }
    }

    /// Helper to create a resource not found error
    pub fn resource_not_found(path: impl Into<String>) -> Self {
        Self::ResourceNotFound { path: path.into() }
    }

    /// True for the not-found class of generation failures (plain or locale-qualified).
    pub fn is_route_not_found(&self) -> bool {
        matches!(
            self,
            Self::RouteNotFound { .. } | Self::LocalizedRouteNotFound { .. }
        )
    }
}

/// Failure reported by an attribute translator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unable to translate attribute \"{attribute}\" of route \"{route}\" ({locale}): {reason}")]
pub struct TranslationError {
    pub route: String,
    pub locale: String,
    pub attribute: String,
    pub reason: String,
}

impl TranslationError {
    pub fn new(
        route: impl Into<String>,
        locale: impl Into<String>,
        attribute: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            route: route.into(),
            locale: locale.into(),
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}

pub type RoutingResult<T> = Result<T, RoutingError>;

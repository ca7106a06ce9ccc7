//! Capabilities a router backend can provide.
//!
//! A full `Router` provides all of them. The locale-aware facade also accepts
//! a `RequestMatcher` and a `UrlGenerator` supplied separately.

use crate::error::RoutingResult;
use crate::routing::collection::RouteCollection;
use crate::routing::context::{ReferenceType, RequestContext};
use crate::routing::parameters::{Parameters, RouteMatch};
use axum::http::Request;

/// Access to the request context.
pub trait RequestContextAware: Send + Sync {
    fn context(&self) -> &RequestContext;
    fn set_context(&mut self, context: RequestContext);
}

/// Resolves a path to a route and its attributes.
pub trait UrlMatcher: RequestContextAware {
    fn match_path(&self, path: &str) -> RoutingResult<RouteMatch>;
}

/// Resolves a whole request (path and method) to a route and its attributes.
pub trait RequestMatcher: Send + Sync {
    fn match_request(&self, request: &Request<()>) -> RoutingResult<RouteMatch>;
}

/// Turns a route name and attributes into a URL.
pub trait UrlGenerator: RequestContextAware {
    fn generate(
        &self,
        name: &str,
        parameters: &Parameters,
        reference_type: ReferenceType,
    ) -> RoutingResult<String>;
}

/// Exposes the routes a router was built from.
///
/// `None` when the router has no collection of its own, such as a facade over
/// a separately supplied matcher and generator.
pub trait RouteCollectionProvider {
    fn route_collection(&self) -> Option<&RouteCollection>;
}

/// A complete router: matching, request matching, generation and the route collection.
pub trait Router: UrlMatcher + RequestMatcher + UrlGenerator + RouteCollectionProvider {}

impl<T> Router for T where T: UrlMatcher + RequestMatcher + UrlGenerator + RouteCollectionProvider {}

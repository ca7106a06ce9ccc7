//! In-memory router over a `RouteCollection`.
//!
//! Each route path is compiled once into an anchored regex. Matching tries
//! routes in collection order; generation fills placeholders and appends the
//! remaining parameters as a query string.

use crate::error::{RoutingError, RoutingResult};
use crate::routing::collection::{Route, RouteCollection};
use crate::routing::context::{ReferenceType, RequestContext};
use crate::routing::parameters::{ParamValue, Parameters, RouteMatch, ROUTE_KEY};
use crate::routing::traits::{
    RequestContextAware, RequestMatcher, RouteCollectionProvider, UrlGenerator, UrlMatcher,
};
use axum::http::Request;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::trace;

const DEFAULT_REQUIREMENT: &str = "[^/]+";

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

#[derive(Debug, Clone)]
enum Token {
    Text(String),
    Variable(String),
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    name: String,
    route: Route,
    tokens: Vec<Token>,
    variables: Vec<String>,
    matcher: Regex,
    /// Anchored requirement per variable, checked at generation time.
    requirements: HashMap<String, Regex>,
}

impl CompiledRoute {
    fn compile(name: &str, route: &Route) -> RoutingResult<Self> {
        let invalid = |reason: String| RoutingError::InvalidRoute {
            name: name.to_string(),
            reason,
        };

        let mut tokens = Vec::new();
        let mut variables = Vec::new();
        let mut requirements = HashMap::new();
        let mut pattern = String::from("^");
        let mut last = 0;

        for caps in placeholder_regex().captures_iter(&route.path) {
            let (Some(whole), Some(var)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let text = &route.path[last..whole.start()];
            if !text.is_empty() {
                pattern.push_str(&regex::escape(text));
                tokens.push(Token::Text(text.to_string()));
            }

            let variable = var.as_str().to_string();
            if variables.contains(&variable) {
                return Err(invalid(format!("placeholder \"{}\" is used twice", variable)));
            }

            let requirement = route
                .requirements
                .get(&variable)
                .map(String::as_str)
                .unwrap_or(DEFAULT_REQUIREMENT);
            pattern.push_str(&format!("(?P<{}>{})", variable, requirement));

            let anchored = Regex::new(&format!("^(?:{})$", requirement))
                .map_err(|e| invalid(format!("requirement for \"{}\": {}", variable, e)))?;
            requirements.insert(variable.clone(), anchored);

            tokens.push(Token::Variable(variable.clone()));
            variables.push(variable);
            last = whole.end();
        }

        let tail = &route.path[last..];
        if !tail.is_empty() {
            pattern.push_str(&regex::escape(tail));
            tokens.push(Token::Text(tail.to_string()));
        }
        pattern.push('$');

        let matcher = Regex::new(&pattern).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            route: route.clone(),
            tokens,
            variables,
            matcher,
            requirements,
        })
    }

    fn allows(&self, method: &str) -> bool {
        self.route.methods.is_empty()
            || self.route.methods.iter().any(|allowed| {
                allowed == method || (method == "HEAD" && allowed == "GET")
            })
    }

    fn attributes(&self, path: &str) -> Option<Parameters> {
        let caps = self.matcher.captures(path)?;
        let mut attributes = self.route.defaults.clone();
        for variable in &self.variables {
            if let Some(value) = caps.name(variable) {
                let raw = value.as_str();
                let decoded = urlencoding::decode(raw)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| raw.to_string());
                attributes.insert(variable.clone(), ParamValue::Single(decoded));
            }
        }
        attributes.insert(ROUTE_KEY.to_string(), ParamValue::Single(self.name.clone()));
        Some(attributes)
    }
}

/// A `Router` backed by an in-memory route collection.
#[derive(Debug, Clone)]
pub struct RouteTable {
    collection: RouteCollection,
    compiled: Vec<CompiledRoute>,
    context: RequestContext,
}

impl RouteTable {
    /// Compile every route of the collection.
    pub fn new(collection: RouteCollection) -> RoutingResult<Self> {
        Self::with_context(collection, RequestContext::default())
    }

    pub fn with_context(collection: RouteCollection, context: RequestContext) -> RoutingResult<Self> {
        let compiled = collection
            .iter()
            .map(|(name, route)| CompiledRoute::compile(name, route))
            .collect::<RoutingResult<Vec<_>>>()?;

        Ok(Self {
            collection,
            compiled,
            context,
        })
    }

    fn match_with_method(&self, path: &str, method: &str) -> RoutingResult<RouteMatch> {
        let method = method.to_uppercase();
        let mut allowed: Vec<String> = Vec::new();

        for compiled in &self.compiled {
            let Some(attributes) = compiled.attributes(path) else {
                continue;
            };
            if !compiled.allows(&method) {
                for candidate in &compiled.route.methods {
                    if !allowed.contains(candidate) {
                        allowed.push(candidate.clone());
                    }
                }
                continue;
            }

            trace!(route = %compiled.name, path, "Route matched");
            return Ok(RouteMatch::new(attributes));
        }

        if allowed.is_empty() {
            Err(RoutingError::resource_not_found(path))
        } else {
            Err(RoutingError::MethodNotAllowed { method, allowed })
        }
    }

    fn build_path(compiled: &CompiledRoute, parameters: &Parameters) -> RoutingResult<String> {
        let missing: Vec<String> = compiled
            .variables
            .iter()
            .filter(|variable| {
                !parameters.contains_key(*variable) && !compiled.route.defaults.contains_key(*variable)
            })
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(RoutingError::MissingMandatoryParameters {
                route: compiled.name.clone(),
                parameters: missing,
            });
        }

        let mut path = String::new();
        for token in &compiled.tokens {
            match token {
                Token::Text(text) => path.push_str(text),
                Token::Variable(variable) => {
                    let value = parameters
                        .get(variable)
                        .or_else(|| compiled.route.defaults.get(variable))
                        .map(ParamValue::to_path_segment)
                        .unwrap_or_default();

                    if let Some(requirement) = compiled.requirements.get(variable) {
                        if !requirement.is_match(&value) {
                            return Err(RoutingError::InvalidParameter {
                                route: compiled.name.clone(),
                                parameter: variable.clone(),
                                requirement: requirement.as_str().to_string(),
                                value,
                            });
                        }
                    }

                    let encoded: Vec<String> = value
                        .split('/')
                        .map(|segment| urlencoding::encode(segment).into_owned())
                        .collect();
                    path.push_str(&encoded.join("/"));
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }

    fn build_query(compiled: &CompiledRoute, parameters: &Parameters) -> String {
        let mut extra: Vec<(&String, &ParamValue)> = parameters
            .iter()
            .filter(|(key, value)| {
                !key.starts_with('_')
                    && !compiled.variables.contains(*key)
                    && compiled.route.defaults.get(*key) != Some(*value)
            })
            .collect();
        extra.sort_by(|a, b| a.0.cmp(b.0));

        let pairs: Vec<String> = extra
            .into_iter()
            .flat_map(|(key, value)| match value {
                ParamValue::Single(v) => vec![format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(v)
                )],
                ParamValue::List(values) => values
                    .iter()
                    .map(|v| {
                        format!(
                            "{}={}",
                            urlencoding::encode(&format!("{}[]", key)),
                            urlencoding::encode(v)
                        )
                    })
                    .collect(),
            })
            .collect();

        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

/// Path of `target` relative to the directory of `base`, both absolute.
pub fn relative_path(base: &str, target: &str) -> String {
    if base == target {
        return String::new();
    }

    let mut source_dirs: Vec<&str> = base.strip_prefix('/').unwrap_or(base).split('/').collect();
    let mut target_dirs: Vec<&str> = target.strip_prefix('/').unwrap_or(target).split('/').collect();
    source_dirs.pop();
    let target_file = target_dirs.pop().unwrap_or_default();

    let common = source_dirs
        .iter()
        .zip(target_dirs.iter())
        .take_while(|(source, target)| source == target)
        .count();

    let mut rest: Vec<&str> = target_dirs[common..].to_vec();
    rest.push(target_file);
    let path = format!("{}{}", "../".repeat(source_dirs.len() - common), rest.join("/"));

    let colon_before_slash = match (path.find(':'), path.find('/')) {
        (Some(colon), Some(slash)) => colon < slash,
        (Some(_), None) => true,
        _ => false,
    };
    if path.is_empty() || path.starts_with('/') || colon_before_slash {
        format!("./{}", path)
    } else {
        path
    }
}

impl RequestContextAware for RouteTable {
    fn context(&self) -> &RequestContext {
        &self.context
    }

    fn set_context(&mut self, context: RequestContext) {
        self.context = context;
    }
}

impl UrlMatcher for RouteTable {
    fn match_path(&self, path: &str) -> RoutingResult<RouteMatch> {
        self.match_with_method(path, &self.context.method)
    }
}

impl RequestMatcher for RouteTable {
    fn match_request(&self, request: &Request<()>) -> RoutingResult<RouteMatch> {
        self.match_with_method(request.uri().path(), request.method().as_str())
    }
}

impl UrlGenerator for RouteTable {
    fn generate(
        &self,
        name: &str,
        parameters: &Parameters,
        reference_type: ReferenceType,
    ) -> RoutingResult<String> {
        let compiled = self
            .compiled
            .iter()
            .find(|compiled| compiled.name == name)
            .ok_or_else(|| RoutingError::route_not_found(name))?;

        let path = Self::build_path(compiled, parameters)?;
        let query = Self::build_query(compiled, parameters);
        let base_url = self.context.base_url.trim_end_matches('/');

        let url = match reference_type {
            ReferenceType::AbsolutePath => format!("{}{}{}", base_url, path, query),
            ReferenceType::AbsoluteUrl => format!(
                "{}://{}{}{}{}",
                self.context.scheme, self.context.host, base_url, path, query
            ),
            ReferenceType::NetworkPath => {
                format!("//{}{}{}{}", self.context.host, base_url, path, query)
            }
            ReferenceType::RelativePath => format!(
                "{}{}",
                relative_path(&self.context.path_info, &format!("{}{}", base_url, path)),
                query
            ),
        };

        Ok(url)
    }
}

impl RouteCollectionProvider for RouteTable {
    fn route_collection(&self) -> Option<&RouteCollection> {
        Some(&self.collection)
    }
}

//! HTTP front end for a configured `I18nRouter`.
//!
//! - `GET /_generate/:name?attr=value&locale=fr&translate=a,b&reference=url`
//!   returns `{ "url": "..." }`
//! - any other request is matched and returns the filtered match attributes

use crate::config::Config;
use crate::error::RoutingError;
use crate::routing::{
    CatalogTranslator, GenerateOptions, I18nRouter, ParamValue, Parameters, PostfixInflector,
    ReferenceType, RequestContext, RequestMatcher, RouteCollection, RouteMatch, RouteTable,
    TRANSLATE_OPTION,
};
use anyhow::Context;
use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Query key selecting the reference type of a generated URL.
const REFERENCE_QUERY_KEY: &str = "reference";

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct GenerateResponse {
    pub url: String,
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Routing(err) => match err {
                RoutingError::ResourceNotFound { .. }
                | RoutingError::RouteNotFound { .. }
                | RoutingError::LocalizedRouteNotFound { .. } => StatusCode::NOT_FOUND,
                RoutingError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
                RoutingError::MissingLocale
                | RoutingError::MissingMandatoryParameters { .. }
                | RoutingError::InvalidParameter { .. }
                | RoutingError::InvalidPath { .. } => StatusCode::BAD_REQUEST,
                RoutingError::InvalidRouter(_)
                | RoutingError::InvalidRoute { .. }
                | RoutingError::Translation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Build the decorated router described by the configuration.
pub fn build_router(config: &Config) -> anyhow::Result<I18nRouter> {
    let routes = RouteCollection::load(&config.routes_file, &PostfixInflector)?;
    info!("Loaded {} routes from {}", routes.len(), config.routes_file);

    let context = RequestContext::new(&config.base_url, &config.host, &config.scheme);
    let table = RouteTable::with_context(routes, context).context("Failed to compile routes")?;

    let mut builder = I18nRouter::builder().router(table).inflector(PostfixInflector);
    if let Some(locale) = &config.default_locale {
        builder = builder.default_locale(locale.clone());
    }
    if let Some(path) = &config.translations_file {
        let catalog = CatalogTranslator::load(path)?;
        info!("Loaded {} attribute translations from {}", catalog.len(), path);
        builder = builder.translator(catalog);
    }

    Ok(builder.build()?)
}

/// The axum application serving `router`.
pub fn app(router: Arc<I18nRouter>) -> axum::Router {
    axum::Router::new()
        .route("/_generate/:name", get(generate_url))
        .fallback(match_route)
        .layer(TraceLayer::new_for_http())
        .with_state(router)
}

async fn generate_url(
    State(router): State<Arc<I18nRouter>>,
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> ServerResult<Json<GenerateResponse>> {
    let mut parameters: Parameters = HashMap::new();
    let mut reference_type = ReferenceType::default();

    for (key, value) in query {
        if key == REFERENCE_QUERY_KEY {
            reference_type = ReferenceType::from_name(&value).ok_or_else(|| {
                ServerError::BadRequest(format!("Unknown reference type '{}'", value))
            })?;
        } else if key == TRANSLATE_OPTION {
            let attributes: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|attribute| !attribute.is_empty())
                .map(str::to_string)
                .collect();
            parameters.insert(key, ParamValue::List(attributes));
        } else {
            parameters.insert(key, ParamValue::Single(value));
        }
    }

    let options = GenerateOptions::take_from(&mut parameters);
    debug!(route = %name, ?options, "Generating URL");
    let url = router.generate_with_options(&name, parameters, &options, reference_type)?;

    Ok(Json(GenerateResponse { url }))
}

async fn match_route(
    State(router): State<Arc<I18nRouter>>,
    request: Request,
) -> ServerResult<Json<RouteMatch>> {
    let (parts, _body) = request.into_parts();
    let request = axum::http::Request::from_parts(parts, ());
    let matched = router.match_request(&request)?;
    Ok(Json(matched))
}

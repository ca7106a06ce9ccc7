//! Locale-aware routing.
//!
//! # Architecture
//!
//! - `i18n_router`: the `I18nRouter` decorator (locale resolution, name inflection, match filtering)
//! - `inflector`: strategies mapping logical route names to locale-specific ones and back
//! - `translator`: attribute value translation between neutral and localized forms
//! - `traits`: matcher/generator capabilities a decorated router provides
//! - `table`: in-memory `Router` over a `RouteCollection`
//! - `collection`: route definitions, including per-locale expansion
//! - `context`, `parameters`: request context, parameter values, match results
//!
//! # Example
//!
//! ```rust,ignore
//! use i18n_routing::routing::*;
//!
//! let mut routes = RouteCollection::new();
//! routes.add_localized("about", [("en", "/en/about"), ("fr", "/fr/a-propos")], &Route::default(), &PostfixInflector);
//!
//! let router = I18nRouter::builder()
//!     .router(RouteTable::new(routes)?)
//!     .default_locale("en")
//!     .build()?;
//!
//! let url = router.generate_with_options("about", Parameters::new(), &GenerateOptions::locale("fr"), ReferenceType::AbsolutePath)?;
//! assert_eq!(url, "/fr/a-propos");
//! assert_eq!(router.match_path("/fr/a-propos")?.route(), Some("about"));
//! ```

mod collection;
mod context;
mod i18n_router;
mod inflector;
mod parameters;
mod table;
mod traits;
mod translator;

pub use collection::{Route, RouteCollection};
pub use context::{ReferenceType, RequestContext};
pub use i18n_router::{I18nRouter, I18nRouterBuilder, RouterBackend};
pub use inflector::{PostfixInflector, RouteNameInflector};
pub use parameters::{
    params, GenerateOptions, ParamValue, Parameters, RouteMatch, LOCALE_KEY, LOCALE_OPTION,
    ROUTE_KEY, TRANSLATE_KEY, TRANSLATE_OPTION,
};
pub use table::{relative_path, RouteTable};
pub use traits::{
    RequestContextAware, RequestMatcher, RouteCollectionProvider, Router, UrlGenerator, UrlMatcher,
};
pub use translator::{AttributeTranslator, CatalogTranslator};

//! Locale-aware router decorator.
//!
//! `I18nRouter` wraps an underlying router and lets application code work
//! with logical route names only:
//!
//! - generation inflects the logical name with a resolved locale when asked
//!   to (explicit locale or translated attributes), or when the logical name
//!   alone is unknown to the underlying generator;
//! - matching strips the locale suffix from `_route` and translates the
//!   attributes listed in `_translate` back to their neutral values.
//!
//! The locale is resolved from, in order: the per-call option, the `_locale`
//! parameter of the request context, the configured default.

use crate::error::{RoutingError, RoutingResult};
use crate::routing::collection::RouteCollection;
use crate::routing::context::{ReferenceType, RequestContext};
use crate::routing::inflector::{PostfixInflector, RouteNameInflector};
use crate::routing::parameters::{GenerateOptions, Parameters, RouteMatch, LOCALE_KEY, ROUTE_KEY};
use crate::routing::traits::{
    RequestContextAware, RequestMatcher, RouteCollectionProvider, Router, UrlGenerator, UrlMatcher,
};
use crate::routing::translator::AttributeTranslator;
use axum::http::{Request, Uri};
use std::sync::Arc;
use tracing::{debug, trace};

/// The router being decorated: either a full router, or a request matcher
/// and a URL generator supplied separately.
pub enum RouterBackend {
    Full(Box<dyn Router>),
    Split {
        matcher: Box<dyn RequestMatcher>,
        generator: Box<dyn UrlGenerator>,
    },
}

impl RouterBackend {
    fn generate(
        &self,
        name: &str,
        parameters: &Parameters,
        reference_type: ReferenceType,
    ) -> RoutingResult<String> {
        match self {
            RouterBackend::Full(router) => router.generate(name, parameters, reference_type),
            RouterBackend::Split { generator, .. } => {
                generator.generate(name, parameters, reference_type)
            }
        }
    }

    /// Both arms match the path component of `path` only; the query string is ignored.
    fn match_path(&self, path: &str) -> RoutingResult<RouteMatch> {
        let invalid = |reason: String| RoutingError::InvalidPath {
            path: path.to_string(),
            reason,
        };
        let uri = path
            .parse::<Uri>()
            .map_err(|err| invalid(err.to_string()))?;

        match self {
            RouterBackend::Full(router) => router.match_path(uri.path()),
            RouterBackend::Split { matcher, generator } => {
                // a bare request matcher only understands requests
                let request = Request::builder()
                    .method(generator.context().method.as_str())
                    .uri(uri)
                    .body(())
                    .map_err(|err| invalid(err.to_string()))?;
                matcher.match_request(&request)
            }
        }
    }

    fn match_request(&self, request: &Request<()>) -> RoutingResult<RouteMatch> {
        match self {
            RouterBackend::Full(router) => router.match_request(request),
            RouterBackend::Split { matcher, .. } => matcher.match_request(request),
        }
    }

    fn context(&self) -> &RequestContext {
        match self {
            RouterBackend::Full(router) => router.context(),
            RouterBackend::Split { generator, .. } => generator.context(),
        }
    }

    fn set_context(&mut self, context: RequestContext) {
        match self {
            RouterBackend::Full(router) => router.set_context(context),
            RouterBackend::Split { generator, .. } => generator.set_context(context),
        }
    }

    fn route_collection(&self) -> Option<&RouteCollection> {
        match self {
            RouterBackend::Full(router) => router.route_collection(),
            RouterBackend::Split { .. } => None,
        }
    }
}

/// Builder for `I18nRouter`; validates that a usable backend was supplied.
#[derive(Default)]
pub struct I18nRouterBuilder {
    router: Option<Box<dyn Router>>,
    matcher: Option<Box<dyn RequestMatcher>>,
    generator: Option<Box<dyn UrlGenerator>>,
    translator: Option<Arc<dyn AttributeTranslator>>,
    default_locale: Option<String>,
    inflector: Option<Box<dyn RouteNameInflector>>,
}

impl I18nRouterBuilder {
    /// Decorate a full router. Takes precedence over a matcher/generator pair.
    pub fn router(mut self, router: impl Router + 'static) -> Self {
        self.router = Some(Box::new(router));
        self
    }

    pub fn matcher(mut self, matcher: impl RequestMatcher + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    pub fn generator(mut self, generator: impl UrlGenerator + 'static) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    pub fn translator(self, translator: impl AttributeTranslator + 'static) -> Self {
        self.shared_translator(Arc::new(translator))
    }

    pub fn shared_translator(mut self, translator: Arc<dyn AttributeTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Locale used when neither the call nor the request context provides one.
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into()).filter(|locale| !locale.is_empty());
        self
    }

    pub fn inflector(mut self, inflector: impl RouteNameInflector + 'static) -> Self {
        self.inflector = Some(Box::new(inflector));
        self
    }

    pub fn build(self) -> RoutingResult<I18nRouter> {
        let backend = match (self.router, self.matcher, self.generator) {
            (Some(router), _, _) => RouterBackend::Full(router),
            (None, Some(matcher), Some(generator)) => RouterBackend::Split { matcher, generator },
            (None, Some(_), None) => {
                return Err(RoutingError::InvalidRouter(
                    "A request matcher without a URL generator".to_string(),
                ))
            }
            (None, None, Some(_)) => {
                return Err(RoutingError::InvalidRouter(
                    "A URL generator without a request matcher".to_string(),
                ))
            }
            (None, None, None) => {
                return Err(RoutingError::InvalidRouter("An empty backend".to_string()))
            }
        };

        Ok(I18nRouter {
            backend,
            translator: self.translator,
            default_locale: self.default_locale,
            inflector: self
                .inflector
                .unwrap_or_else(|| Box::new(PostfixInflector)),
        })
    }
}

/// Router decorator translating between logical and locale-specific routes.
pub struct I18nRouter {
    backend: RouterBackend,
    translator: Option<Arc<dyn AttributeTranslator>>,
    default_locale: Option<String>,
    inflector: Box<dyn RouteNameInflector>,
}

impl I18nRouter {
    pub fn builder() -> I18nRouterBuilder {
        I18nRouterBuilder::default()
    }

    /// Decorate a full router with the default inflector, no translator and no default locale.
    pub fn new(router: impl Router + 'static) -> Self {
        Self {
            backend: RouterBackend::Full(Box::new(router)),
            translator: None,
            default_locale: None,
            inflector: Box::new(PostfixInflector),
        }
    }

    /// Generate a URL for a logical route name.
    ///
    /// With an explicit locale or attributes to translate, the locale-specific
    /// route is generated directly and an unresolvable locale is an error.
    /// Otherwise the logical name is tried first, and only if the underlying
    /// generator does not know it is the locale-specific name tried, provided
    /// a locale can be resolved.
    pub fn generate_with_options(
        &self,
        name: &str,
        mut parameters: Parameters,
        options: &GenerateOptions,
        reference_type: ReferenceType,
    ) -> RoutingResult<String> {
        if options.requests_locale() {
            let locale = self
                .resolve_locale(options.locale.as_deref())
                .ok_or(RoutingError::MissingLocale)?;

            if let Some(translator) = &self.translator {
                for attribute in &options.translate {
                    if let Some(value) = parameters.get(attribute) {
                        let translated =
                            translator.reverse_translate(name, &locale, attribute, value)?;
                        parameters.insert(attribute.clone(), translated);
                    }
                }
            }

            return self.generate_localized(name, &locale, &parameters, reference_type);
        }

        match self.backend.generate(name, &parameters, reference_type) {
            Err(err) if err.is_route_not_found() => match self.resolve_locale(None) {
                Some(locale) => {
                    // TODO: only fall back when a localized sibling exists, so typos in
                    // logical names surface as plain not-found errors
                    debug!(route = name, locale = %locale, "Falling back to locale-specific route");
                    self.generate_localized(name, &locale, &parameters, reference_type)
                }
                None => Err(err),
            },
            result => result,
        }
    }

    /// Replace the default locale; an empty string clears it.
    pub fn set_default_locale(&mut self, locale: impl Into<String>) {
        self.default_locale = Some(locale.into()).filter(|locale| !locale.is_empty());
    }

    pub fn default_locale(&self) -> Option<&str> {
        self.default_locale.as_deref()
    }

    pub fn inflector(&self) -> &dyn RouteNameInflector {
        self.inflector.as_ref()
    }

    pub fn has_translator(&self) -> bool {
        self.translator.is_some()
    }

    /// Effective locale: explicit value, then the context `_locale`, then the default.
    fn resolve_locale(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .filter(|locale| !locale.is_empty())
            .or_else(|| {
                self.backend
                    .context()
                    .parameter(LOCALE_KEY)
                    .filter(|locale| !locale.is_empty())
            })
            .or(self.default_locale.as_deref())
            .map(str::to_string)
    }

    fn generate_localized(
        &self,
        name: &str,
        locale: &str,
        parameters: &Parameters,
        reference_type: ReferenceType,
    ) -> RoutingResult<String> {
        let localized = self.inflector.inflect(name, locale);
        self.backend
            .generate(&localized, parameters, reference_type)
            .map_err(|err| {
                if err.is_route_not_found() {
                    RoutingError::localized_route_not_found(name, locale)
                } else {
                    err
                }
            })
    }

    /// Strip the locale suffix from `_route` and translate `_translate` attributes.
    fn filter_match(&self, mut matched: RouteMatch) -> RoutingResult<RouteMatch> {
        let Some(locale) = matched.locale().map(str::to_string) else {
            return Ok(matched);
        };
        let Some(logical) = matched
            .route()
            .and_then(|route| self.inflector.recognize(route, &locale))
        else {
            trace!(route = ?matched.route(), locale = %locale, "Route does not carry its locale suffix");
            return Ok(matched);
        };

        matched.insert(ROUTE_KEY, logical.clone());

        if let Some(translator) = &self.translator {
            for attribute in matched.translate_attributes() {
                if let Some(value) = matched.get(&attribute) {
                    let translated = translator.translate(&logical, &locale, &attribute, value)?;
                    matched.insert(attribute, translated);
                }
            }
        }

        Ok(matched)
    }
}

impl RequestContextAware for I18nRouter {
    fn context(&self) -> &RequestContext {
        self.backend.context()
    }

    fn set_context(&mut self, context: RequestContext) {
        self.backend.set_context(context);
    }
}

impl RouteCollectionProvider for I18nRouter {
    /// Routes of the underlying router; `None` for a matcher/generator pair.
    fn route_collection(&self) -> Option<&RouteCollection> {
        self.backend.route_collection()
    }
}

impl UrlMatcher for I18nRouter {
    fn match_path(&self, path: &str) -> RoutingResult<RouteMatch> {
        self.filter_match(self.backend.match_path(path)?)
    }
}

impl RequestMatcher for I18nRouter {
    fn match_request(&self, request: &Request<()>) -> RoutingResult<RouteMatch> {
        self.filter_match(self.backend.match_request(request)?)
    }
}

impl UrlGenerator for I18nRouter {
    /// Generate with the `locale`/`translate` control keys read from `parameters`.
    fn generate(
        &self,
        name: &str,
        parameters: &Parameters,
        reference_type: ReferenceType,
    ) -> RoutingResult<String> {
        let mut parameters = parameters.clone();
        let options = GenerateOptions::take_from(&mut parameters);
        self.generate_with_options(name, parameters, &options, reference_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslationError;
    use crate::routing::collection::Route;
    use crate::routing::parameters::{params, ParamValue};
    use crate::routing::table::RouteTable;
    use crate::routing::translator::CatalogTranslator;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records every call and tags values with the direction and locale.
    #[derive(Default)]
    struct RecordingTranslator {
        calls: Mutex<Vec<(String, String, String, String, String)>>,
    }

    impl RecordingTranslator {
        fn record(&self, kind: &str, route: &str, locale: &str, attribute: &str, value: &ParamValue) {
            self.calls.lock().unwrap().push((
                kind.to_string(),
                route.to_string(),
                locale.to_string(),
                attribute.to_string(),
                value.values().join(","),
            ));
        }

        fn calls(&self) -> Vec<(String, String, String, String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AttributeTranslator for RecordingTranslator {
        fn translate(
            &self,
            route: &str,
            locale: &str,
            attribute: &str,
            value: &ParamValue,
        ) -> Result<ParamValue, TranslationError> {
            self.record("translate", route, locale, attribute, value);
            Ok(value.map(|v| format!("neutral-{}", v)))
        }

        fn reverse_translate(
            &self,
            route: &str,
            locale: &str,
            attribute: &str,
            value: &ParamValue,
        ) -> Result<ParamValue, TranslationError> {
            self.record("reverse", route, locale, attribute, value);
            Ok(value.map(|v| format!("{}-{}", v, locale)))
        }
    }

    struct FailingTranslator;

    impl AttributeTranslator for FailingTranslator {
        fn translate(
            &self,
            route: &str,
            locale: &str,
            attribute: &str,
            _value: &ParamValue,
        ) -> Result<ParamValue, TranslationError> {
            Err(TranslationError::new(route, locale, attribute, "store offline"))
        }

        fn reverse_translate(
            &self,
            route: &str,
            locale: &str,
            attribute: &str,
            _value: &ParamValue,
        ) -> Result<ParamValue, TranslationError> {
            Err(TranslationError::new(route, locale, attribute, "store offline"))
        }
    }

    /// Postfix inflection that counts `inflect` calls through a shared counter.
    struct CountingInflector {
        inflections: Arc<AtomicUsize>,
    }

    impl RouteNameInflector for CountingInflector {
        fn inflect(&self, name: &str, locale: &str) -> String {
            self.inflections.fetch_add(1, Ordering::SeqCst);
            PostfixInflector.inflect(name, locale)
        }

        fn recognize(&self, name: &str, locale: &str) -> Option<String> {
            PostfixInflector.recognize(name, locale)
        }
    }

    fn routes() -> RouteCollection {
        let mut routes = RouteCollection::new();
        routes.add("home", Route::new("/"));
        routes.add_localized(
            "about",
            [("en", "/en/about"), ("fr", "/fr/a-propos")],
            &Route::default(),
            &PostfixInflector,
        );
        routes.add_localized(
            "article",
            [("en", "/en/article/{title}"), ("fr", "/fr/article/{title}")],
            &Route::default().with_default("_translate", vec!["title"]),
            &PostfixInflector,
        );
        routes.add("legacy.fr", Route::new("/legacy").with_default("_locale", "de"));
        routes
    }

    fn table() -> RouteTable {
        RouteTable::new(routes()).unwrap()
    }

    fn table_with_locale(locale: &str) -> RouteTable {
        let context = RequestContext::default().with_parameter("_locale", locale);
        RouteTable::with_context(routes(), context).unwrap()
    }

    fn generate(router: &I18nRouter, name: &str, parameters: Parameters, options: GenerateOptions) -> RoutingResult<String> {
        router.generate_with_options(name, parameters, &options, ReferenceType::AbsolutePath)
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_builder_requires_backend() {
        let err = I18nRouter::builder().build().err().unwrap();
        assert!(matches!(err, RoutingError::InvalidRouter(_)));
    }

    #[test]
    fn test_builder_rejects_matcher_without_generator() {
        let err = I18nRouter::builder().matcher(table()).build().err().unwrap();
        assert!(err.to_string().contains("not a valid router"));
    }

    #[test]
    fn test_builder_rejects_generator_without_matcher() {
        let result = I18nRouter::builder().generator(table()).build();
        assert!(matches!(result, Err(RoutingError::InvalidRouter(_))));
    }

    #[test]
    fn test_builder_accepts_split_backend() {
        let router = I18nRouter::builder()
            .matcher(table())
            .generator(table())
            .build()
            .unwrap();
        assert!(router.route_collection().is_none());
        assert_eq!(
            router.match_path("/fr/a-propos").unwrap().route(),
            Some("about")
        );
    }

    #[test]
    fn test_builder_defaults() {
        let router = I18nRouter::builder().router(table()).build().unwrap();
        assert_eq!(router.default_locale(), None);
        assert!(!router.has_translator());
        assert_eq!(router.inflector().inflect("a", "b"), "a.b");
        assert_eq!(router.route_collection().unwrap().len(), 6);
    }

    #[test]
    fn test_builder_empty_default_locale_is_none() {
        let router = I18nRouter::builder().router(table()).default_locale("").build().unwrap();
        assert_eq!(router.default_locale(), None);
    }

    // ==================== Generate Fast Path Tests ====================

    #[test]
    fn test_generate_logical_route_directly() {
        let translator = Arc::new(RecordingTranslator::default());
        let router = I18nRouter::builder()
            .router(table_with_locale("fr"))
            .shared_translator(translator.clone())
            .build()
            .unwrap();

        let url = generate(&router, "home", Parameters::new(), GenerateOptions::new()).unwrap();
        assert_eq!(url, "/");
        assert!(translator.calls().is_empty());
    }

    #[test]
    fn test_generate_direct_route_skips_inflector() {
        let inflections = Arc::new(AtomicUsize::new(0));
        let router = I18nRouter::builder()
            .router(table_with_locale("fr"))
            .inflector(CountingInflector {
                inflections: inflections.clone(),
            })
            .build()
            .unwrap();

        assert_eq!(generate(&router, "home", Parameters::new(), GenerateOptions::new()).unwrap(), "/");
        assert_eq!(inflections.load(Ordering::SeqCst), 0);

        assert_eq!(
            generate(&router, "about", Parameters::new(), GenerateOptions::new()).unwrap(),
            "/fr/a-propos"
        );
        assert_eq!(inflections.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_generate_falls_back_to_context_locale() {
        let router = I18nRouter::new(table_with_locale("fr"));
        let url = generate(&router, "about", Parameters::new(), GenerateOptions::new()).unwrap();
        assert_eq!(url, "/fr/a-propos");
    }

    #[test]
    fn test_generate_falls_back_to_default_locale() {
        let router = I18nRouter::builder()
            .router(table())
            .default_locale("en")
            .build()
            .unwrap();
        let url = generate(&router, "about", Parameters::new(), GenerateOptions::new()).unwrap();
        assert_eq!(url, "/en/about");
    }

    #[test]
    fn test_generate_without_locale_reraises_original_error() {
        let router = I18nRouter::new(table());
        let err = generate(&router, "about", Parameters::new(), GenerateOptions::new()).unwrap_err();
        assert_eq!(err, RoutingError::route_not_found("about"));
    }

    #[test]
    fn test_generate_fallback_not_found_is_locale_qualified() {
        let router = I18nRouter::new(table_with_locale("fr"));
        let err = generate(&router, "nope", Parameters::new(), GenerateOptions::new()).unwrap_err();
        assert_eq!(err, RoutingError::localized_route_not_found("nope", "fr"));
    }

    #[test]
    fn test_generate_propagates_missing_parameters() {
        let router = I18nRouter::new(table_with_locale("fr"));
        let err = generate(&router, "article", Parameters::new(), GenerateOptions::locale("en")).unwrap_err();
        assert!(matches!(err, RoutingError::MissingMandatoryParameters { ref route, .. } if route == "article.en"));
    }

    // ==================== Generate Explicit Locale Tests ====================

    #[test]
    fn test_generate_explicit_locale_beats_context() {
        let router = I18nRouter::new(table_with_locale("fr"));
        let url = generate(&router, "about", Parameters::new(), GenerateOptions::locale("en")).unwrap();
        assert_eq!(url, "/en/about");
    }

    #[test]
    fn test_generate_explicit_locale_equals_inflected_name() {
        let router = I18nRouter::new(table());
        let parameters = params([("ref", "nav")]);
        let via_locale = generate(&router, "about", parameters.clone(), GenerateOptions::locale("fr")).unwrap();
        let via_name = generate(&router, "about.fr", parameters, GenerateOptions::new()).unwrap();
        assert_eq!(via_locale, via_name);
        assert_eq!(via_locale, "/fr/a-propos?ref=nav");
    }

    #[test]
    fn test_generate_explicit_locale_missing_route() {
        let router = I18nRouter::new(table());
        let err = generate(&router, "about", Parameters::new(), GenerateOptions::locale("de")).unwrap_err();
        assert_eq!(err.to_string(), "I18n route \"about\" (de) does not exist.");
    }

    #[test]
    fn test_generate_empty_explicit_locale_uses_context() {
        let router = I18nRouter::new(table_with_locale("en"));
        let url = generate(&router, "about", Parameters::new(), GenerateOptions::locale("")).unwrap();
        assert_eq!(url, "/en/about");
    }

    // ==================== Generate Translate Tests ====================

    #[test]
    fn test_generate_translate_calls_reverse_translate_once() {
        let translator = Arc::new(RecordingTranslator::default());
        let router = I18nRouter::builder()
            .router(table())
            .shared_translator(translator.clone())
            .build()
            .unwrap();

        let url = generate(
            &router,
            "article",
            params([("title", "hello")]),
            GenerateOptions::locale("fr").with_translate("title"),
        )
        .unwrap();

        assert_eq!(url, "/fr/article/hello-fr");
        assert_eq!(
            translator.calls(),
            vec![(
                "reverse".to_string(),
                "article".to_string(),
                "fr".to_string(),
                "title".to_string(),
                "hello".to_string(),
            )]
        );
    }

    #[test]
    fn test_generate_translate_without_locale_fails() {
        let router = I18nRouter::builder()
            .router(table())
            .translator(RecordingTranslator::default())
            .build()
            .unwrap();
        let err = generate(
            &router,
            "article",
            params([("title", "hello")]),
            GenerateOptions::new().with_translate("title"),
        )
        .unwrap_err();
        assert_eq!(err, RoutingError::MissingLocale);
    }

    #[test]
    fn test_generate_translate_uses_default_locale_after_update() {
        let mut router = I18nRouter::builder()
            .router(table())
            .translator(CatalogTranslator::new().with("article", "fr", "title", "hello", "bonjour"))
            .build()
            .unwrap();
        router.set_default_locale("fr");

        let url = generate(
            &router,
            "article",
            params([("title", "hello")]),
            GenerateOptions::new().with_translate("title"),
        )
        .unwrap();
        assert_eq!(url, "/fr/article/bonjour");
    }

    #[test]
    fn test_generate_translate_without_translator_keeps_values() {
        let router = I18nRouter::new(table());
        let url = generate(
            &router,
            "article",
            params([("title", "hello")]),
            GenerateOptions::locale("en").with_translate("title"),
        )
        .unwrap();
        assert_eq!(url, "/en/article/hello");
    }

    #[test]
    fn test_generate_translate_skips_absent_attribute() {
        let translator = Arc::new(RecordingTranslator::default());
        let router = I18nRouter::builder()
            .router(table())
            .shared_translator(translator.clone())
            .build()
            .unwrap();
        let url = generate(
            &router,
            "about",
            Parameters::new(),
            GenerateOptions::locale("en").with_translate("title"),
        )
        .unwrap();
        assert_eq!(url, "/en/about");
        assert!(translator.calls().is_empty());
    }

    #[test]
    fn test_generate_translation_error_propagates() {
        let router = I18nRouter::builder()
            .router(table())
            .translator(FailingTranslator)
            .build()
            .unwrap();
        let err = generate(
            &router,
            "article",
            params([("title", "x")]),
            GenerateOptions::locale("fr").with_translate("title"),
        )
        .unwrap_err();
        assert!(matches!(err, RoutingError::Translation(_)));
    }

    // ==================== Legacy Control Key Tests ====================

    #[test]
    fn test_trait_generate_consumes_control_keys() {
        let router = I18nRouter::builder()
            .router(table())
            .translator(CatalogTranslator::new().with("article", "fr", "title", "hello", "bonjour"))
            .build()
            .unwrap();
        let parameters = params([("locale", "fr"), ("translate", "title"), ("title", "hello")]);

        let url = UrlGenerator::generate(&router, "article", &parameters, ReferenceType::AbsolutePath).unwrap();
        // neither control key leaks into the query string
        assert_eq!(url, "/fr/article/bonjour");
    }

    // ==================== Match Filtering Tests ====================

    #[test]
    fn test_match_strips_locale_suffix() {
        let router = I18nRouter::new(table());
        let matched = router.match_path("/fr/a-propos").unwrap();
        assert_eq!(matched.route(), Some("about"));
        assert_eq!(matched.locale(), Some("fr"));
    }

    #[test]
    fn test_match_without_locale_is_unchanged() {
        let router = I18nRouter::new(table());
        let raw = table().match_path("/").unwrap();
        assert_eq!(router.match_path("/").unwrap(), raw);
    }

    #[test]
    fn test_match_with_foreign_suffix_is_unchanged() {
        // "legacy.fr" carries _locale=de, so nothing is stripped
        let router = I18nRouter::new(table());
        let matched = router.match_path("/legacy").unwrap();
        assert_eq!(matched.route(), Some("legacy.fr"));
    }

    #[test]
    fn test_match_translates_marked_attributes() {
        let translator = Arc::new(RecordingTranslator::default());
        let router = I18nRouter::builder()
            .router(table())
            .shared_translator(translator.clone())
            .build()
            .unwrap();

        let matched = router.match_path("/fr/article/a-propos").unwrap();
        assert_eq!(matched.route(), Some("article"));
        assert_eq!(matched.get_str("title"), Some("neutral-a-propos"));
        assert_eq!(
            translator.calls(),
            vec![(
                "translate".to_string(),
                "article".to_string(),
                "fr".to_string(),
                "title".to_string(),
                "a-propos".to_string(),
            )]
        );
    }

    #[test]
    fn test_match_without_translator_keeps_values() {
        let router = I18nRouter::new(table());
        let matched = router.match_path("/fr/article/a-propos").unwrap();
        assert_eq!(matched.route(), Some("article"));
        assert_eq!(matched.get_str("title"), Some("a-propos"));
    }

    #[test]
    fn test_match_request_filters() {
        let router = I18nRouter::new(table());
        let request = Request::builder().uri("/en/about").body(()).unwrap();
        assert_eq!(router.match_request(&request).unwrap().route(), Some("about"));
    }

    #[test]
    fn test_match_not_found_propagates() {
        let router = I18nRouter::new(table());
        let err = router.match_path("/de/ueber").unwrap_err();
        assert_eq!(err, RoutingError::resource_not_found("/de/ueber"));
    }

    #[test]
    fn test_match_translation_error_propagates() {
        let router = I18nRouter::builder()
            .router(table())
            .translator(FailingTranslator)
            .build()
            .unwrap();
        assert!(matches!(
            router.match_path("/en/article/x"),
            Err(RoutingError::Translation(_))
        ));
    }

    #[test]
    fn test_match_ignores_query_string_for_both_backends() {
        let full = I18nRouter::new(table());
        let split = I18nRouter::builder()
            .matcher(table())
            .generator(table())
            .build()
            .unwrap();

        for router in [&full, &split] {
            let matched = router.match_path("/fr/a-propos?x=1").unwrap();
            assert_eq!(matched.route(), Some("about"));
            assert_eq!(matched.locale(), Some("fr"));
        }
        assert_eq!(
            full.match_path("/nowhere?x=1").unwrap_err(),
            split.match_path("/nowhere?x=1").unwrap_err()
        );
    }

    #[test]
    fn test_match_rejects_invalid_path_for_both_backends() {
        let full = I18nRouter::new(table());
        let split = I18nRouter::builder()
            .matcher(table())
            .generator(table())
            .build()
            .unwrap();

        for router in [&full, &split] {
            let err = router.match_path("/fr/a propos").unwrap_err();
            assert!(matches!(err, RoutingError::InvalidPath { ref path, .. } if path == "/fr/a propos"));
        }
    }

    // ==================== Nesting Tests ====================

    #[test]
    fn test_facade_can_decorate_a_facade() {
        let inner = I18nRouter::builder()
            .router(table())
            .translator(CatalogTranslator::new().with("article", "fr", "title", "hello", "bonjour"))
            .build()
            .unwrap();
        let outer = I18nRouter::new(inner);

        assert_eq!(outer.route_collection().map(RouteCollection::len), Some(6));

        let url = generate(&outer, "about", Parameters::new(), GenerateOptions::locale("fr")).unwrap();
        assert_eq!(url, "/fr/a-propos");

        let matched = outer.match_path("/fr/article/bonjour").unwrap();
        assert_eq!(matched.route(), Some("article"));
        assert_eq!(matched.get_str("title"), Some("hello"));
    }

    #[test]
    fn test_outer_facade_reports_localized_not_found() {
        let outer = I18nRouter::new(I18nRouter::new(table()));
        let err = generate(&outer, "about", Parameters::new(), GenerateOptions::locale("de")).unwrap_err();
        assert_eq!(err, RoutingError::localized_route_not_found("about", "de"));
    }

    // ==================== Custom Inflector Tests ====================

    struct PrefixInflector;

    impl RouteNameInflector for PrefixInflector {
        fn inflect(&self, name: &str, locale: &str) -> String {
            format!("{}__{}", locale, name)
        }

        fn recognize(&self, name: &str, locale: &str) -> Option<String> {
            name.strip_prefix(&format!("{}__", locale)).map(str::to_string)
        }
    }

    #[test]
    fn test_custom_inflector_is_used_both_ways() {
        let mut routes = RouteCollection::new();
        routes.add_localized("about", [("fr", "/fr/a-propos")], &Route::default(), &PrefixInflector);
        let router = I18nRouter::builder()
            .router(RouteTable::new(routes).unwrap())
            .inflector(PrefixInflector)
            .build()
            .unwrap();

        let url = generate(&router, "about", Parameters::new(), GenerateOptions::locale("fr")).unwrap();
        assert_eq!(url, "/fr/a-propos");
        assert_eq!(router.match_path("/fr/a-propos").unwrap().route(), Some("about"));
    }

    // ==================== Context Tests ====================

    #[test]
    fn test_context_delegation() {
        let mut router = I18nRouter::new(table());
        assert!(!router.context().has_parameter("_locale"));

        router.set_context(RequestContext::default().with_parameter("_locale", "en"));
        assert_eq!(router.context().parameter("_locale"), Some("en"));
        let url = generate(&router, "about", Parameters::new(), GenerateOptions::new()).unwrap();
        assert_eq!(url, "/en/about");
    }

    #[test]
    fn test_set_default_locale_empty_clears() {
        let mut router = I18nRouter::builder().router(table()).default_locale("en").build().unwrap();
        router.set_default_locale("");
        assert_eq!(router.default_locale(), None);
    }
}

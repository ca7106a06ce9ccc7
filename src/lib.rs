pub mod config;
pub mod error;
pub mod routing;
pub mod server;

pub use error::{RoutingError, RoutingResult, TranslationError};
pub use routing::{GenerateOptions, I18nRouter, ParamValue, Parameters, RouteMatch};

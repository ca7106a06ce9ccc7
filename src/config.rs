use anyhow::{Context, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Locale
    pub default_locale: Option<String>,

    // Route and translation sources
    pub routes_file: String,
    pub translations_file: Option<String>,

    // Request context used for URL generation
    pub base_url: String,
    pub host: String,
    pub scheme: String,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Empty means "no default locale"
            default_locale: std::env::var("DEFAULT_LOCALE")
                .ok()
                .filter(|locale| !locale.trim().is_empty()),

            routes_file: std::env::var("ROUTES_FILE")
                .unwrap_or_else(|_| "routes.json".to_string()),
            translations_file: std::env::var("TRANSLATIONS_FILE")
                .ok()
                .filter(|path| !path.trim().is_empty()),

            base_url: std::env::var("BASE_URL").unwrap_or_default(),
            host: std::env::var("HOST").unwrap_or_else(|_| "localhost".to_string()),
            scheme: std::env::var("SCHEME").unwrap_or_else(|_| "http".to_string()),

            port: match std::env::var("PORT") {
                Ok(port) => port
                    .parse()
                    .with_context(|| format!("PORT must be a port number, got '{}'", port))?,
                Err(_) => 8080,
            },
        })
    }
}

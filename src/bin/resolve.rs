//! Resolve binary - match paths and generate URLs against the configured routes
//!
//! Usage:
//!   cargo run --bin resolve match /fr/a-propos
//!   cargo run --bin resolve generate about locale=fr
//!   cargo run --bin resolve generate article locale=fr translate=title title=news
//!   cargo run --bin resolve routes
//!
//! Uses the same environment as the server (ROUTES_FILE, TRANSLATIONS_FILE,
//! DEFAULT_LOCALE, BASE_URL, HOST, SCHEME).

use anyhow::{bail, Context, Result};
use i18n_routing::config::Config;
use i18n_routing::routing::{
    GenerateOptions, ParamValue, Parameters, ReferenceType, RouteCollectionProvider, UrlMatcher,
    TRANSLATE_OPTION,
};
use i18n_routing::{server, I18nRouter};
use tracing::info;

fn print_usage() {
    println!("Usage:");
    println!("  resolve match <path>                        Match a path and print the attributes");
    println!("  resolve generate <route> [key=value ...]    Generate a URL (locale=, translate=a,b)");
    println!("  resolve routes                              List the loaded route names");
}

/// Parse `key=value` arguments; `translate` takes a comma-separated list.
fn parse_parameters(args: &[String]) -> Result<Parameters> {
    let mut parameters = Parameters::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            bail!("Expected key=value, got '{}'", arg);
        };
        let value = if key == TRANSLATE_OPTION {
            ParamValue::List(value.split(',').map(str::to_string).collect())
        } else {
            ParamValue::Single(value.to_string())
        };
        parameters.insert(key.to_string(), value);
    }
    Ok(parameters)
}

fn match_command(router: &I18nRouter, path: &str) -> Result<()> {
    let matched = router.match_path(path)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&matched).context("Failed to render match")?
    );
    Ok(())
}

fn generate_command(router: &I18nRouter, name: &str, args: &[String]) -> Result<()> {
    let mut parameters = parse_parameters(args)?;
    let options = GenerateOptions::take_from(&mut parameters);
    let url = router.generate_with_options(name, parameters, &options, ReferenceType::AbsoluteUrl)?;
    println!("{}", url);
    Ok(())
}

fn routes_command(router: &I18nRouter) -> Result<()> {
    let Some(routes) = router.route_collection() else {
        bail!("The configured router exposes no route collection");
    };
    for (name, route) in routes.iter() {
        println!("{:<30} {}", name, route.path);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("i18n_routing=warn".parse()?)
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let config = Config::from_env()?;
    let router = server::build_router(&config)?;
    info!("Router ready");

    match (args[1].as_str(), args.get(2)) {
        ("match", Some(path)) => match_command(&router, path),
        ("generate", Some(name)) => generate_command(&router, name, &args[3..]),
        ("routes", _) => routes_command(&router),
        ("--help" | "-h" | "help", _) => {
            print_usage();
            Ok(())
        }
        (command, _) => {
            print_usage();
            bail!("Unknown or incomplete command: {}", command)
        }
    }
}

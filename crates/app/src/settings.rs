//! Handles settings for the application.
//!
//! Values are layered: built-in defaults, then the TOML file (see
//! `config/settings.toml`), then `EXPENSE_PREDICTOR_*` environment variables,
//! then command line flags.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/settings.toml";
const ENV_PREFIX: &str = "EXPENSE_PREDICTOR";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub allowed_origin: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5001,
            allowed_origin: server::ServerOptions::default().allowed_origin,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Prediction {
    pub horizon_days: u32,
}

impl Default for Prediction {
    fn default() -> Self {
        Self {
            horizon_days: engine::DEFAULT_HORIZON_DAYS,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub prediction: Prediction,
}

#[derive(Debug, Default, Parser)]
#[command(name = "expense_predictor", version)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override listen address.
    #[arg(long)]
    bind: Option<String>,
    /// Override listen port.
    #[arg(long)]
    port: Option<u16>,
    /// Override the origin allowed by CORS (e.g. http://localhost:3000).
    #[arg(long)]
    allowed_origin: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(Args::parse(), environment())
    }

    fn load(args: Args, environment: Environment) -> Result<Self, ConfigError> {
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(config_path).required(args.config.is_some()))
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        if let Some(bind) = args.bind {
            settings.server.bind = bind;
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }
        if let Some(allowed_origin) = args.allowed_origin {
            settings.server.allowed_origin = allowed_origin;
        }
        if let Some(level) = args.log_level {
            settings.app.level = level;
        }

        Ok(settings)
    }
}

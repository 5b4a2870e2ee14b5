use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "PORTFOLIO_ENV";
const CONFIG_DIR_ENV: &str = "PORTFOLIO_CONFIG_DIR";
const ENV_PREFIX: &str = "PORTFOLIO";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub content: ContentSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub site: SiteSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            // Default to repo root `config` directory.
            Err(_) => std::env::current_dir()
                .with_context(|| "unable to resolve current directory")?
                .join("config"),
        };

        Self::load_from(&config_dir, &environment)
    }

    /// Load `base.toml` and `<environment>.toml` from `config_dir`, then apply
    /// `PORTFOLIO_<SECTION>__<KEY>` environment overrides.
    pub fn load_from(config_dir: &Path, environment: &str) -> anyhow::Result<Self> {
        let parsed_environment: Environment = environment.parse()?;

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            );

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        settings.environment = parsed_environment;

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

/// Where the read-only site content lives.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentSettings {
    /// Root directory holding `books/` and `catalog.json`
    #[serde(default = "ContentSettings::default_root")]
    pub root: PathBuf,
}

impl ContentSettings {
    fn default_root() -> PathBuf {
        PathBuf::from("content")
    }

    pub fn books_dir(&self) -> PathBuf {
        self.root.join("books")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join("catalog.json")
    }
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "TelemetrySettings::default_log_level")]
    pub log_level: String,
}

impl TelemetrySettings {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_level: Self::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Page-shell configuration: site title and navigation sections.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    #[serde(default = "SiteSettings::default_title")]
    pub title: String,
    #[serde(default = "SiteSettings::default_nav")]
    pub nav: Vec<NavSection>,
}

impl SiteSettings {
    fn default_title() -> String {
        "Portfolio".to_string()
    }

    fn default_nav() -> Vec<NavSection> {
        vec![
            NavSection {
                title: "NAVIGATION".to_string(),
                links: vec![NavLink::internal("Home", "/"), NavLink::internal("Writing", "/writing")],
            },
            NavSection {
                title: "FAVORITES".to_string(),
                links: vec![NavLink::internal("Books", "/books")],
            },
        ]
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            nav: Self::default_nav(),
        }
    }
}

/// A titled group of navigation links.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NavSection {
    pub title: String,
    #[serde(default)]
    pub links: Vec<NavLink>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub external: bool,
    /// File name offered to the browser when the link is a download
    #[serde(default)]
    pub download: Option<String>,
}

impl NavLink {
    pub fn internal(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            external: false,
            download: None,
        }
    }
}

use crate::domain::advisory::AdvisoryRule;
use crate::domain::derived::DerivedFormula;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

const ENV_PREFIX: &str = "KORU";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct InfluxConfig {
    pub influx: InfluxSettings,
    #[serde(default)]
    pub client: ClientSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Connection to the InfluxDB 2 query API; none of these have defaults
#[derive(Deserialize, Clone)]
pub struct InfluxSettings {
    pub url: String,
    pub token: String,
    pub org: String,
    pub bucket: String,
}

impl fmt::Debug for InfluxSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfluxSettings")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("org", &self.org)
            .field("bucket", &self.bucket)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_points")]
    pub max_points: usize,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_points: default_max_points(),
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
    #[serde(default = "AdvisoryRule::defaults")]
    pub advisories: Vec<AdvisoryRule>,
    /// External dashboards embedded as-is; their time range lives in the URL
    #[serde(default)]
    pub panels: Vec<PanelConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub id: String,
    pub label: String,
    pub unit: Option<String>,
    pub measurement: String,
    #[serde(flatten)]
    pub source: SeriesSource,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum SeriesSource {
    Field {
        field: String,
    },
    Derived {
        derived_from: [String; 3],
        #[serde(default)]
        formula: DerivedFormula,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct PanelConfig {
    pub title: String,
    pub url: String,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_points() -> usize {
    500
}

fn default_max_connections() -> usize {
    4
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_title() -> String {
    "Koru Smart Garden".to_string()
}

/// Load store settings from `config/influx` and `KORU_*` environment overrides
pub fn load_influx_config() -> Result<InfluxConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/influx").required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

    parse_influx_config(builder.build()?)
}

pub fn load_dashboard_config() -> Result<DashboardConfig, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .build()?;

    parse_dashboard_config(settings)
}

fn parse_influx_config(settings: config::Config) -> Result<InfluxConfig, ConfigError> {
    for key in ["url", "token", "org", "bucket"] {
        match settings.get_string(&format!("influx.{key}")) {
            Ok(value) if !value.trim().is_empty() => {}
            _ => return Err(ConfigError::Missing(influx_key(key))),
        }
    }

    let config: InfluxConfig = settings.try_deserialize()?;
    if config.client.timeout_secs == 0 {
        return Err(ConfigError::Invalid("client.timeout_secs must be positive".into()));
    }
    if config.client.max_connections == 0 {
        return Err(ConfigError::Invalid("client.max_connections must be positive".into()));
    }
    Ok(config)
}

fn parse_dashboard_config(settings: config::Config) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = settings.try_deserialize()?;

    let mut seen = std::collections::HashSet::new();
    for series in &config.series {
        if !seen.insert(series.id.as_str()) {
            return Err(ConfigError::Invalid(format!("duplicate series id `{}`", series.id)));
        }
    }
    for rule in &config.advisories {
        if !seen.contains(rule.series.as_str()) {
            tracing::warn!(
                "Advisory rule for `{}` watches an unconfigured series and will always report no data",
                rule.series
            );
        }
    }

    Ok(config)
}

fn influx_key(key: &str) -> &'static str {
    match key {
        "url" => "influx.url",
        "token" => "influx.token",
        "org" => "influx.org",
        _ => "influx.bucket",
    }
}

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use jsonschema::{validator_for, Validator};
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::color::HexColor;
use crate::export::DEFAULT_STEM;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the profile service API (e.g., <http://127.0.0.1:8000>)
    pub api_base_url: String,
    /// Origin the shareable profile links point at (e.g., <https://qwik.example.com>)
    pub public_origin: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            public_origin: DEFAULT_PUBLIC_ORIGIN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct ExportConfig {
    /// File stem used when the profile has no name
    pub default_stem: String,
    /// Code colour, `#RGB` or `#RRGGBB`
    #[schemars(with = "String")]
    pub foreground: HexColor,
    /// Background colour painted under the code
    #[schemars(with = "String")]
    pub background: HexColor,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_stem: DEFAULT_STEM.to_string(),
            foreground: HexColor::BLACK,
            background: HexColor::WHITE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

static CONFIG_SCHEMA: Lazy<Validator> = Lazy::new(|| {
    let schema = schemars::schema_for!(Config);
    let schema_value = serde_json::to_value(&schema).expect("schema value");
    validator_for(&schema_value).expect("valid schema")
});

/// Returns the JSON schema describing the configuration file.
///
/// # Panics
///
/// Panics if schema generation fails; this indicates a programming error.
pub fn config_schema_json() -> serde_json::Value {
    let schema = schemars::schema_for!(Config);
    serde_json::to_value(&schema).expect("schema json")
}

/// Load, schema-check and normalize a TOML configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    parse_config(&content).with_context(|| format!("load config {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)?;
    let json_value = serde_json::to_value(&raw)?;
    let validation_errors: Vec<_> = CONFIG_SCHEMA
        .iter_errors(&json_value)
        .map(|e| e.to_string())
        .collect();
    if !validation_errors.is_empty() {
        return Err(anyhow!(validation_errors.join(", ")));
    }
    let cfg: Config = toml::from_str(content)?;
    cfg.normalized()
}

impl Config {
    /// Replace the service addresses with explicit values, e.g. from CLI
    /// flags or the environment.
    pub fn with_overrides(
        mut self,
        api_base_url: Option<String>,
        public_origin: Option<String>,
    ) -> Result<Self> {
        if let Some(base) = api_base_url.filter(|s| !s.trim().is_empty()) {
            self.service.api_base_url = base;
        }
        if let Some(origin) = public_origin.filter(|s| !s.trim().is_empty()) {
            self.service.public_origin = origin;
        }
        self.normalized()
    }

    fn normalized(mut self) -> Result<Self> {
        self.service.api_base_url = normalize_base(&self.service.api_base_url)
            .context("service.api_base_url")?;
        self.service.public_origin = normalize_base(&self.service.public_origin)
            .context("service.public_origin")?;
        if self.service.timeout_secs == 0 {
            bail!("service.timeout_secs must be greater than zero");
        }
        Ok(self)
    }
}

fn normalize_base(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).with_context(|| format!("invalid URL {trimmed:?}"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => bail!("unsupported URL scheme {other:?} in {trimmed:?}"),
    }
    if url.host_str().is_none() {
        bail!("URL {trimmed:?} has no host");
    }
    Ok(trimmed.to_string())
}

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use qwikcard_core::{load_config, Config};

pub(crate) const CONFIG_ENV: &str = "QWIKCARD_CONFIG";
pub(crate) const API_URL_ENV: &str = "QWIKCARD_API_URL";
pub(crate) const PUBLIC_ORIGIN_ENV: &str = "QWIKCARD_PUBLIC_ORIGIN";

#[derive(Args, Clone, Default)]
pub struct GlobalArgs {
    /// Path to a TOML config file; falls back to QWIKCARD_CONFIG env
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Base URL of the profile service; falls back to QWIKCARD_API_URL env
    #[arg(long, global = true)]
    pub api_base: Option<String>,
    /// Origin used for shareable profile links; falls back to QWIKCARD_PUBLIC_ORIGIN env
    #[arg(long, global = true)]
    pub public_origin: Option<String>,
    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

/// Read an environment variable, treating blank values as unset.
pub(crate) fn env_nonempty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Build the effective configuration: file (if any), then environment, then
/// flags.
pub(crate) fn resolve_config(args: &GlobalArgs) -> Result<Config> {
    let path = args
        .config
        .clone()
        .or_else(|| env_nonempty(CONFIG_ENV).map(PathBuf::from));
    let base = match path {
        Some(path) => load_config(&path)?,
        None => Config::default(),
    };
    let api_base = args.api_base.clone().or_else(|| env_nonempty(API_URL_ENV));
    let origin = args
        .public_origin
        .clone()
        .or_else(|| env_nonempty(PUBLIC_ORIGIN_ENV));
    let mut config = base.with_overrides(api_base, origin)?;
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            bail!("--timeout must be greater than zero");
        }
        config.service.timeout_secs = timeout;
    }
    tracing::debug!(
        api_base = %config.service.api_base_url,
        public_origin = %config.service.public_origin,
        "configuration resolved"
    );
    Ok(config)
}

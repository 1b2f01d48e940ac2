//! Tracing setup shared by QwikCard binaries.
//!
//! Console output always goes to stderr, filtered by `RUST_LOG` (default
//! `info`). With `QWIKCARD_LOG_ROLL=1` the same events are also written to a
//! rolling file under `QWIKCARD_LOG_DIR` (default `logs`).

use once_cell::sync::OnceCell;
use tracing_subscriber::{
    fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

static FILE_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// Rotation cadence for the optional file log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Minutely,
    Hourly,
    Daily,
}

impl Rotation {
    pub fn from_slug(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "hourly" => Rotation::Hourly,
            "minutely" => Rotation::Minutely,
            _ => Rotation::Daily,
        }
    }
}

pub fn init() {
    init_with_default("info");
}

/// Like [`init`], with a caller-chosen filter when `RUST_LOG` is unset.
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    let registry = tracing_subscriber::registry().with(console);

    if std::env::var("QWIKCARD_LOG_ROLL").ok().as_deref() == Some("1") {
        let dir = std::env::var("QWIKCARD_LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        let prefix = std::env::var("QWIKCARD_LOG_PREFIX").unwrap_or_else(|_| "qwikcard".into());
        let rotation = std::env::var("QWIKCARD_LOG_ROTATION")
            .map(|v| Rotation::from_slug(&v))
            .unwrap_or(Rotation::Daily);
        // Reported once a subscriber is installed.
        let dir_error = prepare_log_dir(&dir);
        let writer = match rotation {
            Rotation::Hourly => tracing_appender::rolling::hourly(&dir, &prefix),
            Rotation::Minutely => tracing_appender::rolling::minutely(&dir, &prefix),
            Rotation::Daily => tracing_appender::rolling::daily(&dir, &prefix),
        };
        let (nb, guard) = tracing_appender::non_blocking(writer);
        let _ = FILE_GUARD.set(guard);
        let file_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(nb)
            .with_filter(file_filter);
        let _ = registry.with(file_layer).try_init();
        if let Some(err) = dir_error {
            tracing::warn!(directory = %dir, error = %err, "failed to create log directory");
        }
    } else {
        let _ = registry.try_init();
    }
}

fn prepare_log_dir(dir: &str) -> Option<std::io::Error> {
    std::fs::create_dir_all(dir).err()
}

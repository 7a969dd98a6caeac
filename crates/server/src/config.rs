use std::{fs, net::SocketAddr, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use url::Url;

pub const SETTINGS_FILE: &str = "posts.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: String,
    pub event_bus_url: Option<String>,
    pub notify_timeout_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:4000".into(),
            event_bus_url: Some("http://localhost:4005/events".into()),
            notify_timeout_ms: 5_000,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.bind_addr))
    }

    pub fn event_bus_url(&self) -> anyhow::Result<Option<Url>> {
        self.event_bus_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid event bus url '{raw}'")))
            .transpose()
    }

    pub fn notify_timeout(&self) -> Duration {
        Duration::from_millis(self.notify_timeout_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    event_bus_url: Option<String>,
    notify_timeout_ms: Option<u64>,
    log_filter: Option<String>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            if let Some(v) = file_cfg.bind_addr {
                settings.bind_addr = v;
            }
            if let Some(v) = file_cfg.event_bus_url {
                settings.event_bus_url = non_empty(v);
            }
            if let Some(v) = file_cfg.notify_timeout_ms {
                settings.notify_timeout_ms = v;
            }
            if let Some(v) = file_cfg.log_filter {
                settings.log_filter = v;
            }
        }
    }

    if let Some(v) = env("POSTS_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }

    if let Some(v) = env("EVENT_BUS_URL") {
        settings.event_bus_url = non_empty(v);
    }
    if let Some(v) = env("APP__EVENT_BUS_URL") {
        settings.event_bus_url = non_empty(v);
    }

    if let Some(v) = env("APP__NOTIFY_TIMEOUT_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.notify_timeout_ms = parsed;
        }
    }

    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }

    settings
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

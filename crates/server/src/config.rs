use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub static_dir: Option<String>,
    pub log_filter: String,
    pub max_body_bytes: usize,
    pub ping_message: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "0.0.0.0:3000".into(),
            static_dir: None,
            log_filter: "info".into(),
            max_body_bytes: 64 * 1024,
            ping_message: "Hello from the intake server".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    static_dir: Option<String>,
    log_filter: Option<String>,
    max_body_bytes: Option<usize>,
    ping_message: Option<String>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file (if readable), then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            if let Some(v) = file_cfg.bind_addr {
                settings.server_bind = v;
            }
            if let Some(v) = file_cfg.static_dir {
                settings.static_dir = Some(v);
            }
            if let Some(v) = file_cfg.log_filter {
                settings.log_filter = v;
            }
            if let Some(v) = file_cfg.max_body_bytes {
                settings.max_body_bytes = v;
            }
            if let Some(v) = file_cfg.ping_message {
                settings.ping_message = v;
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }
    if let Some(port) = env("PORT") {
        settings.server_bind = with_port(&settings.server_bind, &port);
    }

    if let Some(v) = env("STATIC_DIR") {
        settings.static_dir = Some(v);
    }
    if let Some(v) = env("APP__STATIC_DIR") {
        settings.static_dir = Some(v);
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = env("APP__MAX_BODY_BYTES") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_body_bytes = parsed;
        }
    }

    if let Some(v) = env("APP__PING_MESSAGE") {
        settings.ping_message = v;
    }

    settings
}

/// Swaps the port of `bind`; leaves it alone when either side doesn't parse.
fn with_port(bind: &str, port: &str) -> String {
    match (bind.parse::<SocketAddr>(), port.trim().parse::<u16>()) {
        (Ok(mut addr), Ok(port)) => {
            addr.set_port(port);
            addr.to_string()
        }
        _ => bind.to_string(),
    }
}

pub fn resolve_static_dir(raw_static_dir: Option<&str>) -> anyhow::Result<Option<PathBuf>> {
    let Some(raw) = raw_static_dir.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let dir = PathBuf::from(raw);
    let metadata = fs::metadata(&dir)
        .with_context(|| format!("failed to read static directory '{}'", dir.display()))?;
    if !metadata.is_dir() {
        bail!("static directory '{}' is not a directory", dir.display());
    }

    Ok(Some(dir))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

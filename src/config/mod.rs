use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::OnceCell;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod config_dir;
pub use config_dir::{find_config_file, read_config};

mod error;
pub use error::{ConfigError, ConfigResult};

#[derive(Debug, Deserialize)]
pub struct Config {
    host: Host,
    app: App,
}

#[derive(Debug, Deserialize)]
pub struct Host {
    bindto: String,
}

#[derive(Debug, Deserialize)]
pub struct App {
    jwt: String,
    #[serde(default)]
    docs: bool,
    /// Bundled seed catalog when unset.
    catalog_path: Option<PathBuf>,
    #[serde(default = "default_load_delay_ms")]
    load_delay_ms: u64,
    #[serde(default = "default_toast_dismiss_ms")]
    toast_dismiss_ms: u64,
    #[serde(default = "default_mentorship_delay_ms")]
    mentorship_delay_ms: u64,
    /// Lesson sessions left untouched this long are closed.
    #[serde(default = "default_session_idle_ms")]
    session_idle_ms: u64,
}

fn default_load_delay_ms() -> u64 {
    1500
}

fn default_toast_dismiss_ms() -> u64 {
    5000
}

fn default_mentorship_delay_ms() -> u64 {
    1500
}

fn default_session_idle_ms() -> u64 {
    30 * 60 * 1000
}

impl Config {
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                let read_cfg = |use_local| -> ConfigResult<Self> {
                    let bytes = read_config(use_local)?;
                    Self::from_slice(&bytes)
                };

                match read_cfg(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        match e {
                            ConfigError::NotFound(path) => {
                                tracing::error!("Config not found at {}.", path.display());
                            }
                            e => crate::error::log_error(&e),
                        }
                        std::process::exit(1);
                    }
                }
            })
            .await
    }

    /// Parses a configuration without touching the process-wide instance.
    pub fn from_slice(bytes: &[u8]) -> ConfigResult<Self> {
        Ok(toml::from_slice(bytes)?)
    }

    #[inline]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[inline]
    pub fn app(&self) -> &App {
        &self.app
    }
}

impl Host {
    #[inline]
    pub fn bindto(&self) -> &str {
        &self.bindto
    }
}

impl App {
    #[inline]
    pub fn jwt(&self) -> &str {
        &self.jwt
    }

    #[inline]
    pub fn docs(&self) -> bool {
        self.docs
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    pub fn toast_dismiss(&self) -> Duration {
        Duration::from_millis(self.toast_dismiss_ms)
    }

    pub fn mentorship_delay(&self) -> Duration {
        Duration::from_millis(self.mentorship_delay_ms)
    }

    pub fn session_idle(&self) -> Duration {
        Duration::from_millis(self.session_idle_ms)
    }
}

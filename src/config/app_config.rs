use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use super::probe_config::ProbeConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{field} must be at least 1 second")]
    ZeroTimeout { field: &'static str },

    #[error("invalid base url {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

pub struct AppConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub fetch_timeout: Duration,
    pub target_user_id: String,
    pub mock_bearer_token: String,
}

/// Load the application configuration from the optional YAML file named by
/// `CONFIG_FILE` (default `probe.yml`) and the `PROBE_BASE_URL` override.
/// Expects `.env` to have been loaded by the caller.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let config_file_location =
        env::var("CONFIG_FILE").unwrap_or_else(|_| "probe.yml".to_string());
    let base_url_override = env::var("PROBE_BASE_URL").ok();

    load_config_from(Path::new(&config_file_location), base_url_override)
}

/// A missing file is not an error; the built-in defaults are used instead.
pub fn load_config_from(
    path: &Path,
    base_url_override: Option<String>,
) -> Result<AppConfig, ConfigError> {
    let mut config = match std::fs::read_to_string(path) {
        Ok(contents) => serde_yaml::from_str::<ProbeConfig>(&contents).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No config file at {}, using defaults", path.display());
            ProbeConfig::default()
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if let Some(url) = base_url_override.filter(|u| !u.trim().is_empty()) {
        config.base_url = url.trim().to_string();
    }

    AppConfig::try_from(config)
}

impl TryFrom<ProbeConfig> for AppConfig {
    type Error = ConfigError;

    fn try_from(config: ProbeConfig) -> Result<Self, Self::Error> {
        let base_url = Url::parse(&config.base_url).map_err(|source| ConfigError::BaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        if config.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "timeout_seconds",
            });
        }
        if config.fetch_timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "fetch_timeout_seconds",
            });
        }

        Ok(AppConfig {
            base_url,
            timeout: Duration::from_secs(config.timeout_seconds),
            fetch_timeout: Duration::from_secs(config.fetch_timeout_seconds),
            target_user_id: config.target_user_id,
            mock_bearer_token: config.mock_bearer_token,
        })
    }
}

/// Log filter for `env_logger`: the process `RUST_LOG` wins, then a
/// `RUST_LOG` line in the `.env` file, then `warn`.
pub fn log_filter(process_value: Option<String>, dotenv_file: Option<&Path>) -> String {
    if let Some(filter) = process_value.filter(|f| !f.trim().is_empty()) {
        return filter;
    }

    dotenv_file
        .and_then(|path| dotenvy::from_path_iter(path).ok())
        .and_then(|vars| {
            vars.filter_map(Result::ok)
                .find(|(key, _)| key == "RUST_LOG")
                .map(|(_, value)| value)
        })
        .unwrap_or_else(|| "warn".to_string())
}

/// Builds the shared HTTP client with the run-wide timeout.
pub fn setup_client(config: &AppConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!("apiprobe/", env!("CARGO_PKG_VERSION")))
        .build()
}

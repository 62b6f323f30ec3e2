use anyhow::{Context, Result, ensure};
use directories::ProjectDirs;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

pub const API_TOKEN_ENV: &str = "EODHD_API_TOKEN";
pub const BASE_URL_ENV: &str = "EODHD_BASE_URL";
pub const BIND_ENV: &str = "STOCKCMP_BIND";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub exchange: String,
    #[serde(deserialize_with = "deserialize_token")]
    pub api_token: Option<SecretString>,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: "https://eodhistoricaldata.com".to_string(),
            exchange: "US".to_string(),
            api_token: None,
            timeout_secs: 30,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.timeout_secs > 0,
            "provider.timeout_secs must be greater than 0"
        );
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub server: ServerConfig,
}

fn deserialize_token<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let token = Option::<String>::deserialize(deserializer)?;
    Ok(token.and_then(into_secret))
}

fn into_secret(token: String) -> Option<SecretString> {
    let token = token.trim();
    (!token.is_empty()).then(|| SecretString::new(token.into()))
}

impl AppConfig {
    /// Loads configuration from `path`, or from the default location when it
    /// exists, then applies environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => {
                let default_path = Self::default_config_path()?;
                if default_path.exists() {
                    Self::load_from_path(&default_path)?
                } else {
                    debug!(
                        "No config file at {}, using defaults",
                        default_path.display()
                    );
                    Self::default()
                }
            }
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "stockcmp", "stockcmp")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .provider
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Environment values win over the file. Blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(token) = value(API_TOKEN_ENV).and_then(into_secret) {
            debug!("Using API token from {}", API_TOKEN_ENV);
            self.provider.api_token = Some(token);
        }
        if let Some(base_url) = value(BASE_URL_ENV) {
            self.provider.base_url = base_url.trim().to_string();
        }
        if let Some(bind) = value(BIND_ENV) {
            self.server.bind = bind.trim().to_string();
        }
    }

    pub fn api_token(&self) -> Result<&SecretString> {
        self.provider.api_token.as_ref().with_context(|| {
            format!("No API token configured; set {API_TOKEN_ENV} or provider.api_token")
        })
    }
}

use std::env;
use std::fmt::{Debug, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::error::Error;

pub const CONFIG_PATH_VAR: &str = "ADGENIUS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "adgenius.toml";

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_address: String,
    /// Origin that share links are built on.
    pub public_url: String,
    /// Used when `RUST_LOG` is not set.
    pub log_level: String,
    pub storage: StorageConfig,
    pub provider: ProviderConfig,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            bind_address: "127.0.0.1:8080".into(),
            public_url: "http://localhost:8080".into(),
            log_level: "info".into(),
            storage: StorageConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StorageConfig {
    Mongo {
        #[serde(default = "default_mongo_uri")]
        uri: String,
        #[serde(default = "default_mongo_database")]
        database: String,
    },
    Memory,
}

impl Default for StorageConfig {
    fn default() -> StorageConfig {
        StorageConfig::Mongo {
            uri: default_mongo_uri(),
            database: default_mongo_database(),
        }
    }
}

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".into()
}

fn default_mongo_database() -> String {
    "adgenius".into()
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> ProviderConfig {
        ProviderConfig {
            endpoint: "https://api.openai.com/v1/chat/completions".into(),
            model: "gpt-4".into(),
            temperature: 0.7,
            timeout_secs: 60,
            api_key: None,
        }
    }
}

impl Debug for ProviderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Reads the TOML file named by `ADGENIUS_CONFIG` (or `adgenius.toml` if
    /// present) and applies environment overrides on top.
    pub fn load() -> Result<Config, Error> {
        let mut config = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Config::from_file(&PathBuf::from(path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Config::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            Err(_) => Config::default(),
        };

        config.apply_overrides(|key| env::var(key).ok());

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config, Error> {
        let text = fs::read_to_string(path)?;
        Config::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Config, Error> {
        toml::from_str(text).map_err(|err| Error::InvalidConfig {
            reason: err.to_string(),
        })
    }

    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind_address) = var("ADGENIUS_BIND") {
            self.bind_address = bind_address;
        }
        if let Some(public_url) = var("ADGENIUS_PUBLIC_URL") {
            self.public_url = public_url;
        }
        if let Some(mongo_uri) = var("ADGENIUS_MONGODB_URI") {
            let database = match &self.storage {
                StorageConfig::Mongo { database, .. } => database.clone(),
                StorageConfig::Memory => default_mongo_database(),
            };
            self.storage = StorageConfig::Mongo {
                uri: mongo_uri,
                database,
            };
        }
        if let Some(api_key) = var("OPENAI_API_KEY") {
            self.provider.api_key = Some(api_key);
        }
    }

    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

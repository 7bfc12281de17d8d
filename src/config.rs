//! Picks the base urls the rest of the front end talks to, based on where it is served from.

use log::info;
use std::fmt;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_STATIC_BASE_URL: &str = "../Backend/Static/public";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// `localhost` exactly, or anything mentioning 127.0.0.1, is a development box.
    pub fn from_host(host: &str) -> Self {
        if host == "localhost" || host.contains("127.0.0.1") {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    pub static_base_url: String,
}

impl Config {
    /// Selects against the stock environments. Call once at startup and hand the result around.
    pub fn init(host: &str) -> Self {
        Environments::default().resolve(host)
    }
}

/// The two records we choose between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environments {
    pub development: Config,
    pub production: Config,
}

impl Default for Environments {
    // Both point at the same api for now. Override through the cli if that ever changes.
    fn default() -> Self {
        let record = Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            static_base_url: DEFAULT_STATIC_BASE_URL.to_string(),
        };
        Environments {
            development: record.clone(),
            production: record,
        }
    }
}

impl Environments {
    pub fn get(&self, environment: Environment) -> &Config {
        match environment {
            Environment::Development => &self.development,
            Environment::Production => &self.production,
        }
    }

    pub fn get_mut(&mut self, environment: Environment) -> &mut Config {
        match environment {
            Environment::Development => &mut self.development,
            Environment::Production => &mut self.production,
        }
    }

    pub fn resolve(&self, host: &str) -> Config {
        let environment = Environment::from_host(host);
        let config = self.get(environment).clone();
        info!("Running in {} mode", environment);
        info!("API Base URL: {}", config.api_base_url);
        info!("Static Base URL: {}", config.static_base_url);
        config
    }
}

use crate::error::ConfigError;
use secrecy::SecretString;

#[derive(Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub uri: SecretString,
    pub name: String,
    pub collection: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();

        Ok(Self {
            server: ServerConfig {
                host: std::env::var("HOST").unwrap_or(defaults.host),
                port: match std::env::var("PORT") {
                    Ok(port) => port
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("PORT".into()))?,
                    Err(_) => defaults.port,
                },
            },
            database: DatabaseConfig {
                uri: std::env::var("MONGODB_URI")
                    .map(SecretString::from)
                    .map_err(|_| ConfigError::MissingRequired("MONGODB_URI".into()))?,
                name: std::env::var("MONGODB_DB")
                    .unwrap_or_else(|_| DatabaseConfig::DEFAULT_NAME.to_string()),
                collection: std::env::var("GRADES_COLLECTION")
                    .unwrap_or_else(|_| DatabaseConfig::DEFAULT_COLLECTION.to_string()),
            },
        })
    }
}

impl DatabaseConfig {
    pub const DEFAULT_NAME: &'static str = "sample_training";
    pub const DEFAULT_COLLECTION: &'static str = "grades";
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

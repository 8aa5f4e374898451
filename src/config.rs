use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::error::AppError;

pub const DEFAULT_GEO_ENDPOINT: &str = "http://ip-api.com/json";

pub struct Config {
    pub port: u16,
    pub mongo_uri: String,
    pub geo_endpoint: String,
}

impl Config {
    /// Loads the process configuration from the environment. The connection
    /// string is mandatory; everything else falls back to a default.
    pub fn load() -> Result<Self, AppError> {
        Ok(Self {
            port: try_load("RUST_PORT", "1111"),
            mongo_uri: env::var("MONGO_URI")
                .map_err(|_| AppError::Config("MONGO_URI must be set".to_string()))?,
            geo_endpoint: try_load("GEO_ENDPOINT", DEFAULT_GEO_ENDPOINT),
        })
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::Address;

/// Default config file, resolved against the working directory.
const DEFAULT_CONFIG_PATH: &str = "Ledger.toml";

/// Environment variable overriding the config file location.
const CONFIG_PATH_VAR: &str = "LEDGER_CONFIG";

/// Application configuration, read from `Ledger.toml` (or the file named by
/// `LEDGER_CONFIG`).
#[derive(Debug, Deserialize)]
pub struct Config {
    address: String,
    port: u16,
    admin_address: String,
    locations_file: Option<String>,
}

impl Config {
    /// Load the configuration from `LEDGER_CONFIG` or the default path.
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_path(path)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(&path)?;
        toml::from_str(&contents).map_err(|err| {
            Error::malformed(format!(
                "Invalid config {}: {err}",
                path.as_ref().display()
            ))
        })
    }

    /// The socket address the relay binds.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    /// The administrator's substrate address.
    pub fn admin_address(&self) -> Address {
        Address::new(self.admin_address.clone())
    }

    /// Optional locations file to seed the ledger from at startup.
    pub fn locations_file(&self) -> Option<&str> {
        self.locations_file.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config() {
        let config: Config = toml::from_str(
            r#"
            address = "127.0.0.1"
            port = 3000
            admin_address = "0xadmin"
            locations_file = "example_data/locations.txt"
            "#,
        )
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.admin_address(), Address::new("0xadmin"));
        assert_eq!(config.locations_file(), Some("example_data/locations.txt"));
    }

    #[test]
    fn locations_file_is_optional() {
        let config: Config = toml::from_str(
            r#"
            address = "0.0.0.0"
            port = 4000
            admin_address = "0xadmin"
            "#,
        )
        .unwrap();
        assert_eq!(config.locations_file(), None);
    }

    #[test]
    fn missing_fields_are_rejected() {
        toml::from_str::<Config>(r#"address = "127.0.0.1""#).unwrap_err();
    }
}

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::AppError;
use crate::models::Coordinates;
use crate::services::{Catalog, FixedPosition, IpGeolocation, LocationProvider, PositionOptions};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub location: LocationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// Hospital file in the source JSON format; the embedded list is used when unset
    pub path: Option<PathBuf>,
}

/// Where server-side positions come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSourceKind {
    #[default]
    None,
    Fixed,
    Ip,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationSettings {
    #[serde(default)]
    pub source: LocationSourceKind,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
    #[serde(default)]
    pub maximum_age_ms: u64,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            source: LocationSourceKind::default(),
            latitude: None,
            longitude: None,
            endpoint: None,
            timeout_ms: default_timeout_ms(),
            high_accuracy: default_high_accuracy(),
            maximum_age_ms: 0,
        }
    }
}

impl LocationSettings {
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            high_accuracy: self.high_accuracy,
            timeout: Duration::from_millis(self.timeout_ms),
            maximum_age: Duration::from_millis(self.maximum_age_ms),
        }
    }

    /// Build the server-side location provider described by these settings
    pub fn build_provider(&self) -> Result<LocationProvider, AppError> {
        let provider = match self.source {
            LocationSourceKind::None => LocationProvider::unsupported(),
            LocationSourceKind::Fixed => {
                let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
                    return Err(AppError::LocationSetup(
                        "fixed source requires location.latitude and location.longitude".to_string(),
                    ));
                };
                let coords = Coordinates::new(latitude, longitude);
                if !coords.is_valid() {
                    return Err(AppError::LocationSetup(format!(
                        "fixed coordinates out of range: {}, {}",
                        latitude, longitude
                    )));
                }
                LocationProvider::new(Arc::new(FixedPosition::new(coords)))
            }
            LocationSourceKind::Ip => {
                let endpoint = self.endpoint.clone().ok_or_else(|| {
                    AppError::LocationSetup("ip source requires location.endpoint".to_string())
                })?;
                LocationProvider::new(Arc::new(IpGeolocation::new(endpoint)?))
            }
        };

        Ok(provider.with_options(self.position_options()))
    }
}

fn default_timeout_ms() -> u64 { 10_000 }
fn default_high_accuracy() -> bool { true }

/// Log line layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }

impl CatalogSettings {
    /// Load the configured catalog, falling back to the embedded list
    pub fn load_catalog(&self) -> Result<Catalog, AppError> {
        let catalog = match &self.path {
            Some(path) => Catalog::load_from(path)?,
            None => Catalog::embedded()?,
        };
        Ok(catalog)
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MEDIPLAN)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MEDIPLAN__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("MEDIPLAN")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_location_settings() {
        let location = LocationSettings::default();
        assert_eq!(location.source, LocationSourceKind::None);

        let options = location.position_options();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.maximum_age, Duration::ZERO);
    }

    #[test]
    fn test_build_provider() {
        assert!(!LocationSettings::default().build_provider().unwrap().is_supported());

        let fixed = LocationSettings {
            source: LocationSourceKind::Fixed,
            latitude: Some(16.8),
            longitude: Some(96.1),
            ..LocationSettings::default()
        };
        assert!(fixed.build_provider().unwrap().is_supported());

        let missing = LocationSettings {
            source: LocationSourceKind::Fixed,
            ..LocationSettings::default()
        };
        assert!(matches!(missing.build_provider(), Err(AppError::LocationSetup(_))));

        let no_endpoint = LocationSettings {
            source: LocationSourceKind::Ip,
            ..LocationSettings::default()
        };
        assert!(matches!(no_endpoint.build_provider(), Err(AppError::LocationSetup(_))));
    }

    #[test]
    fn test_default_catalog_is_embedded() {
        let catalog = CatalogSettings::default().load_catalog().unwrap();
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("mediplan-settings-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[location]\nsource = \"fixed\"\nlatitude = 16.8\nlongitude = 96.1\ntimeout_ms = 2500\n\n[logging]\nformat = \"compact\""
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.location.source, LocationSourceKind::Fixed);
        assert_eq!(settings.location.latitude, Some(16.8));
        assert_eq!(settings.location.position_options().timeout, Duration::from_millis(2500));
        assert!(settings.catalog.path.is_none());
        assert_eq!(settings.logging.format, LogFormat::Compact);
        assert_eq!(settings.logging.level, "info");
    }
}

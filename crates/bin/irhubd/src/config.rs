//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `irhub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use irhub_domain::device::RemoteDevice;
use irhub_domain::device_type::DeviceType;
use irhub_domain::id::RemoteId;
use irhub_domain::options::RemoteOptions;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub events: EventsConfig,
    /// Settings of the virtual bridge used as transport.
    pub transport: TransportConfig,
    /// Remotes the bridge reports, with their per-remote options.
    pub remotes: Vec<RemoteConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
    /// Upper bound of pooled connections.
    pub max_connections: u32,
    /// Lock wait before a write fails, in milliseconds.
    pub busy_timeout_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Capacity of the event bus and the sensor hub channels.
    pub capacity: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Simulated delay of every IR send, in milliseconds.
    pub latency_ms: u64,
}

/// One `[[remotes]]` entry.
///
/// ```toml
/// [[remotes]]
/// id = "01-lamp"
/// name = "Desk Lamp"
/// type = "Light"
/// with_brightness = true
/// power_sensor = "binary_sensor.lamp_plug"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    pub id: String,
    pub name: String,
    /// Vendor device type label such as `"TV"` or `"Air Conditioner"`.
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(flatten)]
    pub options: RemoteOptions,
}

/// Discovered remotes plus their options, keyed by remote id.
pub type Remotes = (Vec<RemoteDevice>, HashMap<RemoteId, RemoteOptions>);

impl Config {
    /// Load configuration from `irhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("irhub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("IRHUB_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("IRHUB_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("IRHUB_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("IRHUB_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("IRHUB_DATABASE_MAX_CONNECTIONS")
            && let Ok(max) = val.parse()
        {
            self.database.max_connections = max;
        }
        if let Ok(val) = std::env::var("IRHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database max_connections must be non-zero".to_string(),
            ));
        }
        if self.events.capacity == 0 {
            return Err(ConfigError::Validation(
                "events capacity must be non-zero".to_string(),
            ));
        }
        self.remotes().map(|_| ())
    }

    /// Build the remote list the virtual discovery will report.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for an unknown device type, a
    /// blank id or name, or an id used twice.
    pub fn remotes(&self) -> Result<Remotes, ConfigError> {
        let mut seen = HashSet::new();
        let mut devices = Vec::with_capacity(self.remotes.len());
        let mut options = HashMap::with_capacity(self.remotes.len());

        for remote in &self.remotes {
            let device_type: DeviceType = remote.device_type.parse().map_err(|err| {
                ConfigError::Validation(format!("remote {:?}: {err}", remote.id))
            })?;
            let device = RemoteDevice::new(RemoteId::new(remote.id.trim()), &remote.name, device_type)
                .map_err(|err| ConfigError::Validation(format!("remote {:?}: {err}", remote.id)))?;
            if !seen.insert(device.id.clone()) {
                return Err(ConfigError::Validation(format!(
                    "remote id {:?} is used more than once",
                    remote.id
                )));
            }
            options.insert(device.id.clone(), remote.options.clone());
            devices.push(device);
        }
        Ok((devices, options))
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:irhub.db?mode=rwc".to_string(),
            max_connections: 4,
            busy_timeout_ms: 5_000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "irhubd=info,irhub=info,irhub_app=info,irhub_adapter_virtual=info,tower_http=debug"
                .to_string(),
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use irhub_domain::id::SensorId;

    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite:irhub.db?mode=rwc");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert_eq!(config.events.capacity, 256);
        assert_eq!(config.transport.latency_ms, 0);
        assert!(config.remotes.is_empty());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'
            max_connections = 2

            [logging]
            filter = 'debug'

            [events]
            capacity = 32

            [transport]
            latency_ms = 40

            [[remotes]]
            id = 'lamp'
            name = 'Desk Lamp'
            type = 'Light'
            with_brightness = true
            power_sensor = 'binary_sensor.lamp'

            [[remotes]]
            id = 'box'
            name = 'Set-top box'
            type = 'Set Top Box'
            customize_commands = ['Guide', 'Red']
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.events.capacity, 32);
        assert_eq!(config.transport.latency_ms, 40);
        assert_eq!(config.remotes.len(), 2);
        assert!(config.remotes[0].options.with_brightness);
        assert_eq!(
            config.remotes[0].options.power_sensor,
            Some(SensorId::new("binary_sensor.lamp"))
        );
        assert_eq!(config.remotes[1].options.customize_commands, ["Guide", "Red"]);
    }

    #[test]
    fn should_build_devices_and_options_from_remotes() {
        let toml = "
            [[remotes]]
            id = 'tv'
            name = 'Living Room'
            type = 'TV'
            with_timer = true
        ";
        let config: Config = toml::from_str(toml).unwrap();

        let (devices, options) = config.remotes().unwrap();

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].device_type, DeviceType::Tv);
        assert!(options[&RemoteId::new("tv")].with_timer);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_database_pool() {
        let mut config = Config::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_valid_port() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_unknown_device_type() {
        let toml = "
            [[remotes]]
            id = 'x'
            name = 'Mystery'
            type = 'Toaster'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Toaster"));
    }

    #[test]
    fn should_reject_duplicate_remote_ids() {
        let toml = "
            [[remotes]]
            id = 'fan'
            name = 'Fan'
            type = 'Fan'

            [[remotes]]
            id = 'fan'
            name = 'Other fan'
            type = 'Fan'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_blank_remote_name() {
        let toml = "
            [[remotes]]
            id = 'fan'
            name = '  '
            type = 'Fan'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_format_bind_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}

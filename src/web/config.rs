use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::fleet::{Fleet, FleetError, SatelliteRecord};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),
    #[error("fleet.file and fleet.satellites are mutually exclusive")]
    AmbiguousFleet,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub fleet: FleetConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

/// Where the fleet comes from: a separate file, an inline list, or the
/// built-in demo fleet when neither is given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FleetConfig {
    pub file: Option<PathBuf>,
    pub satellites: Option<Vec<SatelliteRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionsConfig {
    #[serde(default = "default_idle_timeout", deserialize_with = "deserialize_duration")]
    pub idle_timeout: Duration,
    #[serde(default = "default_sweep_interval", deserialize_with = "deserialize_duration")]
    pub sweep_interval: Duration,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            idle_timeout: default_idle_timeout(),
            sweep_interval: default_sweep_interval(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_idle_timeout() -> Duration {
    Duration::from_secs(30 * 60)
}

fn default_sweep_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_max_sessions() -> usize {
    1000
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn load_fleet(&self) -> Result<Fleet, ConfigError> {
        let fleet = match (&self.fleet.file, &self.fleet.satellites) {
            (Some(_), Some(_)) => return Err(ConfigError::AmbiguousFleet),
            (Some(path), None) => Fleet::from_file(path)?,
            (None, Some(satellites)) => Fleet::new(satellites.clone())?,
            (None, None) => {
                log::info!("No fleet configured, using built-in demo fleet");
                Fleet::builtin()
            }
        };
        Ok(fleet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.web.static_dir, PathBuf::from("static"));
        assert_eq!(config.sessions.idle_timeout, Duration::from_secs(1800));
        assert_eq!(config.sessions.sweep_interval, Duration::from_secs(60));
        assert_eq!(config.sessions.max_sessions, 1000);
        assert_eq!(config.load_fleet().unwrap().len(), 4);
    }

    #[test]
    fn parses_humantime_durations() {
        let yaml = "sessions:\n  idle_timeout: 5m\n  sweep_interval: 10s\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.sessions.idle_timeout, Duration::from_secs(300));
        assert_eq!(config.sessions.sweep_interval, Duration::from_secs(10));
    }

    #[test]
    fn rejects_bad_duration() {
        let yaml = "sessions:\n  idle_timeout: soon\n";
        assert!(matches!(Config::from_yaml(yaml), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn inline_fleet() {
        let yaml = r#"
fleet:
  satellites:
    - { id: GAL-01, name: Galileo 1, status: active, last_update: now, degraded: true }
"#;
        let fleet = Config::from_yaml(yaml).unwrap().load_fleet().unwrap();
        assert_eq!(fleet.len(), 1);
        assert!(fleet.first().degraded);
    }

    #[test]
    fn fleet_file_and_config_file() {
        let mut fleet_file = NamedTempFile::new().unwrap();
        writeln!(
            fleet_file,
            "satellites:\n  - {{ id: A, name: Alpha, status: warning, last_update: now }}"
        )
        .unwrap();

        let mut config_file = NamedTempFile::new().unwrap();
        writeln!(
            config_file,
            "web:\n  bind: 127.0.0.1:9000\nfleet:\n  file: {}\n",
            fleet_file.path().display()
        )
        .unwrap();

        let config = Config::from_file(config_file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:9000");
        let fleet = config.load_fleet().unwrap();
        assert_eq!(fleet.first().name, "Alpha");
    }

    #[test]
    fn rejects_fleet_file_with_inline_satellites() {
        let yaml = r#"
fleet:
  file: fleet.yaml
  satellites:
    - { id: GAL-01, name: Galileo 1, status: active, last_update: now }
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.load_fleet(),
            Err(ConfigError::AmbiguousFleet)
        ));
    }

    #[test]
    fn parses_session_limit() {
        let config = Config::from_yaml("sessions:\n  max_sessions: 3\n").unwrap();
        assert_eq!(config.sessions.max_sessions, 3);
        assert_eq!(config.sessions.idle_timeout, Duration::from_secs(1800));
    }

    #[test]
    fn missing_fleet_file_is_an_error() {
        let yaml = "fleet:\n  file: /nonexistent/fleet.yaml\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.load_fleet(),
            Err(ConfigError::Fleet(FleetError::FileRead(_)))
        ));
    }
}

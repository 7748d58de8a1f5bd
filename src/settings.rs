//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional config file,
//! then `ORAMAN_*` environment variables. Command-line flags are applied on
//! top of the result by the binary.
//!
//! ```toml
//! endpoint = "http://dbmon:8080/oraman"
//! timeout = "5s"
//! # dir = "captures"   # read saved documents instead of calling the service
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::source::DEFAULT_ENDPOINT;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: &str = "10s";

/// Where and how to fetch SQL detail documents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Base URL of the monitor web application.
    pub endpoint: String,
    /// Request timeout as a duration string (e.g. "10s", "500ms").
    pub timeout: String,
    /// Read documents from this directory instead of the web service.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT.to_string(),
            dir: None,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file, and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("timeout", DEFAULT_TIMEOUT)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder.add_source(Environment::with_prefix("ORAMAN")).build()?;
        Ok(config.try_deserialize()?)
    }

    /// The parsed request timeout.
    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(&self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.timeout().unwrap(), Duration::from_secs(10));
        assert!(settings.dir.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "endpoint = \"http://dbmon:8080/oraman\"").unwrap();
        writeln!(file, "timeout = \"750ms\"").unwrap();
        writeln!(file, "dir = \"captures\"").unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.endpoint, "http://dbmon:8080/oraman");
        assert_eq!(settings.timeout().unwrap(), Duration::from_millis(750));
        assert_eq!(settings.dir, Some(PathBuf::from("captures")));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "timeout = \"2s\"").unwrap();
        file.flush().unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.timeout().unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("/nonexistent/oraman.toml"))).is_err());
    }
}

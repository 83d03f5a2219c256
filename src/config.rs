//! Runtime configuration read from the environment.

use std::path::PathBuf;

/// Upper bound on `VEROLIX_LATENCY_SCALE`.
pub const MAX_LATENCY_SCALE: f64 = 100.0;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when attached to a terminal, stdout otherwise.
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite database file (`VEROLIX_DB_PATH`)
    pub db_path: PathBuf,
    /// Log destination (`VEROLIX_LOG_MODE`)
    pub log_mode: LogMode,
    /// Log file when logging to a file (`VEROLIX_LOG_FILE`)
    pub log_file: PathBuf,
    /// Multiplier on simulated latency (`VEROLIX_LATENCY_SCALE`); 0 disables it
    pub latency_scale: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("verolix.db"),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("verolix.log"),
            latency_scale: 1.0,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let latency_scale = lookup("VEROLIX_LATENCY_SCALE")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, MAX_LATENCY_SCALE))
            .unwrap_or(defaults.latency_scale);

        Self {
            db_path: lookup("VEROLIX_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_mode: lookup("VEROLIX_LOG_MODE")
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: lookup("VEROLIX_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            latency_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, AppConfig::default());
        assert!(config.log_mode.use_file(true));
        assert!(!config.log_mode.use_file(false));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("VEROLIX_DB_PATH", "/tmp/v.db"),
            ("VEROLIX_LOG_MODE", "STDOUT"),
            ("VEROLIX_LATENCY_SCALE", "0.5"),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/tmp/v.db"));
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert!((config.latency_scale - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_latency_falls_back() {
        let scale = |raw: &str| config_from(&[("VEROLIX_LATENCY_SCALE", raw)]).latency_scale;
        assert!((scale("fast") - 1.0).abs() < f64::EPSILON);
        assert!(scale("-3").abs() < f64::EPSILON);
        assert!((scale("inf") - 1.0).abs() < f64::EPSILON);
        assert!((scale("1e30") - MAX_LATENCY_SCALE).abs() < f64::EPSILON);
    }
}

//! Configuration file handling for the prediction service settings.
//!
//! The API key itself never lives in the file; the file names the environment
//! variable to read it from (optionally populated from a `.env` file).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Settings for reaching the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Base URL of the generative language API
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub temperature: f32,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 60,
            temperature: 0.2,
        }
    }
}

impl PredictorConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file. Missing keys take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            anyhow::bail!("Endpoint must be an http(s) URL, got '{}'", self.endpoint);
        }
        if endpoint.trim_start_matches("https://").trim_start_matches("http://").is_empty() {
            anyhow::bail!("Endpoint must include a host");
        }

        if self.model.trim().is_empty() {
            anyhow::bail!("Model must be specified");
        }
        if self.model.contains('/') || self.model.contains(char::is_whitespace) {
            anyhow::bail!("Model name cannot contain '/' or whitespace");
        }

        if self.api_key_env.trim().is_empty() {
            anyhow::bail!("API key environment variable name must be specified");
        }
        if self.api_key_env.contains('=') {
            anyhow::bail!("API key environment variable name cannot contain '='");
        }

        if !(1..=600).contains(&self.timeout_secs) {
            anyhow::bail!(
                "Timeout must be between 1 and 600 seconds, got {}",
                self.timeout_secs
            );
        }

        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            anyhow::bail!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            );
        }

        Ok(())
    }

    /// Read the API key from the configured environment variable.
    ///
    /// A `.env` file in the working directory is loaded first; variables
    /// already set in the process environment win over it.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Ignoring unreadable .env file");
            }
        }
        self.api_key_from_env()
    }

    /// Read the API key from the process environment only.
    pub fn api_key_from_env(&self) -> Result<String> {
        let key = std::env::var(&self.api_key_env).with_context(|| {
            format!(
                "No API key found: set {} in the environment or a .env file",
                self.api_key_env
            )
        })?;
        if key.trim().is_empty() {
            anyhow::bail!("{} is set but empty", self.api_key_env);
        }
        Ok(key.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = PredictorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = PredictorConfig::load_from_file(Path::new("/nonexistent/path"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{ invalid json }").unwrap();
        temp_file.flush().unwrap();

        let result = PredictorConfig::load_from_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(br#"{"model": "gemini-2.0-pro"}"#).unwrap();
        temp_file.flush().unwrap();

        let config = PredictorConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.model, "gemini-2.0-pro");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.api_key_env, DEFAULT_API_KEY_ENV);
    }

    #[test]
    fn test_validation_rejects_bad_endpoint() {
        let config = PredictorConfig {
            endpoint: "ftp://example.test".into(),
            ..PredictorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = PredictorConfig {
            endpoint: "https://".into(),
            ..PredictorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_timeout() {
        for timeout_secs in [0, 601] {
            let config = PredictorConfig {
                timeout_secs,
                ..PredictorConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("Timeout"));
        }
    }

    #[test]
    fn test_validation_rejects_bad_temperature() {
        for temperature in [-0.1, 2.5, f32::NAN] {
            let config = PredictorConfig {
                temperature,
                ..PredictorConfig::default()
            };
            assert!(config.validate().is_err(), "{} accepted", temperature);
        }
    }

    #[test]
    fn test_validation_rejects_empty_names() {
        let config = PredictorConfig {
            model: "  ".into(),
            ..PredictorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = PredictorConfig {
            api_key_env: String::new(),
            ..PredictorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_key_names_variable() {
        let config = PredictorConfig {
            api_key_env: "ADMITUI_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..PredictorConfig::default()
        };
        let err = config.api_key_from_env().unwrap_err();
        assert!(err.to_string().contains("ADMITUI_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}

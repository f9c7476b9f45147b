//! Job configuration
//!
//! A run is described by a small YAML file naming the input and output
//! locations, the calendar timezone, and where to find storage credentials.
//! Credentials are injected into the process environment before any S3
//! client is built, so the object store picks them up the usual way.

use crate::error::{Error, Result};
use crate::transform::EventTimeZone;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default relative path of the credentials file
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.yaml";

/// Subdirectory of the input location holding track-metadata files
pub const SONG_DATA_PREFIX: &str = "song_data";

/// Subdirectory of the input location holding activity-log files
pub const LOG_DATA_PREFIX: &str = "log_data";

// ============================================================================
// Job Config
// ============================================================================

/// Complete configuration for one ETL run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Base input location (`s3://bucket/prefix/` or a local directory)
    pub input_url: String,

    /// Base output location (`s3://bucket/prefix/` or a local directory)
    pub output_url: String,

    /// Timezone used to derive calendar fields from event timestamps
    #[serde(default)]
    pub timezone: EventTimeZone,

    /// Path of the credentials file; not needed for local-only runs
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
}

impl JobConfig {
    /// Create a config from explicit locations
    pub fn new(input_url: impl Into<String>, output_url: impl Into<String>) -> Self {
        Self {
            input_url: input_url.into(),
            output_url: output_url.into(),
            timezone: EventTimeZone::default(),
            credentials_file: None,
        }
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a config from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the timezone
    #[must_use]
    pub fn with_timezone(mut self, timezone: EventTimeZone) -> Self {
        self.timezone = timezone;
        self
    }

    /// Set the credentials file path
    #[must_use]
    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    /// Check that required fields are present
    fn validate(&self) -> Result<()> {
        if self.input_url.trim().is_empty() {
            return Err(Error::missing_field("input_url"));
        }
        if self.output_url.trim().is_empty() {
            return Err(Error::missing_field("output_url"));
        }
        Ok(())
    }

    /// Apply credentials from the configured file, if any.
    ///
    /// Falls back to [`DEFAULT_CREDENTIALS_FILE`] when no path is configured;
    /// a missing default file is not an error (local runs need none).
    pub fn apply_credentials(&self) -> Result<()> {
        match &self.credentials_file {
            Some(path) => Credentials::from_file(path)?.inject(),
            None => {
                let default = Path::new(DEFAULT_CREDENTIALS_FILE);
                if default.exists() {
                    Credentials::from_file(default)?.inject();
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Storage credentials loaded from a local YAML file
///
/// The two values are exported as `AWS_ACCESS_KEY_ID` and
/// `AWS_SECRET_ACCESS_KEY` so the S3 client builder finds them in the
/// environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// AWS access key id
    pub aws_access_key_id: String,
    /// AWS secret access key
    pub aws_secret_access_key: String,
}

impl Credentials {
    /// Load credentials from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!(
                "Failed to read credentials file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let creds: Self = serde_yaml::from_str(&content)?;
        Ok(creds)
    }

    /// Export the credentials into the process environment
    pub fn inject(&self) {
        std::env::set_var("AWS_ACCESS_KEY_ID", &self.aws_access_key_id);
        std::env::set_var("AWS_SECRET_ACCESS_KEY", &self.aws_secret_access_key);
    }
}

impl std::fmt::Display for Credentials {
    // Never print the secret
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credentials({}, ****)", self.aws_access_key_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_yaml() {
        let yaml = r"
input_url: s3://source-bucket/data/
output_url: s3://lake-bucket/parquet/
timezone: utc
";
        let config = JobConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.input_url, "s3://source-bucket/data/");
        assert_eq!(config.output_url, "s3://lake-bucket/parquet/");
        assert_eq!(config.timezone, EventTimeZone::Utc);
        assert!(config.credentials_file.is_none());
    }

    #[test]
    fn test_config_defaults() {
        let yaml = r"
input_url: ./in
output_url: ./out
";
        let config = JobConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.timezone, EventTimeZone::Local);
    }

    #[test]
    fn test_config_missing_field() {
        let yaml = r"
input_url: ''
output_url: ./out
";
        let err = JobConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("input_url"));
    }

    #[test]
    fn test_credentials_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.yaml");
        std::fs::write(
            &path,
            "aws_access_key_id: AKIATEST\naws_secret_access_key: shhh\n",
        )
        .unwrap();

        let creds = Credentials::from_file(&path).unwrap();
        assert_eq!(creds.aws_access_key_id, "AKIATEST");
        assert_eq!(creds.aws_secret_access_key, "shhh");
        assert_eq!(creds.to_string(), "Credentials(AKIATEST, ****)");
    }
}

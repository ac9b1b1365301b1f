//! Diagnostic run configuration, loadable from a TOML file.
//!
//! Every field has a default, so an empty file (or no file) reproduces the
//! stock probe set. A file only needs the keys it overrides:
//!
//! ```toml
//! sample_limit = 5
//!
//! [probes.archive]
//! url_pattern = "*.example.org/*"
//! timeout_secs = 60
//! ```

use crate::error::{DoctorError, Result};
use search_probes::ProbesConfig;
use search_probes::config::DEFAULT_SAMPLE_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for one diagnostic run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoctorConfig {
    /// How many sample URLs each passing probe prints.
    pub sample_limit: usize,
    /// Endpoint, query and timeout settings per probe.
    pub probes: ProbesConfig,
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            probes: ProbesConfig::default(),
        }
    }
}

impl DoctorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this schema. Validation is separate; see [`DoctorConfig::validate`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| DoctorError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| DoctorError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates the probe settings and sample limit.
    pub fn validate(&self) -> Result<()> {
        if self.sample_limit == 0 {
            return Err(DoctorError::Config(
                "sample_limit must be greater than 0".into(),
            ));
        }
        self.probes.validate()?;
        Ok(())
    }
}

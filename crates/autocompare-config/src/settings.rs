//! Compile settings loaded from TOML or YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_THREAD_NAME_PREFIX: &str = "autocompare-compile";

/// Settings for a [`ConfigurationRegistry`](crate::ConfigurationRegistry).
///
/// # Examples
///
/// ```
/// use autocompare_config::CompileSettings;
///
/// let settings = CompileSettings::from_toml_str(r#"
///     worker_threads = 2
///     compare_fields_by_default = true
/// "#).unwrap();
///
/// assert_eq!(settings.worker_threads, Some(2));
/// assert_eq!(settings.thread_name_prefix, "autocompare-compile");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CompileSettings {
    /// Threads in a dedicated compile pool; `None` or `0` uses the rayon global pool.
    pub worker_threads: Option<usize>,

    /// Name prefix for dedicated compile pool threads.
    pub thread_name_prefix: String,

    /// Initial `compare_fields` value for new type configurations.
    pub compare_fields_by_default: bool,
}

impl Default for CompileSettings {
    fn default() -> Self {
        CompileSettings {
            worker_threads: None,
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
            compare_fields_by_default: false,
        }
    }
}

impl CompileSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_yaml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    pub fn with_compare_fields_by_default(mut self, compare_fields: bool) -> Self {
        self.compare_fields_by_default = compare_fields;
        self
    }

    /// Returns the dedicated pool size, if a dedicated pool is requested.
    pub fn dedicated_threads(&self) -> Option<usize> {
        self.worker_threads.filter(|&n| n > 0)
    }

    /// Checks settings that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dedicated_threads().is_some() && self.thread_name_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "thread_name_prefix must not be empty when worker_threads is set".to_string(),
            ));
        }
        Ok(())
    }
}

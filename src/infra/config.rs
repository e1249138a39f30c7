//! Configuration management infrastructure.
//!
//! Persists inspection preferences (OID display aliases, value truncation, output format)
//! so the CLI does not need them repeated on every invocation.

use crate::infra::error::{AttributeError, AttributeResult};
use crate::services::inspector::{InspectorConfig, OutputFormat};
use der::asn1::ObjectIdentifier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted inspection preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfiguration {
    /// Maximum number of value bytes rendered as hex per value
    pub max_value_bytes: usize,

    /// Default output format ("text" or "json")
    pub output_format: String,

    /// Whether to render attribute values at all
    pub show_values: bool,

    /// Display names for attribute types, keyed by dotted OID
    pub oid_aliases: BTreeMap<String, String>,
}

impl Default for InspectorConfiguration {
    fn default() -> Self {
        Self {
            max_value_bytes: 32,
            output_format: "text".to_string(),
            show_values: true,
            oid_aliases: BTreeMap::new(),
        }
    }
}

impl InspectorConfiguration {
    /// Resolve into the typed configuration used by the inspector service.
    pub fn to_inspector_config(&self) -> AttributeResult<InspectorConfig> {
        let mut aliases = BTreeMap::new();
        for (dotted, name) in &self.oid_aliases {
            aliases.insert(parse_alias_oid(dotted)?, name.clone());
        }

        Ok(InspectorConfig {
            aliases,
            max_value_bytes: self.max_value_bytes,
            output_format: self.output_format.parse()?,
            show_values: self.show_values,
        })
    }
}

/// Configuration manager for loading and saving settings
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new configuration manager with default path
    pub fn new() -> AttributeResult<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Create a configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> AttributeResult<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("cms-attribute-table").join("config.toml"))
        } else {
            Ok(PathBuf::from("cms-attribute-table-config.toml"))
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create_default(&self) -> AttributeResult<InspectorConfiguration> {
        if self.config_path.exists() {
            self.load()
        } else {
            log::info!(
                "Configuration file not found, creating default: {}",
                self.config_path.display()
            );
            let default_config = InspectorConfiguration::default();
            self.save(&default_config)?;
            Ok(default_config)
        }
    }

    /// Load configuration from file, falling back to defaults without touching disk
    pub fn load_or_default(&self) -> AttributeResult<InspectorConfiguration> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(InspectorConfiguration::default())
        }
    }

    /// Load configuration from file
    pub fn load(&self) -> AttributeResult<InspectorConfiguration> {
        log::debug!("Loading configuration from: {}", self.config_path.display());

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            AttributeError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let config: InspectorConfiguration = toml::from_str(&content).map_err(|e| {
            AttributeError::ConfigurationError(format!("Failed to parse config file: {e}"))
        })?;

        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &InspectorConfiguration) -> AttributeResult<()> {
        log::info!("Saving configuration to: {}", self.config_path.display());

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AttributeError::ConfigurationError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(config).map_err(|e| {
            AttributeError::ConfigurationError(format!("Failed to serialize config: {e}"))
        })?;

        fs::write(&self.config_path, content).map_err(|e| {
            AttributeError::ConfigurationError(format!(
                "Failed to write config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Validate configuration values
    fn validate_config(config: &InspectorConfiguration) -> AttributeResult<()> {
        for dotted in config.oid_aliases.keys() {
            parse_alias_oid(dotted)?;
        }

        config.output_format.parse::<OutputFormat>()?;

        if config.max_value_bytes == 0 {
            return Err(AttributeError::ConfigurationError(
                "max_value_bytes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Update a specific configuration value
    pub fn update_value(&self, key: &str, value: &str) -> AttributeResult<()> {
        let mut config = self.load_or_default()?;

        match key {
            "max_value_bytes" => {
                config.max_value_bytes = value.parse().map_err(|_| {
                    AttributeError::ConfigurationError(format!("Invalid byte count: {value}"))
                })?;
            }
            "output_format" => {
                value.parse::<OutputFormat>()?;
                config.output_format = value.to_string();
            }
            "show_values" => {
                config.show_values = value.parse().map_err(|_| {
                    AttributeError::ConfigurationError(format!("Invalid boolean value: {value}"))
                })?;
            }
            _ => {
                // "alias.<oid>" sets a display name for an attribute type
                let Some(dotted) = key.strip_prefix("alias.") else {
                    return Err(AttributeError::ConfigurationError(format!(
                        "Unknown configuration key: {key}"
                    )));
                };
                parse_alias_oid(dotted)?;
                if value.is_empty() {
                    config.oid_aliases.remove(dotted);
                } else {
                    config
                        .oid_aliases
                        .insert(dotted.to_string(), value.to_string());
                }
            }
        }

        Self::validate_config(&config)?;
        self.save(&config)
    }

    /// Get the configuration file path
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Export configuration as a portable format
    pub fn export_config(&self, format: ExportFormat) -> AttributeResult<String> {
        let config = self.load_or_default()?;

        match format {
            ExportFormat::Toml => toml::to_string_pretty(&config).map_err(|e| {
                AttributeError::ConfigurationError(format!("TOML export failed: {e}"))
            }),
            ExportFormat::Json => serde_json::to_string_pretty(&config).map_err(|e| {
                AttributeError::ConfigurationError(format!("JSON export failed: {e}"))
            }),
        }
    }
}

/// Configuration export formats
#[derive(Debug, Clone, Copy)]
pub enum ExportFormat {
    Toml,
    Json,
}

fn parse_alias_oid(dotted: &str) -> AttributeResult<ObjectIdentifier> {
    ObjectIdentifier::new(dotted).map_err(|e| {
        AttributeError::ConfigurationError(format!("Invalid OID in alias key '{dotted}': {e}"))
    })
}

//! Configuration persistence as seen through the public API.

use cms_attribute_table::config::{ConfigManager, ExportFormat, InspectorConfiguration};
use cms_attribute_table::{oids, AttributeError, AttributeInspector, OutputFormat};
use tempfile::TempDir;

#[test]
fn saved_aliases_feed_the_inspector() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));

    manager
        .update_value("alias.1.2.840.113549.1.9.4", "digest")
        .unwrap();
    manager.update_value("output_format", "json").unwrap();

    let config = manager.load().unwrap().to_inspector_config().unwrap();
    assert_eq!(config.output_format, OutputFormat::Json);

    let inspector = AttributeInspector::new(config);
    assert_eq!(
        inspector.name_for(&oids::MESSAGE_DIGEST).as_deref(),
        Some("digest")
    );
}

#[test]
fn empty_alias_value_removes_alias() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));

    manager.update_value("alias.1.2.3", "custom").unwrap();
    manager.update_value("alias.1.2.3", "").unwrap();
    assert!(manager.load().unwrap().oid_aliases.is_empty());
}

#[test]
fn export_without_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(temp_dir.path().join("missing.toml"));

    let json = manager.export_config(ExportFormat::Json).unwrap();
    let parsed: InspectorConfiguration = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.max_value_bytes, 32);

    let toml_text = manager.export_config(ExportFormat::Toml).unwrap();
    assert!(toml_text.contains("output_format = \"text\""));
    assert!(!manager.config_path().exists());
}

#[test]
fn malformed_toml_is_a_configuration_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "max_value_bytes = \"many\"").unwrap();

    let err = ConfigManager::with_path(&path).load().unwrap_err();
    assert!(matches!(err, AttributeError::ConfigurationError(_)));
}

use assert_matches::assert_matches;
use tempfile::tempdir;

use crate::{ConfigError, DecoderConfig};

#[test]
fn defaults_match_http2_initial_settings() {
    let config = DecoderConfig::default();
    assert_eq!(config.header_table_size, 4096);
    assert_eq!(config.max_header_field_size, 16 * 1024);
    assert!(!config.strict_entry_size);
    assert!(config.validate().is_ok());
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let config = DecoderConfig::from_toml_str("header_table_size = 65536\n").unwrap();
    assert_eq!(config.header_table_size, 65_536);
    assert_eq!(config.max_header_field_size, 16 * 1024);
}

#[test]
fn rejects_zero_field_size() {
    let err = DecoderConfig::from_toml_str("max_header_field_size = 0\n").unwrap_err();
    assert_matches!(err, ConfigError::Invalid(_));
}

#[test]
fn rejects_malformed_toml() {
    let err = DecoderConfig::from_toml_str("header_table_size = \"large\"\n").unwrap_err();
    assert_matches!(err, ConfigError::Parse(_));
}

#[test]
fn toml_roundtrip() {
    let config = DecoderConfig {
        header_table_size: 256,
        max_header_field_size: 8192,
        strict_entry_size: true,
    };
    let raw = config.to_toml_string().unwrap();
    assert_eq!(DecoderConfig::from_toml_str(&raw).unwrap(), config);
}

#[test]
fn load_or_create_writes_defaults_then_reads_them() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hpack.toml");

    let created = DecoderConfig::load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(created, DecoderConfig::default());

    std::fs::write(&path, "header_table_size = 1024\nstrict_entry_size = true\n").unwrap();
    let loaded = DecoderConfig::load_or_create(&path).unwrap();
    assert_eq!(loaded.header_table_size, 1024);
    assert!(loaded.strict_entry_size);
}

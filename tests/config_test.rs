//! Integration tests for Settings config loading.
//!
//! Merge Semantics:
//! - Defaults → Global → Local: scalars REPLACE where specified
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! Note: These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use pdxtree::application::ApplicationError;
use pdxtree::config::{local_config_path, Settings};

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let mod_dir = dir.path().join("mods");
    let local = format!(
        "mod_dir = \"{}\"\nstrict_blocks = true\n",
        mod_dir.display()
    );
    fs::write(local_config_path(dir.path()), local).unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.mod_dir, mod_dir);
    assert!(settings.strict_blocks);
    assert!(settings.parse_options().strict_blocks);
}

#[test]
fn given_local_config_with_one_key_when_load_then_inherits_the_rest() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "strict_blocks = true\n").unwrap();
    let defaults = Settings::load(None).expect("load defaults");

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert!(settings.strict_blocks);
    assert_eq!(settings.mod_dir, defaults.mod_dir);
}

#[test]
fn given_tilde_in_mod_dir_when_load_then_expands_home() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "mod_dir = \"~/mods\"\n").unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert!(!settings.mod_dir.starts_with("~"));
    assert!(settings.mod_dir.ends_with("mods"));
}

#[test]
fn given_directory_without_config_when_load_then_uses_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings, Settings::load(None).unwrap());
    assert!(settings.mod_dir.ends_with(PathBuf::from("Crusader Kings II").join("mod")));
}

#[test]
fn given_invalid_toml_when_load_then_returns_config_error() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "strict_blocks = = true\n").unwrap();

    // Act
    let result = Settings::load(Some(dir.path()));

    // Assert
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_settings_when_serialized_then_template_keys_match() {
    // Arrange
    let settings = Settings::default();

    // Act
    let toml = settings.to_toml().unwrap();
    let template = Settings::template();

    // Assert
    for key in ["mod_dir", "strict_blocks"] {
        assert!(toml.contains(key), "{key} missing from {toml}");
        assert!(template.contains(key), "{key} missing from template");
    }
}

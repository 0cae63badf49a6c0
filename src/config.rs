//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/pdxtree/pdxtree.toml`
//! 3. Local config: `<dir>/.pdxtree.toml`
//! 4. Environment variables: `PDXTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::{BaseDirs, ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::ParseOptions;

/// Unified configuration for pdxtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding mod descriptors (default: the game's user `mod` directory)
    pub mod_dir: PathBuf,
    /// Reject unterminated blocks and stray closing braces
    pub strict_blocks: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mod_dir: default_mod_dir(),
            strict_blocks: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub mod_dir: Option<PathBuf>,
    pub strict_blocks: Option<bool>,
}

/// The game's user mod directory.
///
/// Linux keeps it below the home directory, other systems below the
/// documents folder.
fn default_mod_dir() -> PathBuf {
    let game_dir = if cfg!(target_os = "linux") {
        BaseDirs::new().map(|dirs| dirs.home_dir().join(".paradoxinteractive"))
    } else {
        UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
            .map(|docs| docs.join("Paradox Interactive"))
    };
    game_dir
        .map(|dir| dir.join("Crusader Kings II").join("mod"))
        .unwrap_or_else(|| PathBuf::from("~/.paradoxinteractive/Crusader Kings II/mod"))
}

/// Get the XDG config directory for pdxtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pdxtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("pdxtree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".pdxtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the text unchanged.
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Parser switches derived from these settings.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict_blocks: self.strict_blocks,
        }
    }

    fn expand_paths(&mut self) {
        self.mod_dir = expand_path(&self.mod_dir);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            mod_dir: overlay
                .mod_dir
                .clone()
                .unwrap_or_else(|| self.mod_dir.clone()),
            strict_blocks: overlay.strict_blocks.unwrap_or(self.strict_blocks),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.pdxtree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply PDXTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("PDXTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("mod_dir") {
            settings.mod_dir = PathBuf::from(val);
        }
        match config.get_bool("strict_blocks") {
            Ok(val) => settings.strict_blocks = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# pdxtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/pdxtree/pdxtree.toml
#   Local:  <dir>/.pdxtree.toml
#   Env:    PDXTREE_* environment variables (e.g. PDXTREE_STRICT_BLOCKS=true)

# Directory holding mod descriptors (*.mod)
# mod_dir = "~/.paradoxinteractive/Crusader Kings II/mod"

# Reject blocks left open at end of file and stray closing braces
# strict_blocks = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_mod_dir_points_into_game_directory() {
        let settings = Settings::default();
        assert!(settings.mod_dir.ends_with("Crusader Kings II/mod"));
        assert!(!settings.strict_blocks);
    }

    #[test]
    fn given_tilde_in_mod_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            mod_dir: PathBuf::from("~/mods"),
            strict_blocks: false,
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(settings.mod_dir.starts_with(&home));
        assert!(!settings.mod_dir.to_string_lossy().contains('~'));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let base = Settings {
            mod_dir: PathBuf::from("/base"),
            strict_blocks: true,
        };
        let overlay = RawSettings {
            mod_dir: Some(PathBuf::from("/overlay")),
            strict_blocks: None,
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.mod_dir, PathBuf::from("/overlay"));
        assert!(merged.strict_blocks);
    }

    #[test]
    fn given_settings_then_parse_options_follow_strict_flag() {
        let settings = Settings {
            strict_blocks: true,
            ..Settings::default()
        };
        assert!(settings.parse_options().strict_blocks);
    }

    #[test]
    fn given_template_then_is_valid_toml() {
        let parsed: Result<RawSettings, _> = toml::from_str(&Settings::template());
        assert!(parsed.is_ok());
    }
}

//! Project-local configuration: where installed files land.
//!
//! `spaceui init` writes a `spaceui.json` at the consuming project's root;
//! every `add` reads it back. The only contents are the directory aliases the
//! import transformer targets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::registry::transform::AliasCategory;

/// Name of the configuration file at the consuming project's root.
pub const CONFIG_FILE_NAME: &str = "spaceui.json";

/// Published JSON schema for editor completion in the config file.
const CONFIG_SCHEMA_URL: &str = "https://ui.spaceinvoices.com/schema/config.json";

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("No {CONFIG_FILE_NAME} found in {0}. Run `spaceui init` first.")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Directory aliases for each file category the registry distributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Aliases {
    pub components: String,
    pub ui: String,
    pub lib: String,
    pub hooks: String,
    pub providers: String,
}

impl Default for Aliases {
    fn default() -> Self {
        Self {
            components: "@/components/space-invoices".to_string(),
            ui: "@/components/ui".to_string(),
            lib: "@/lib".to_string(),
            hooks: "@/hooks".to_string(),
            providers: "@/providers".to_string(),
        }
    }
}

impl Aliases {
    pub fn alias_for(&self, category: AliasCategory) -> &str {
        match category {
            AliasCategory::Components => &self.components,
            AliasCategory::Ui => &self.ui,
            AliasCategory::Lib => &self.lib,
            AliasCategory::Hooks => &self.hooks,
            AliasCategory::Providers => &self.providers,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub aliases: Aliases,
}

impl Config {
    /// Config with default aliases and the schema reference filled in, as
    /// written by `spaceui init --yes`.
    pub fn with_defaults() -> Self {
        Self {
            schema: Some(CONFIG_SCHEMA_URL.to_string()),
            aliases: Aliases::default(),
        }
    }

    pub fn path_in(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE_NAME)
    }

    pub fn exists_in(project_root: &Path) -> bool {
        Self::path_in(project_root).is_file()
    }

    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let path = Self::path_in(project_root);
        if !path.is_file() {
            return Err(ConfigError::NotFound(project_root.to_path_buf()));
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path,
            reason: e.to_string(),
        })
    }

    pub fn save(&self, project_root: &Path) -> Result<PathBuf, ConfigError> {
        let path = Self::path_in(project_root);
        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Write {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        std::fs::write(&path, json + "\n").map_err(|e| ConfigError::Write {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_aliases_use_source_root_sentinel() {
        let aliases = Aliases::default();
        assert_eq!(aliases.components, "@/components/space-invoices");
        assert_eq!(aliases.ui, "@/components/ui");
        assert!(aliases.lib.starts_with("@/"));
        assert!(aliases.hooks.starts_with("@/"));
        assert!(aliases.providers.starts_with("@/"));
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = Config::with_defaults();
        config.aliases.ui = "@/design/ui".to_string();

        config.save(tmp.path()).unwrap();
        assert!(Config::exists_in(tmp.path()));

        let loaded = Config::load(tmp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_without_config_says_run_init() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Config::load(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("spaceui init"));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();
        assert!(matches!(
            Config::load(tmp.path()).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn missing_aliases_fall_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "{}").unwrap();
        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.aliases, Aliases::default());
    }
}

//! Loading and saving the slot configuration.
//!
//! The load path never fails: a missing file produces the default
//! configuration (written back out, best effort), and an unreadable or
//! unparseable file produces the defaults while leaving the file on disk
//! untouched for the user to repair.

use crate::model::{Slot, SlotConfig, SlotKind};
use anyhow::{Context, Result};
use directories::{ProjectDirs, UserDirs};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const CONFIG_FILE: &str = "launcher-config.json";

/// Returns the project directories for this application.
/// Centralized to ensure consistent paths across all modules.
pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "ninepad", "ninepad")
        .context("Could not determine project directories")
}

pub fn config_path() -> Result<PathBuf> {
    let proj_dirs = project_dirs()?;
    let config_dir = proj_dirs.config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(config_dir).context("Failed to create config directory")?;
    }
    Ok(config_dir.join(CONFIG_FILE))
}

/// The default configuration: four populated example slots followed by
/// five absent ones.
pub fn default_config() -> SlotConfig {
    let home = UserDirs::new()
        .map(|dirs| dirs.home_dir().display().to_string())
        .unwrap_or_else(|| String::from("/"));

    SlotConfig {
        slots: vec![
            Some(
                Slot::new("Terminal", SlotKind::App, "x-terminal-emulator")
                    .with_icon("icons/terminal.png"),
            ),
            Some(Slot::new("Explorer", SlotKind::Folder, home).with_icon("icons/explorer.png")),
            Some(
                Slot::new("Browser", SlotKind::Url, "https://google.com")
                    .with_icon("icons/browser.png"),
            ),
            Some(Slot::new("Notes", SlotKind::App, "gedit").with_icon("icons/notes.png")),
            None,
            None,
            None,
            None,
            None,
        ],
    }
}

/// Read/write access to the slot configuration at a fixed path.
pub struct SlotStore {
    path: PathBuf,
}

impl SlotStore {
    /// Store backed by the per-user config directory.
    pub fn from_project_dirs() -> Result<Self> {
        Ok(Self {
            path: config_path()?,
        })
    }

    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration. Never fails: every failure mode collapses
    /// into the default configuration.
    pub fn load(&self) -> SlotConfig {
        if !self.path.exists() {
            let config = default_config();
            if let Err(err) = self.save(&config) {
                warn!("Failed to write default config: {:#}", err);
            }
            return config;
        }

        match self.try_load() {
            Ok(config) => config,
            Err(err) => {
                // The broken file is left in place; only reads fall back.
                warn!("Failed to load slot config, using defaults: {:#}", err);
                default_config()
            }
        }
    }

    fn try_load(&self) -> Result<SlotConfig> {
        let content = fs::read_to_string(&self.path).context("Failed to read config file")?;
        let config: SlotConfig =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config.normalized())
    }

    /// Normalize and write the whole configuration, replacing the file.
    pub fn save(&self, config: &SlotConfig) -> Result<()> {
        let config = config.clone().normalized();
        let content =
            serde_json::to_string_pretty(&config).context("Failed to serialize config")?;

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }
        fs::write(&self.path, content).context("Failed to write config file")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SLOT_COUNT;

    fn store_in(dir: &tempfile::TempDir) -> SlotStore {
        SlotStore::at(dir.path().join(CONFIG_FILE))
    }

    #[test]
    fn test_missing_file_yields_defaults_and_writes_them() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let config = store.load();
        assert_eq!(config.slots.len(), SLOT_COUNT);
        assert_eq!(
            config.slots[0].as_ref().and_then(|s| s.title.as_deref()),
            Some("Terminal")
        );
        assert_eq!(
            config.slots[2].as_ref().and_then(|s| s.kind),
            Some(SlotKind::Url)
        );
        assert!(config.slots[4..].iter().all(Option::is_none));

        // The defaults were persisted, so a second load parses the file.
        assert!(store.path().exists());
        assert_eq!(store.load(), config);
    }

    #[test]
    fn test_corrupt_file_yields_defaults_and_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();

        let config = store.load();
        assert_eq!(config, default_config());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_short_list_is_padded_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            r#"{"slots":[{"title":"A","type":"app","target":"a"},null,{"title":"C","type":"url","target":"https://c"}]}"#,
        )
        .unwrap();

        let config = store.load();
        assert_eq!(config.slots.len(), SLOT_COUNT);
        assert_eq!(
            config.slots[0].as_ref().and_then(|s| s.title.as_deref()),
            Some("A")
        );
        assert!(config.slots[3..].iter().all(Option::is_none));
    }

    #[test]
    fn test_long_list_is_truncated_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let slots: Vec<String> = (0..12)
            .map(|i| format!(r#"{{"title":"S{i}","type":"app","target":"t"}}"#))
            .collect();
        fs::write(
            store.path(),
            format!(r#"{{"slots":[{}]}}"#, slots.join(",")),
        )
        .unwrap();

        let config = store.load();
        assert_eq!(config.slots.len(), SLOT_COUNT);
        assert_eq!(
            config.slots[8].as_ref().and_then(|s| s.title.as_deref()),
            Some("S8")
        );
    }

    #[test]
    fn test_save_normalizes_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let config = SlotConfig {
            slots: vec![Some(
                Slot::new("Only", SlotKind::Command, "echo $HOME").with_icon("icons/only.png"),
            )],
        };
        store.save(&config).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.slots.len(), SLOT_COUNT);
        assert_eq!(loaded.slots[0], config.slots[0]);
        assert!(loaded.slots[1..].iter().all(Option::is_none));
    }
}

//! Persisted settings: categories, last folder and window placement.

use crate::config::{
    DEFAULT_UI_BACKEND, DEFAULT_WINDOW_SIZE, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME,
};
use crate::error::{Result, SortError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One category slot as written to disk. Empty strings mean "unconfigured".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
}

fn default_window_size() -> [u32; 2] {
    DEFAULT_WINDOW_SIZE
}

fn default_ui_backend() -> String {
    DEFAULT_UI_BACKEND.to_string()
}

/// The flat settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub last_folder: String,
    #[serde(default = "default_window_size")]
    pub window_size: [u32; 2],
    #[serde(default)]
    pub window_position: Option<[i32; 2]>,
    #[serde(default = "default_ui_backend")]
    pub ui_backend: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            last_folder: String::new(),
            window_size: default_window_size(),
            window_position: None,
            ui_backend: default_ui_backend(),
        }
    }
}

/// Where settings are read from and written to.
pub trait SettingsStore {
    /// Never fails; unreadable settings fall back to defaults.
    fn load(&self) -> Settings;
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// JSON file in the platform config directory.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<config_dir>/photo-sorter/settings.json`, falling back to the temp dir.
    pub fn default_location() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(SETTINGS_DIR_NAME)
            .join(SETTINGS_FILE_NAME);
        Self::new(path)
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Settings {
        if !self.path.exists() {
            log::info!("No settings file found. Using defaults.");
            return Settings::default();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Settings loaded from: {}", self.path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Failed to parse settings file: {}. Using defaults.", e);
                    Settings::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read settings file: {}. Using defaults.", e);
                Settings::default()
            }
        }
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SortError::Settings(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json).map_err(|e| SortError::Settings(e.to_string()))?;

        log::info!("Settings saved to: {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    /// Settings kept in memory; clones share the same record.
    #[derive(Clone, Default)]
    pub struct MemorySettingsStore {
        settings: Arc<Mutex<Settings>>,
        fail_writes: bool,
    }

    impl MemorySettingsStore {
        pub fn new(settings: Settings) -> Self {
            Self {
                settings: Arc::new(Mutex::new(settings)),
                fail_writes: false,
            }
        }

        /// A store whose `save` always fails.
        pub fn read_only(settings: Settings) -> Self {
            Self {
                fail_writes: true,
                ..Self::new(settings)
            }
        }

        pub fn snapshot(&self) -> Settings {
            self.settings
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone()
        }
    }

    impl SettingsStore for MemorySettingsStore {
        fn load(&self) -> Settings {
            self.snapshot()
        }

        fn save(&self, settings: &Settings) -> Result<()> {
            if self.fail_writes {
                return Err(SortError::Settings("settings are read-only".to_string()));
            }
            *self
                .settings
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()) = settings.clone();
            Ok(())
        }
    }

    #[test]
    fn missing_file_loads_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let store = JsonSettingsStore::new(temp_dir.path().join("settings.json"));

        let settings = store.load();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.window_size, [800, 600]);
        assert_eq!(settings.ui_backend, "console");
    }

    #[test]
    fn save_then_load_preserves_record() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let store = JsonSettingsStore::new(temp_dir.path().join("nested").join("settings.json"));
        let settings = Settings {
            categories: vec![
                CategoryRecord {
                    name: "Keep".into(),
                    path: "/photos/keep".into(),
                },
                CategoryRecord::default(),
            ],
            last_folder: "/photos/inbox".into(),
            window_size: [1024, 768],
            window_position: Some([10, -20]),
            ui_backend: "console".into(),
        };

        store.save(&settings).unwrap();

        assert_eq!(store.load(), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"categories": [{"name": "Trash"}], "last_folder": "/tmp/in"}"#,
        )
        .unwrap();

        let settings = JsonSettingsStore::new(path).load();

        assert_eq!(settings.categories[0].name, "Trash");
        assert_eq!(settings.categories[0].path, "");
        assert_eq!(settings.last_folder, "/tmp/in");
        assert_eq!(settings.window_size, [800, 600]);
        assert_eq!(settings.window_position, None);
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert_eq!(JsonSettingsStore::new(path).load(), Settings::default());
    }

    #[test]
    fn unwritable_location_is_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();
        let store = JsonSettingsStore::new(blocker.join("settings.json"));

        let err = store.save(&Settings::default()).unwrap_err();
        assert!(matches!(err, SortError::Settings(_)));
    }

    #[test]
    fn memory_store_clones_share_state() {
        let store = MemorySettingsStore::default();
        let handle = store.clone();
        let mut settings = Settings::default();
        settings.last_folder = "/a".into();

        store.save(&settings).unwrap();

        assert_eq!(handle.snapshot().last_folder, "/a");
        assert!(MemorySettingsStore::read_only(Settings::default())
            .save(&settings)
            .is_err());
    }
}

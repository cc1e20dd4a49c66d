//! Persisted user settings (live in the OS config directory).

use std::path::{Path, PathBuf};

use crate::model::Filter;

const APP_NAME: &str = "ProjectBoard";
const SETTINGS_FILE: &str = "settings.json";
const STORE_FILE: &str = "projects.json";

/// Collection watched when the settings don't name one.
pub const DEFAULT_COLLECTION: &str = "projects";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Store file; `None` means `<data dir>/projects.json`.
    pub store_path: Option<PathBuf>,
    pub collection: String,
    pub filter: Filter,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            store_path: None,
            collection: DEFAULT_COLLECTION.into(),
            filter: Filter::All,
        }
    }
}

/// Where settings and the default store file live.
#[derive(Debug, Clone, PartialEq)]
pub struct AppPaths {
    pub settings: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> Self {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", APP_NAME) {
            Self {
                settings: proj_dirs.config_dir().join(SETTINGS_FILE),
                data_dir: proj_dirs.data_dir().to_path_buf(),
            }
        } else {
            let dir = PathBuf::from(".");
            Self {
                settings: dir.join(SETTINGS_FILE),
                data_dir: dir,
            }
        }
    }

    pub fn default_store(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }
}

impl AppSettings {
    /// Read settings, falling back to defaults when the file is missing or
    /// can't be parsed.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str::<AppSettings>(&text) {
            Ok(mut settings) => {
                if settings.collection.trim().is_empty() {
                    tracing::warn!("settings name an empty collection, using default");
                    settings.collection = DEFAULT_COLLECTION.into();
                }
                settings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    pub fn resolved_store_path(&self, paths: &AppPaths) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| paths.default_store())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = AppSettings::load(&tmp.path().join("settings.json"));
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.collection, "projects");
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert_eq!(AppSettings::load(&path), AppSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cfg").join("settings.json");
        let settings = AppSettings {
            store_path: Some(tmp.path().join("elsewhere.json")),
            collection: "work".into(),
            filter: Filter::Completed,
        };
        settings.save(&path).unwrap();
        assert_eq!(AppSettings::load(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, r#"{ "filter": "Active", "collection": " " }"#).unwrap();
        let settings = AppSettings::load(&path);
        assert_eq!(settings.filter, Filter::Active);
        assert_eq!(settings.collection, "projects");
        assert_eq!(settings.store_path, None);
    }

    #[test]
    fn test_store_path_defaults_to_data_dir() {
        let paths = AppPaths {
            settings: PathBuf::from("/cfg/settings.json"),
            data_dir: PathBuf::from("/data"),
        };
        let settings = AppSettings::default();
        assert_eq!(
            settings.resolved_store_path(&paths),
            PathBuf::from("/data/projects.json")
        );
    }
}

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Small persisted string map for UI preferences.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// JSON object on disk, rewritten on every `set`.
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// `prefs.json` next to the executable.
    pub fn default_path() -> PathBuf {
        let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
        let dir = exe.parent().unwrap_or(Path::new("."));
        dir.join("prefs.json")
    }

    /// A missing or unreadable file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();
        Self { path, values }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        let s = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, s).with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    pub(crate) struct MemoryStore(pub HashMap<String, String>);

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.0.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get("deepo_theme"), None);
        store.set("deepo_theme", "light").unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("deepo_theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{oops").unwrap();
        assert_eq!(JsonFileStore::open(&path).get("deepo_theme"), None);
    }

    #[test]
    fn test_unwritable_path_reports_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("missing").join("prefs.json"));
        assert!(store.set("k", "v").is_err());
    }
}

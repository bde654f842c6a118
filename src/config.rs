use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Origin serving `/api/languages` and `/api/translate`.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub input_debounce_ms: u64,
    pub selection_debounce_ms: u64,
    pub demo_debounce_ms: u64,
    pub mode: String,
    /// Drop responses that arrive after a newer edit or request.
    pub discard_stale_responses: bool,
    /// Bind address of `deepo-server`.
    pub server_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: 30,
            input_debounce_ms: 1000,
            selection_debounce_ms: 250,
            demo_debounce_ms: 200,
            mode: "lorem".to_string(),
            discard_stale_responses: true,
            server_addr: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Quiet periods used by the translation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debounce {
    pub input: Duration,
    pub selection: Duration,
    pub demo: Duration,
}

impl Default for Debounce {
    fn default() -> Self {
        Config::default().debounce()
    }
}

impl Config {
    pub fn path() -> PathBuf {
        let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
        let dir = exe.parent().unwrap_or(Path::new("."));
        dir.join("config.json")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str::<Config>(&s).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let s = serde_json::to_string_pretty(self)?;
        fs::write(path, s).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Environment variables win over the file when present and non-empty.
    pub fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("DEEPO_API_URL") { if !v.is_empty() { self.api_base_url = v; } }
        if let Ok(v) = std::env::var("DEEPO_MODE") { if !v.is_empty() { self.mode = v; } }
        if let Ok(v) = std::env::var("DEEPO_BIND") { if !v.is_empty() { self.server_addr = v; } }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn debounce(&self) -> Debounce {
        Debounce {
            input: Duration::from_millis(self.input_debounce_ms),
            selection: Duration::from_millis(self.selection_debounce_ms),
            demo: Duration::from_millis(self.demo_debounce_ms),
        }
    }
}

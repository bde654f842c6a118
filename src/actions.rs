//! Copy and download helpers over the current texts, behind injectable capabilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub trait ClipboardWriter {
    fn write_text(&self, text: &str) -> Result<()>;
}

pub trait FileSaver {
    /// Stores `contents` under `file_name` and returns where it landed.
    fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf>;
}

/// Trims `value` and copies it; blank text is a no-op and returns `false`.
pub fn copy_text(clipboard: &dyn ClipboardWriter, value: &str) -> Result<bool> {
    let text = value.trim();
    if text.is_empty() {
        return Ok(false);
    }
    clipboard.write_text(text)?;
    crate::logger::log(&format!("Copied {} chars to clipboard", text.chars().count()));
    Ok(true)
}

pub fn download_file_name(target_lang: &str) -> String {
    format!("deepo_{}.txt", target_lang)
}

/// Saves the output as `deepo_<target>.txt`. Empty output still produces a file.
pub fn download_output(saver: &dyn FileSaver, output: &str, target_lang: &str) -> Result<PathBuf> {
    let path = saver.save(&download_file_name(target_lang), output)?;
    crate::logger::log(&format!("Saved output to {}", path.display()));
    Ok(path)
}

#[cfg(windows)]
pub struct SystemClipboard;

#[cfg(windows)]
impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        clipboard_win::set_clipboard_string(text)
            .map_err(|e| anyhow::anyhow!("clipboard: {}", e))
    }
}

/// Hands the text to egui, which forwards it to the platform clipboard at the end of the frame.
pub struct EguiClipboard(pub egui::Context);

impl ClipboardWriter for EguiClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        self.0.output_mut(|o| o.copied_text = text.to_string());
        Ok(())
    }
}

/// Writes files into a directory, the user's download folder by default.
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn downloads() -> Self {
        let dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir)
    }
}

impl FileSaver for DirectorySaver {
    fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.dir.join(file_name);
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_LOG_FILE: &str = "deepo.log";

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn open(file_name: &str) -> Option<File> {
    let path = exe_dir().join(file_name);
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Opens `file_name` next to the executable and routes all later `log` calls to it.
pub fn init(file_name: &str) {
    if let Some(mut f) = open(file_name) {
        let _ = writeln!(f, "===== Deepo start ({}) =====", file_name);
        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = Some(f);
        }
    }
}

fn ts() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    format!("{}.{:03}", now.as_secs(), now.subsec_millis())
}

pub fn log(msg: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if guard.is_none() {
            // init wasn't called yet
            *guard = open(DEFAULT_LOG_FILE);
        }
        if let Some(f) = guard.as_mut() {
            let _ = writeln!(f, "[{}] {}", ts(), msg);
            let _ = f.flush();
        }
    }
}

#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use deepo::api::{HttpTranslationService, TranslationService};
use deepo::config::Config;
use deepo::logger;
use std::sync::Arc;

mod ui;

fn main() {
    // Init logger first
    logger::init(logger::DEFAULT_LOG_FILE);
    logger::log("App starting");

    // Config: config.json next to exe, env vars override if present.
    let mut cfg = Config::load();
    cfg.apply_env();
    logger::log(&format!("Config loaded; service at {}", cfg.api_base_url));

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            logger::log(&format!("tokio runtime failed: {}", e));
            return;
        }
    };

    let http = match HttpTranslationService::new(&cfg.api_base_url, cfg.request_timeout()) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            logger::log(&format!("HTTP client failed: {}", e));
            return;
        }
    };
    {
        let http = Arc::clone(&http);
        rt.spawn(async move {
            let up = http.health().await;
            logger::log(&format!("Health check {}: {}", http.base_url(), if up { "ok" } else { "unreachable" }));
        });
    }
    let service: Arc<dyn TranslationService> = http;

    // Run UI on main thread (blocks)
    ui::run(&cfg, rt.handle().clone(), service);
    logger::log("App exiting");
}

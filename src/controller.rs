//! Debounced translation controller.
//!
//! Text edits and language changes arm a single cancellable timer. When it
//! fires, one request goes out to the translation service and its outcome is
//! written into the shared display state. Every schedule, clear and swap bumps
//! a request epoch; a timer only fires for the epoch that armed it, and with
//! `discard_stale` set a response is only applied while its epoch is current.

use crate::api::{TranslationRequest, TranslationService};
use crate::config::{Config, Debounce};
use crate::error::ApiError;
use crate::languages::{LanguageDirectory, Selection, Side, AUTO};
use crate::logger;
use crate::status::Status;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub const DEMO_TEXT: &str = "Hello world. This is a Deepo interface prototype.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Scheduled,
    InFlight,
    Succeeded,
    Failed,
}

/// Everything the window renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    pub input: String,
    pub output: String,
    pub status: Status,
    pub selection: Selection,
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub debounce: Debounce,
    pub mode: String,
    pub discard_stale: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ControllerOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self { debounce: cfg.debounce(), mode: cfg.mode.clone(), discard_stale: cfg.discard_stale_responses }
    }
}

struct Shared {
    display: DisplayState,
    phase: Phase,
    epoch: u64,
    in_flight: usize,
    issued: u64,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct TranslationController {
    service: Arc<dyn TranslationService>,
    runtime: Handle,
    options: ControllerOptions,
    shared: Arc<Mutex<Shared>>,
    timer: Option<JoinHandle<()>>,
}

impl TranslationController {
    pub fn new(service: Arc<dyn TranslationService>, runtime: Handle, options: ControllerOptions) -> Self {
        let shared = Shared {
            display: DisplayState::default(),
            phase: Phase::Idle,
            epoch: 0,
            in_flight: 0,
            issued: 0,
        };
        Self { service, runtime, options, shared: Arc::new(Mutex::new(shared)), timer: None }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        lock(&self.shared)
    }

    pub fn snapshot(&self) -> DisplayState {
        self.lock().display.clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    pub fn status(&self) -> Status {
        self.lock().display.status.clone()
    }

    pub fn selection(&self) -> Selection {
        self.lock().display.selection.clone()
    }

    pub fn input_len(&self) -> usize {
        self.lock().display.input.chars().count()
    }

    /// Requests handed to the service so far.
    pub fn requests_issued(&self) -> u64 {
        self.lock().issued
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn on_input_changed(&mut self, text: &str) {
        self.lock().display.input = text.to_string();
        self.schedule(self.options.debounce.input);
    }

    pub fn select_language(&mut self, side: Side, code: &str) {
        {
            let mut s = self.lock();
            s.display.selection.set(side, code);
        }
        logger::log(&format!("Language {:?} -> {}", side, code));
        self.schedule(self.options.debounce.selection);
    }

    /// Swaps languages and texts; refused while the source is auto-detected.
    pub fn swap(&mut self) {
        {
            let mut s = self.lock();
            if s.display.selection.source_lang == AUTO {
                s.display.status = Status::NeedSourceLanguage;
                logger::log("Swap refused: source language is auto");
                return;
            }
            s.display.selection.swap();
            let d = &mut s.display;
            std::mem::swap(&mut d.input, &mut d.output);
            logger::log(&format!("Swapped to {} -> {}", d.selection.source_lang, d.selection.target_lang));
        }
        self.schedule(self.options.debounce.selection);
    }

    pub fn fill_demo(&mut self) {
        self.lock().display.input = DEMO_TEXT.to_string();
        self.schedule(self.options.debounce.demo);
    }

    pub fn clear(&mut self) {
        self.cancel_timer();
        let mut s = self.lock();
        s.epoch += 1;
        s.display.input.clear();
        s.display.output.clear();
        s.display.status = Status::Ready;
        s.phase = Phase::Idle;
        logger::log("Cleared input and output");
    }

    /// Adopts the directory's default selection; missing defaults keep the built-ins.
    pub fn apply_directory(&mut self, dir: &LanguageDirectory) {
        let mut s = self.lock();
        s.display.selection.apply_defaults(&dir.defaults);
        logger::log(&format!(
            "Directory applied: {} source, {} target, selection {} -> {}",
            dir.source.len(),
            dir.target.len(),
            s.display.selection.source_lang,
            s.display.selection.target_lang
        ));
    }

    /// Status set by the surrounding glue (copy, download).
    pub fn report(&self, status: Status) {
        self.lock().display.status = status;
    }

    /// Cancels the pending timer and re-arms it with `delay`; blank input goes straight to Idle.
    pub fn schedule(&mut self, delay: Duration) {
        self.cancel_timer();
        let epoch = {
            let mut s = self.lock();
            s.epoch += 1;
            if s.display.input.trim().is_empty() {
                s.display.output.clear();
                s.display.status = Status::Ready;
                s.phase = Phase::Idle;
                return;
            }
            s.display.status = Status::Waiting;
            s.phase = Phase::Scheduled;
            s.epoch
        };

        let shared = Arc::clone(&self.shared);
        let service = Arc::clone(&self.service);
        let mode = self.options.mode.clone();
        let discard_stale = self.options.discard_stale;
        self.timer = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            fire(shared, service, epoch, mode, discard_stale);
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    /// Teardown: no timer survives the controller. In-flight requests finish on their own.
    pub fn shutdown(&mut self) {
        self.cancel_timer();
        self.lock().epoch += 1;
        logger::log("Controller shut down");
    }
}

impl Drop for TranslationController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

fn fire(shared: Arc<Mutex<Shared>>, service: Arc<dyn TranslationService>, epoch: u64, mode: String, discard_stale: bool) {
    let req = {
        let mut s = lock(&shared);
        if s.epoch != epoch {
            return;
        }
        match TranslationRequest::new(&s.display.input, &s.display.selection, &mode) {
            None => {
                s.display.output.clear();
                s.display.status = Status::Ready;
                s.phase = Phase::Idle;
                return;
            }
            Some(req) => {
                s.display.status = Status::Translating;
                s.phase = Phase::InFlight;
                s.in_flight += 1;
                s.issued += 1;
                req
            }
        }
    };
    logger::log(&format!(
        "Translating {} chars {} -> {} (epoch {})",
        req.text.chars().count(),
        req.source_lang,
        req.target_lang,
        epoch
    ));

    // Detached from the timer so cancelling a timer never aborts a request.
    tokio::spawn(async move {
        let outcome = service.translate(&req).await;
        resolve(&shared, epoch, outcome, discard_stale);
    });
}

fn resolve(
    shared: &Mutex<Shared>,
    epoch: u64,
    outcome: Result<crate::api::TranslationResult, ApiError>,
    discard_stale: bool,
) {
    let mut s = lock(shared);
    s.in_flight = s.in_flight.saturating_sub(1);
    if discard_stale && s.epoch != epoch {
        logger::log(&format!("Discarding stale response (epoch {}, current {})", epoch, s.epoch));
        return;
    }
    match outcome {
        Ok(res) => {
            logger::log(&format!("Translation OK in {} ms", res.elapsed_ms));
            s.display.output = res.translated_text;
            s.display.status = Status::Translated { elapsed_ms: res.elapsed_ms };
            s.phase = Phase::Succeeded;
        }
        Err(e) => {
            logger::log(&format!("Translation error: {}", e));
            s.display.status = Status::Failed(e.to_string());
            s.phase = Phase::Failed;
        }
    }
}

/// Startup fetch of the language directory. Failure degrades to built-in defaults.
pub async fn fetch_directory(service: &dyn TranslationService) -> Option<LanguageDirectory> {
    match service.languages().await {
        Ok(dir) => {
            logger::log(&format!("Languages loaded: {:?} / {:?}", dir.source, dir.target));
            Some(dir)
        }
        Err(e) => {
            logger::log(&format!("Languages unavailable, using defaults: {}", e));
            None
        }
    }
}

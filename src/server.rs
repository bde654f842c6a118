//! Reference backend serving the endpoints the desktop client talks to.

use crate::languages::{LanguageDefaults, LanguageDirectory};
use crate::{logger, lorem};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::future::Future;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub const MODE: &str = "lorem";

const SOURCE_LANGS: [&str; 7] = ["auto", "en", "fr", "es", "de", "it", "ar"];
const TARGET_LANGS: [&str; 6] = ["fr", "en", "es", "de", "it", "ar"];

fn default_source() -> String {
    "auto".to_string()
}

fn default_target() -> String {
    "fr".to_string()
}

fn default_mode() -> String {
    MODE.to_string()
}

#[derive(Debug, Deserialize)]
pub struct TranslatePayload {
    pub text: String,
    #[serde(default = "default_source")]
    pub source_lang: String,
    #[serde(default = "default_target")]
    pub target_lang: String,
    #[serde(default = "default_mode")]
    pub mode: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateReply {
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub mode: String,
    pub elapsed_ms: u64,
}

/// Error answer carrying a `{"detail": ...}` body.
#[derive(Debug)]
pub struct Failure(StatusCode, String);

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "detail": self.1 }))).into_response()
    }
}

pub fn create_routes() -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/languages", get(languages))
        .route("/api/translate", post(translate))
        .layer(CorsLayer::permissive())
}

pub fn directory() -> LanguageDirectory {
    LanguageDirectory {
        source: SOURCE_LANGS.iter().map(|s| s.to_string()).collect(),
        target: TARGET_LANGS.iter().map(|s| s.to_string()).collect(),
        defaults: LanguageDefaults { source: Some("auto".to_string()), target: Some("fr".to_string()) },
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok", "mode": MODE }))
}

async fn languages() -> Json<LanguageDirectory> {
    Json(directory())
}

fn validate(payload: &TranslatePayload) -> Result<(), Failure> {
    if payload.text.is_empty() {
        return Err(Failure(StatusCode::UNPROCESSABLE_ENTITY, "text: must not be empty".to_string()));
    }
    for (field, code) in [("source_lang", &payload.source_lang), ("target_lang", &payload.target_lang)] {
        let len = code.chars().count();
        if !(2..=10).contains(&len) {
            return Err(Failure(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("{}: must be 2 to 10 characters", field),
            ));
        }
    }
    if payload.mode != MODE {
        return Err(Failure(StatusCode::UNPROCESSABLE_ENTITY, format!("mode: unsupported '{}'", payload.mode)));
    }
    Ok(())
}

async fn translate(payload: Result<Json<TranslatePayload>, JsonRejection>) -> Result<Json<TranslateReply>, Failure> {
    let Json(payload) = payload.map_err(|e| Failure(StatusCode::UNPROCESSABLE_ENTITY, e.body_text()))?;
    validate(&payload)?;

    let text = payload.text.trim();
    if text.is_empty() {
        return Err(Failure(StatusCode::BAD_REQUEST, "Empty text".to_string()));
    }

    let t0 = Instant::now();
    let translated_text = lorem::from_text(text);
    let elapsed_ms = t0.elapsed().as_millis() as u64;
    logger::log(&format!(
        "Server: translated {} chars {} -> {} in {} ms",
        text.chars().count(),
        payload.source_lang,
        payload.target_lang,
        elapsed_ms
    ));

    Ok(Json(TranslateReply {
        translated_text,
        source_lang: payload.source_lang,
        target_lang: payload.target_lang,
        mode: payload.mode,
        elapsed_ms,
    }))
}

/// Serves on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        logger::log(&format!("Server: listening on {}", addr));
    }
    axum::serve(listener, create_routes()).with_graceful_shutdown(shutdown).await?;
    logger::log("Server: stopped");
    Ok(())
}

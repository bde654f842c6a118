//! Client side of the translation service: wire types, the service seam and
//! the reqwest-backed implementation.

use crate::error::ApiError;
use crate::languages::{LanguageDirectory, Selection};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Body of `POST /api/translate`. Built fresh for every attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub mode: String,
}

impl TranslationRequest {
    /// `None` when the text is empty after trimming.
    pub fn new(text: &str, selection: &Selection, mode: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            source_lang: selection.source_lang.clone(),
            target_lang: selection.target_lang.clone(),
            mode: mode.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
    pub elapsed_ms: f64,
}

#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn languages(&self) -> Result<LanguageDirectory, ApiError>;

    async fn translate(&self, req: &TranslationRequest) -> Result<TranslationResult, ApiError>;
}

pub struct HttpTranslationService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranslationService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::rejected(status.as_u16(), &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// `GET /api/health`; true when the service answers with a 2xx.
    pub async fn health(&self) -> bool {
        match self.client.get(self.url("/api/health")).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl TranslationService for HttpTranslationService {
    async fn languages(&self) -> Result<LanguageDirectory, ApiError> {
        let resp = self.client.get(self.url("/api/languages")).send().await?;
        Self::read_json(resp).await
    }

    async fn translate(&self, req: &TranslationRequest) -> Result<TranslationResult, ApiError> {
        let resp = self.client.post(self.url("/api/translate")).json(req).send().await?;
        Self::read_json(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_trims_and_rejects_blank() {
        let sel = Selection::default();
        assert!(TranslationRequest::new("  \n\t ", &sel, "lorem").is_none());

        let req = TranslationRequest::new("  Hello ", &sel, "lorem").unwrap();
        assert_eq!(req.text, "Hello");
        assert_eq!(req.source_lang, "auto");
        assert_eq!(req.target_lang, "fr");

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["mode"], "lorem");
    }

    #[test]
    fn test_result_ignores_extra_fields() {
        let res: TranslationResult = serde_json::from_str(
            r#"{"translated_text":"Bonjour","source_lang":"auto","target_lang":"fr","mode":"lorem","elapsed_ms":42}"#,
        )
        .unwrap();
        assert_eq!(res.translated_text, "Bonjour");
        assert_eq!(res.elapsed_ms, 42.0);
    }
}

use std::path::Path;

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue, PRAGMA,
    USER_AGENT,
};
use serde::{Deserialize, Serialize};

/// Status code the OCR service returns when recognition succeeded
pub const SUCCESS_STATUS: &str = "000";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/74.0.3729.157 Safari/537.36";

/// Result of one recognition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OcrOutcome {
    /// One line per recognized block, each terminated by `\n`
    Recognized(String),
    NoTextFound,
    /// The request itself failed: file, transport or response format
    RequestFailed(String),
}

/// Anything that can turn a saved capture into text
#[async_trait::async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, image_path: &Path) -> OcrOutcome;
}

#[derive(Serialize)]
struct OcrRequest {
    images: Vec<String>,
}

#[derive(Deserialize)]
struct OcrResponse {
    status: serde_json::Value,
    #[serde(default)]
    results: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct OcrFragment {
    text: String,
}

/// Client for the remote OCR endpoint
///
/// One POST per call. No retries and no timeout beyond what the transport
/// itself enforces.
#[derive(Clone)]
pub struct OcrClient {
    endpoint: String,
    client: reqwest::Client,
}

impl OcrClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    async fn post_image(&self, image_path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(image_path)
            .await
            .with_context(|| format!("Failed to read {}", image_path.display()))?;

        let request = OcrRequest {
            images: vec![BASE64.encode(&bytes)],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to OCR service")?;

        let status = response.status();
        tracing::debug!("OCR service answered with HTTP {}", status);

        response
            .text()
            .await
            .with_context(|| format!("Failed to read OCR response body (HTTP {status})"))
    }
}

#[async_trait::async_trait]
impl Recognizer for OcrClient {
    async fn recognize(&self, image_path: &Path) -> OcrOutcome {
        match self.post_image(image_path).await {
            Ok(body) => parse_response(&body),
            Err(e) => {
                tracing::warn!("OCR request failed: {:#}", e);
                OcrOutcome::RequestFailed(format!("{e:#}"))
            }
        }
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Interpret a response body from the OCR service
pub fn parse_response(body: &str) -> OcrOutcome {
    let response: OcrResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(e) => return OcrOutcome::RequestFailed(format!("Invalid OCR response: {e}")),
    };

    if response.status.as_str() != Some(SUCCESS_STATUS) {
        tracing::debug!("OCR service returned status {}", response.status);
        return OcrOutcome::NoTextFound;
    }

    let Some(results) = response.results else {
        return OcrOutcome::NoTextFound;
    };

    let blocks: Vec<Vec<OcrFragment>> = match serde_json::from_value(results) {
        Ok(blocks) => blocks,
        Err(e) => return OcrOutcome::RequestFailed(format!("Invalid OCR results: {e}")),
    };

    let text = blocks
        .iter()
        .flatten()
        .fold(String::new(), |mut text, fragment| {
            text.push_str(&fragment.text);
            text.push('\n');
            text
        });

    if text.trim().is_empty() {
        OcrOutcome::NoTextFound
    } else {
        OcrOutcome::Recognized(text)
    }
}

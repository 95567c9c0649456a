//! Blocking HTTP client for the translations API.
//!
//! Every command works offline: when the server is unreachable or
//! reports failure, `fetch_book_or_builtin` falls back to the
//! compiled-in dictionary so lookups still answer.

use std::time::Duration;

use fanyi_core::builtin::builtin_book;
use fanyi_core::dictionary::PhraseBook;
use fanyi_core::wire::{AddRequest, AddResponse, TranslationsResponse};

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8787";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("server error: {0}")]
    Server(String),
}

pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        // Error statuses carry the API's JSON failure body, so keep them
        // as responses instead of transport errors.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(10)))
            .build()
            .into();
        Self { agent, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/translations`, rebuilt into a `PhraseBook`.
    pub fn fetch_book(&self) -> Result<PhraseBook, ClientError> {
        let url = format!("{}/api/translations", self.base_url);
        let body = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| ClientError::Http(format!("{url}: {e}")))?
            .into_body()
            .read_to_string()
            .map_err(|e| ClientError::Http(format!("{url}: {e}")))?;
        let response: TranslationsResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Parse(format!("{url}: {e}")))?;
        let reported = response.error.clone();
        response.into_book().ok_or_else(|| {
            ClientError::Server(reported.unwrap_or_else(|| "empty response".to_string()))
        })
    }

    /// Fetch from the server, falling back to the builtin dictionary.
    pub fn fetch_book_or_builtin(&self) -> PhraseBook {
        match self.fetch_book() {
            Ok(book) => book,
            Err(err) => {
                eprintln!("{err}; using builtin dictionary");
                builtin_book()
            }
        }
    }

    /// `POST /api/translations/add`. Rejections (missing fields,
    /// duplicates) come back as a failure `AddResponse`, not an `Err`.
    pub fn add(&self, english: &str, chinese: &str) -> Result<AddResponse, ClientError> {
        let url = format!("{}/api/translations/add", self.base_url);
        let payload = serde_json::to_string(&AddRequest {
            english: english.to_string(),
            chinese: chinese.to_string(),
        })
        .map_err(|e| ClientError::Parse(e.to_string()))?;
        let body = self
            .agent
            .post(&url)
            .header("content-type", "application/json")
            .send(payload.as_str())
            .map_err(|e| ClientError::Http(format!("{url}: {e}")))?
            .into_body()
            .read_to_string()
            .map_err(|e| ClientError::Http(format!("{url}: {e}")))?;
        serde_json::from_str(&body).map_err(|e| ClientError::Parse(format!("{url}: {e}")))
    }
}

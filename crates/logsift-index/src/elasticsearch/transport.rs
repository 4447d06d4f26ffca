//! Blocking HTTP transport with retry, exponential backoff, and timeout.

use std::time::Duration;

use serde_json::Value;

use logsift_core::errors::IndexError;

/// Configuration for the HTTP transport layer.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Base URL of the service, without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
    /// Initial backoff (doubles each retry).
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: logsift_core::constants::DEFAULT_INDEX_URL.to_string(),
            timeout: Duration::from_millis(logsift_core::constants::DEFAULT_REQUEST_TIMEOUT_MS),
            max_retries: logsift_core::constants::DEFAULT_MAX_RETRIES,
            initial_backoff: Duration::from_millis(
                logsift_core::constants::DEFAULT_INITIAL_BACKOFF_MS,
            ),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// Request payloads.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(Value),
    /// Newline-delimited JSON, as the bulk API expects.
    Ndjson(String),
}

/// Shared HTTP client for one service.
#[derive(Debug)]
pub struct HttpTransport {
    config: TransportConfig,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self, IndexError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(|e| IndexError::Unreachable {
                index: config.base_url.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Send a request, retrying connection failures and 5xx responses.
    ///
    /// 4xx responses fail immediately with [`IndexError::BadStatus`].
    /// `index` only labels errors.
    pub fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&RequestBody>,
        index: &str,
    ) -> Result<Value, IndexError> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut backoff = self.config.initial_backoff;
        let mut last_err = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::debug!(
                    "index: retry attempt {}/{} after {:?}",
                    attempt,
                    self.config.max_retries,
                    backoff
                );
                std::thread::sleep(backoff);
                backoff = (backoff * 2).min(self.config.max_backoff);
            }

            let mut req = self.client.request(method.clone(), &url);
            match body {
                Some(RequestBody::Json(value)) => req = req.json(value),
                Some(RequestBody::Ndjson(text)) => {
                    req = req
                        .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
                        .body(text.clone());
                }
                None => {}
            }

            match req.send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.json::<Value>().map_err(|e| IndexError::MalformedResponse {
                            index: index.to_string(),
                            reason: e.to_string(),
                        });
                    }
                    if status.is_client_error() {
                        return Err(IndexError::BadStatus {
                            index: index.to_string(),
                            status: status.as_u16(),
                            body: resp.text().unwrap_or_default(),
                        });
                    }
                    last_err = format!("HTTP {status}");
                }
                Err(e) => {
                    last_err = e.to_string();
                }
            }
        }

        Err(IndexError::Unreachable {
            index: index.to_string(),
            reason: format!(
                "gave up after {} attempts: {last_err}",
                self.config.max_retries + 1
            ),
        })
    }
}

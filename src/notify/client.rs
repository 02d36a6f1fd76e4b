//! HTTP client for the notification microservice
//!
//! Every outbound call goes through [`NotificationService::request`],
//! which is the only place that knows how requests are encoded and
//! how responses are decoded. Failures never escape as errors: they
//! are written to the notification log and collapse to `None`.

use std::time::Duration;

use anyhow::Result;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::{Map, Value};

use super::models::ServiceResponse;
use crate::core::{AppConfig, NotificationLog, resolve_base_url};

/// Total time allowed for a single call, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
}

#[derive(Clone, Debug)]
pub struct NotificationService {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
    log: NotificationLog,
}

impl NotificationService {
    pub fn new(base_url: &str, log: NotificationLog) -> Result<Self> {
        Self::with_timeout(base_url, log, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, log: NotificationLog, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: resolve_base_url(Some(base_url)),
            client,
            timeout,
            log,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.notifications_service_url,
            NotificationLog::new(&config.log_path),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn log(&self) -> &NotificationLog {
        &self.log
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Call `endpoint` on the notification service.
    ///
    /// GET sends the payload as a query string, POST sends it as a JSON
    /// object (an empty payload is sent as `{}`). Returns the decoded
    /// body only when the service answered below 400 with a JSON object.
    pub async fn request(
        &self,
        endpoint: &str,
        payload: &Map<String, Value>,
        method: RequestMethod,
    ) -> Option<ServiceResponse> {
        let mut url = match reqwest::Url::parse(&format!("{}{}", self.base_url, endpoint)) {
            Ok(url) => url,
            Err(e) => {
                self.log.log(&format!(
                    "Request failed: invalid url {}{}: {}",
                    self.base_url, endpoint, e
                ));
                return None;
            }
        };

        let builder = match method {
            RequestMethod::Get => {
                if !payload.is_empty() {
                    let mut pairs = url.query_pairs_mut();
                    for (key, value) in payload {
                        for (name, v) in query_pairs(key, value) {
                            pairs.append_pair(&name, &v);
                        }
                    }
                }
                self.client.get(url)
            }
            RequestMethod::Post => {
                let body = Value::Object(payload.clone()).to_string();
                self.client.post(url).body(body)
            }
        };

        let response = match builder
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.log.log(&format!("Request failed: {}", e));
                return None;
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                self.log.log(&format!("Request failed: {}", e));
                return None;
            }
        };

        if status.as_u16() >= 400 {
            self.log.log(&format!(
                "Service responded with HTTP {}: {}",
                status.as_u16(),
                body
            ));
            return None;
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Serialize `payload` into a JSON object and send it.
    pub async fn send<T: Serialize>(
        &self,
        endpoint: &str,
        payload: &T,
        method: RequestMethod,
    ) -> Option<ServiceResponse> {
        match serde_json::to_value(payload) {
            Ok(Value::Object(map)) => self.request(endpoint, &map, method).await,
            Ok(other) => {
                tracing::error!("Payload for {} is not an object: {}", endpoint, other);
                None
            }
            Err(e) => {
                tracing::error!("Unable to serialize payload for {}: {}", endpoint, e);
                None
            }
        }
    }
}

// Null values are dropped and scalars use their plain text form.
// Objects and arrays expand to bracketed keys: `a[b]=1`, `a[0]=x`.
fn query_pairs(key: &str, value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => vec![(key.to_string(), s.clone())],
        Value::Bool(true) => vec![(key.to_string(), "1".to_string())],
        Value::Bool(false) => vec![(key.to_string(), "0".to_string())],
        Value::Number(n) => vec![(key.to_string(), n.to_string())],
        Value::Array(items) => items
            .iter()
            .enumerate()
            .flat_map(|(i, v)| query_pairs(&format!("{}[{}]", key, i), v))
            .collect(),
        Value::Object(fields) => fields
            .iter()
            .flat_map(|(k, v)| query_pairs(&format!("{}[{}]", key, k), v))
            .collect(),
    }
}

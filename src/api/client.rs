use crate::api::models::{ChatRequest, RemoteReply};
use crate::api::response::{parse_error_detail, parse_reply};
use crate::error::{AbotError, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;

pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.abot.phaidelta.com/chat";

/// Thin client for the Abot chat endpoint. One POST per message, no retries.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AbotError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Send `text` on behalf of `sender_id` and return the first reply.
    pub async fn send_message(&self, text: &str, sender_id: &str) -> Result<RemoteReply> {
        let request_body = ChatRequest { text, sender_id };

        log::debug!("POST {} (sender_id={})", self.endpoint, sender_id);
        let response = self
            .http
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        log::debug!("Response status: {}, body: {}", status, body);

        if !status.is_success() {
            return Err(AbotError::Http {
                status: status.as_u16(),
                detail: parse_error_detail(&body),
            });
        }

        parse_reply(&body)
    }
}

//! Runs reply calls on the session's worker pool.
//!
//! A pending reply always resolves to a [`ChatTurn`]: failures of the reply
//! source are turned into error bubbles here, so the render loop never has to
//! handle them.

use crate::api::ApiClient;
use crate::canned::CannedResponder;
use crate::config::{Config, ReplySourceKind};
use crate::error::{AbotError, Result};
use crate::models::ChatTurn;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[async_trait]
pub trait ReplySource: Send + Sync {
    /// Produce the assistant's reply to `text`.
    async fn reply(&self, text: &str, session_id: &str) -> Result<ChatTurn>;

    fn name(&self) -> &'static str;
}

/// Replies from the remote chat API.
pub struct RemoteSource {
    client: ApiClient,
}

impl RemoteSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReplySource for RemoteSource {
    async fn reply(&self, text: &str, session_id: &str) -> Result<ChatTurn> {
        let reply = self.client.send_message(text, session_id).await?;
        Ok(reply.into_turn())
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// Replies from the offline demo table.
pub struct CannedSource {
    responder: CannedResponder,
}

impl CannedSource {
    pub fn new(responder: CannedResponder) -> Self {
        Self { responder }
    }
}

#[async_trait]
impl ReplySource for CannedSource {
    async fn reply(&self, text: &str, _session_id: &str) -> Result<ChatTurn> {
        Ok(self.responder.respond(text).await)
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

/// Map a reply-source outcome to the turn shown in the chat.
pub fn into_reply_turn(result: Result<ChatTurn>) -> ChatTurn {
    match result {
        Ok(turn) => turn,
        Err(AbotError::Http { status, detail }) => {
            log::warn!("Chat API returned status {}: {}", status, detail);
            ChatTurn::error(&detail)
        }
        Err(e) => {
            log::warn!("Reply failed: {}", e);
            ChatTurn::no_response()
        }
    }
}

/// Handle to a reply call running on the worker pool.
pub struct PendingReply {
    handle: JoinHandle<ChatTurn>,
}

impl PendingReply {
    pub async fn wait(self) -> ChatTurn {
        match self.handle.await {
            Ok(turn) => turn,
            Err(e) => {
                log::error!("Reply task did not complete: {}", e);
                ChatTurn::no_response()
            }
        }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    source: Arc<dyn ReplySource>,
}

impl Dispatcher {
    pub fn new(source: Arc<dyn ReplySource>) -> Self {
        Self { source }
    }

    /// Build the reply source selected in `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let source: Arc<dyn ReplySource> = match config.reply_source {
            ReplySourceKind::Remote => {
                let client = ApiClient::new(config.api_endpoint.clone(), config.request_timeout)?;
                Arc::new(RemoteSource::new(client))
            }
            ReplySourceKind::Canned => {
                let responder = CannedResponder::new(&config.chart_dir, config.canned_delay)?;
                Arc::new(CannedSource::new(responder))
            }
        };
        log::info!("Using {} reply source", source.name());
        Ok(Self::new(source))
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Spawn the reply call on `pool` and return immediately.
    pub fn submit(&self, pool: &Handle, text: &str, session_id: &str) -> PendingReply {
        let source = Arc::clone(&self.source);
        let text = text.to_string();
        let session_id = session_id.to_string();

        log::debug!("Dispatching reply for {:?} via {}", text, source.name());
        let handle = pool.spawn(async move { into_reply_turn(source.reply(&text, &session_id).await) });

        PendingReply { handle }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_becomes_red_bubble() {
        let turn = into_reply_turn(Err(AbotError::Http {
            status: 429,
            detail: "rate limited".to_string(),
        }));
        assert_eq!(turn.text.as_deref(), Some("Error: rate limited"));
        assert_eq!(
            turn.extras.as_ref().and_then(|e| e.color.as_deref()),
            Some("red")
        );
    }

    #[test]
    fn test_other_errors_become_no_response() {
        for err in [
            AbotError::NoResponse("connection refused".to_string()),
            AbotError::MalformedReply("Empty reply array".to_string()),
        ] {
            let turn = into_reply_turn(Err(err));
            assert_eq!(turn.text.as_deref(), Some("Error: No response received"));
            assert!(turn.extras.is_none());
        }
    }
}

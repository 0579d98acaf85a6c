use crate::api::models::{ErrorBody, RemoteReply};
use crate::error::{AbotError, Result};
use crate::models::{Button, ChatTurn, Extras};
use serde_json::Value;

pub const ATTACHMENT_LABEL: &str = ":page_facing_up: View attachment";

/// Parse a successful response body and keep only the first reply.
pub fn parse_reply(body: &str) -> Result<RemoteReply> {
    let response_json: Value = serde_json::from_str(body)
        .map_err(|e| AbotError::MalformedReply(format!("Invalid JSON: {}", e)))?;

    let replies = response_json
        .as_array()
        .ok_or_else(|| AbotError::MalformedReply("Expected a reply array".to_string()))?;

    let first = replies
        .first()
        .ok_or_else(|| AbotError::MalformedReply("Empty reply array".to_string()))?;

    serde_json::from_value(first.clone())
        .map_err(|e| AbotError::MalformedReply(format!("Unexpected reply shape: {}", e)))
}

/// Extract `detail` from an error body, falling back to the raw text.
pub fn parse_error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => error.detail,
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

impl RemoteReply {
    /// Normalize the reply into an AI turn: titles become plain buttons, an
    /// attachment becomes a trailing link, then `custom` is merged on top.
    pub fn into_turn(self) -> ChatTurn {
        let mut extras = Extras {
            buttons: self.buttons.unwrap_or_default(),
            ..Default::default()
        };

        if let Some(url) = self.attachment {
            extras.buttons.push(Button::link(ATTACHMENT_LABEL, url));
        }

        if let Some(custom) = self.custom {
            extras.merge_custom(custom);
        }

        let turn = match self.text {
            Some(text) => ChatTurn::ai(text),
            None => ChatTurn::ai_empty(),
        };
        turn.with_extras(extras)
    }
}

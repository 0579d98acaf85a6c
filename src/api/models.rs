use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::Button;

#[derive(Serialize)]
pub struct ChatRequest<'a> {
    pub text: &'a str,
    pub sender_id: &'a str,
}

/// One element of the chat endpoint's reply array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteReply {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub buttons: Option<Vec<Button>>,
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub custom: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

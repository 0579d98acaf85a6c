use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::Button;

pub const ERROR_COLOR: &str = "red";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Ai,
}

/// Structured side-payload of a turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extras {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Fields of the chat API's `custom` object with no built-in meaning.
    #[serde(flatten)]
    pub passthrough: Map<String, Value>,
}

impl Extras {
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
            && self.chart.is_none()
            && self.color.is_none()
            && self.passthrough.is_empty()
    }

    /// Merge a `custom` object. Known keys override what is already set,
    /// everything else is kept verbatim.
    pub fn merge_custom(&mut self, custom: Map<String, Value>) {
        for (key, value) in custom {
            match key.as_str() {
                "buttons" => match serde_json::from_value::<Vec<Button>>(value.clone()) {
                    Ok(buttons) => self.buttons = buttons,
                    Err(e) => {
                        log::warn!("ignoring unrecognized custom buttons: {}", e);
                        self.passthrough.insert(key, value);
                    }
                },
                "chart" => self.chart = Some(value),
                "color" => match value {
                    Value::String(color) => self.color = Some(color),
                    other => {
                        self.passthrough.insert(key, other);
                    }
                },
                _ => {
                    self.passthrough.insert(key, value);
                }
            }
        }
    }

    /// The chart document, if one is present and non-empty.
    pub fn chart_document(&self) -> Option<&Value> {
        self.chart.as_ref().filter(|chart| is_truthy(chart))
    }

    pub fn is_error(&self) -> bool {
        self.color.as_deref() == Some(ERROR_COLOR)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// One entry in the conversation. Turns are never mutated after they are
/// appended to a session's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Extras>,
    pub created_at: DateTime<Local>,
}

pub fn new_turn_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl ChatTurn {
    fn new(role: Role, text: Option<String>) -> Self {
        Self {
            id: new_turn_id(),
            role,
            text,
            extras: None,
            created_at: Local::now(),
        }
    }

    pub fn human(text: impl Into<String>) -> Self {
        Self::new(Role::Human, Some(text.into()))
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Role::Ai, Some(text.into()))
    }

    /// AI turn without any text, e.g. a chart-only reply.
    pub fn ai_empty() -> Self {
        Self::new(Role::Ai, None)
    }

    /// Error bubble shown for a failed remote call.
    pub fn error(detail: &str) -> Self {
        Self::ai(format!("Error: {}", detail)).with_color(ERROR_COLOR)
    }

    pub fn no_response() -> Self {
        Self::ai("Error: No response received")
    }

    pub fn with_buttons<I, B>(mut self, buttons: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Button>,
    {
        self.extras_mut().buttons = buttons.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_chart(mut self, chart: Value) -> Self {
        self.extras_mut().chart = Some(chart);
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.extras_mut().color = Some(color.to_string());
        self
    }

    pub fn with_extras(mut self, extras: Extras) -> Self {
        self.extras = if extras.is_empty() { None } else { Some(extras) };
        self
    }

    /// Same turn under a freshly generated id.
    pub fn with_fresh_id(mut self) -> Self {
        self.id = new_turn_id();
        self
    }

    pub fn buttons(&self) -> &[Button] {
        self.extras
            .as_ref()
            .map(|e| e.buttons.as_slice())
            .unwrap_or(&[])
    }

    fn extras_mut(&mut self) -> &mut Extras {
        self.extras.get_or_insert_with(Extras::default)
    }
}

impl From<&str> for Button {
    fn from(label: &str) -> Self {
        Button::plain(label)
    }
}

impl From<String> for Button {
    fn from(label: String) -> Self {
        Button::Plain(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_error_turn_is_red() {
        let turn = ChatTurn::error("rate limited");
        assert_eq!(turn.role, Role::Ai);
        assert_eq!(turn.text.as_deref(), Some("Error: rate limited"));
        assert!(turn.extras.as_ref().unwrap().is_error());
    }

    #[test]
    fn test_merge_custom_interprets_known_keys() {
        let mut extras = Extras {
            buttons: vec![Button::plain("old")],
            ..Default::default()
        };
        let custom = json!({
            "buttons": ["new", {"label": "doc", "url": "https://x/y z"}],
            "chart": {"data": []},
            "color": "red",
            "unit": "B1 Cipla"
        });
        extras.merge_custom(custom.as_object().unwrap().clone());

        assert_eq!(
            extras.buttons,
            vec![Button::plain("new"), Button::link("doc", "https://x/y z")]
        );
        assert_eq!(extras.chart, Some(json!({"data": []})));
        assert!(extras.is_error());
        assert_eq!(extras.passthrough.get("unit"), Some(&json!("B1 Cipla")));
    }

    #[test]
    fn test_empty_chart_is_not_rendered() {
        for chart in [json!(null), json!(""), json!({}), json!(false)] {
            let extras = Extras {
                chart: Some(chart),
                ..Default::default()
            };
            assert!(extras.chart_document().is_none());
        }
    }

    #[test]
    fn test_with_extras_drops_empty_payload() {
        let turn = ChatTurn::ai("hi").with_extras(Extras::default());
        assert!(turn.extras.is_none());
        assert!(turn.buttons().is_empty());
    }

    #[test]
    fn test_turn_ids_are_unique() {
        let ids: HashSet<String> = (0..10_000).map(|_| ChatTurn::ai("x").id).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_fresh_id_keeps_content() {
        let turn = ChatTurn::ai("hi").with_buttons(["a", "b"]);
        let renewed = turn.clone().with_fresh_id();
        assert_ne!(turn.id, renewed.id);
        assert_eq!(turn.text, renewed.text);
        assert_eq!(turn.buttons(), renewed.buttons());
    }
}

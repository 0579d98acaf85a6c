use serde::{Deserialize, Serialize};

/// A quick-reply entry shown beneath a turn.
///
/// Replies arrive in several shapes (a bare label, a list of label tokens, a
/// `{title}` object from the chat API or a `{label, url}` link). They are all
/// normalized into one of these two variants when the turn is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "RawButton")]
pub enum Button {
    Plain(String),
    Link { label: String, url: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawButton {
    Label(String),
    Tokens(Vec<String>),
    Link { label: String, url: String },
    Title { title: String },
}

impl From<RawButton> for Button {
    fn from(raw: RawButton) -> Self {
        match raw {
            RawButton::Label(label) => Button::Plain(label),
            RawButton::Tokens(tokens) => Button::from_tokens(&tokens),
            RawButton::Link { label, url } => Button::Link { label, url },
            RawButton::Title { title } => Button::Plain(title),
        }
    }
}

impl Button {
    pub fn plain(label: impl Into<String>) -> Self {
        Button::Plain(label.into())
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Button::Link {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Multi-token labels are joined with a single space.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let label = tokens
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        Button::Plain(label)
    }

    /// Link target with spaces percent-encoded; `None` for plain buttons.
    pub fn encoded_url(&self) -> Option<String> {
        match self {
            Button::Plain(_) => None,
            Button::Link { url, .. } => Some(url.replace(' ', "%20")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_every_shape() {
        let buttons: Vec<Button> = serde_json::from_value(json!([
            "Chart",
            [":page_facing_up:", "View attachment"],
            {"title": "Get unit status"},
            {"label": "Report", "url": "https://files.example/report 1.xlsx"}
        ]))
        .unwrap();

        assert_eq!(
            buttons,
            vec![
                Button::plain("Chart"),
                Button::plain(":page_facing_up: View attachment"),
                Button::plain("Get unit status"),
                Button::link("Report", "https://files.example/report 1.xlsx"),
            ]
        );
    }

    #[test]
    fn test_encoded_url_only_touches_spaces() {
        let button = Button::link("Report", "https://files.example/a b/c d.pdf?x=1");
        assert_eq!(
            button.encoded_url().as_deref(),
            Some("https://files.example/a%20b/c%20d.pdf?x=1")
        );
        assert_eq!(Button::plain("Chart").encoded_url(), None);
    }

    #[test]
    fn test_serialize_keeps_plain_labels_bare() {
        let value = serde_json::to_value(vec![
            Button::plain("Chart"),
            Button::link("Report", "https://x"),
        ])
        .unwrap();
        assert_eq!(value, json!(["Chart", {"label": "Report", "url": "https://x"}]));
    }
}

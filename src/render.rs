//! Builds one full frame of the chat window from the turn log.

use crate::chart;
use crate::models::{Button, ChatTurn, Role};
use crate::ui::{expand_shortcodes, style_text};
use colored::*;

pub const TITLE: &str = "ABOT";
const INDENT: &str = "   ";

/// A rendered frame plus the labels of its clickable buttons, in the order
/// they are numbered on screen (`/1` is `actions[0]`).
#[derive(Debug, Default)]
pub struct Frame {
    pub lines: Vec<String>,
    pub actions: Vec<String>,
}

impl Frame {
    pub fn action(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.actions.get(i))
            .map(String::as_str)
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

fn bubble_header(turn: &ChatTurn) -> String {
    let time = turn.created_at.format("%H:%M").to_string();
    let who = match turn.role {
        Role::Human => "you".green().bold(),
        Role::Ai => "abot".bright_magenta().bold(),
    };
    format!("{} {}", who, time.dimmed())
}

fn render_turn(turn: &ChatTurn, width: usize, frame: &mut Frame) {
    frame.lines.push(bubble_header(turn));

    let is_error = turn.extras.as_ref().map(|e| e.is_error()).unwrap_or(false);
    if let Some(text) = turn.text.as_deref().filter(|t| !t.is_empty()) {
        for line in style_text(text).lines() {
            let line = format!("{}{}", INDENT, line);
            frame.lines.push(if is_error { line.red().to_string() } else { line });
        }
    }

    let Some(extras) = &turn.extras else {
        return;
    };

    if let Some(document) = extras.chart_document() {
        let chart_width = width.saturating_sub(INDENT.len());
        match chart::summarize(document) {
            Ok(summary) => {
                for line in summary.render(chart_width) {
                    frame.lines.push(format!("{}{}", INDENT, line));
                }
            }
            Err(e) => {
                log::warn!("Chart in turn {} could not be rendered: {}", turn.id, e);
                frame
                    .lines
                    .push(format!("{}{}", INDENT, "(chart unavailable)".dimmed()));
            }
        }
    }

    for button in &extras.buttons {
        match button {
            Button::Link { label, .. } => {
                let url = button.encoded_url().unwrap_or_default();
                frame.lines.push(format!(
                    "{}🔗 {} {}",
                    INDENT,
                    expand_shortcodes(label).bold(),
                    url.blue().underline()
                ));
            }
            Button::Plain(label) => {
                frame.actions.push(label.clone());
                let number = frame.actions.len();
                frame.lines.push(format!(
                    "{}{} {}",
                    INDENT,
                    format!("[/{}]", number).cyan(),
                    expand_shortcodes(label)
                ));
            }
        }
    }
}

/// Render every turn in append order.
pub fn render_frame(turns: &[ChatTurn], width: usize) -> Frame {
    let mut frame = Frame::default();
    frame.lines.push(format!("# {}", TITLE).bold().to_string());
    frame.lines.push("─".repeat(width.clamp(10, 200)).dimmed().to_string());

    for turn in turns {
        render_turn(turn, width, &mut frame);
        frame.lines.push(String::new());
    }

    frame
}

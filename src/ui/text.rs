//! Light markdown styling for chat text. Only the constructs the assistant
//! actually sends are handled: bullets, headings, `**bold**` and emoji
//! shortcodes.

use colored::*;
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn shortcode_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r":([a-z0-9_+-]+):").expect("shortcode pattern is valid"))
}

fn bold_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold pattern is valid"))
}

fn emoji_for(name: &str) -> Option<&'static str> {
    Some(match name {
        "page_facing_up" => "📄",
        "bar_chart" => "📊",
        "chart_with_upwards_trend" => "📈",
        "warning" => "⚠️",
        "white_check_mark" => "✅",
        "x" => "❌",
        "thermometer" => "🌡️",
        "droplet" => "💧",
        "package" => "📦",
        "link" => "🔗",
        _ => return None,
    })
}

/// Replace known `:name:` shortcodes with their emoji; unknown ones stay.
pub fn expand_shortcodes(text: &str) -> String {
    shortcode_pattern()
        .replace_all(text, |caps: &Captures| {
            emoji_for(&caps[1])
                .map(str::to_string)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn style_line(line: &str) -> String {
    let indent = line.len() - line.trim_start().len();
    let body = line.trim_start();

    if let Some(heading) = body.strip_prefix("# ").or_else(|| body.strip_prefix("## ")) {
        return heading.bold().to_string();
    }

    let (bullet, rest) = match body.strip_prefix("- ").or_else(|| body.strip_prefix("* ")) {
        Some(rest) if indent == 0 => ("• ", rest),
        Some(rest) => ("◦ ", rest),
        None => ("", body),
    };

    let rest = bold_pattern()
        .replace_all(rest, |caps: &Captures| caps[1].bold().to_string())
        .into_owned();

    format!("{}{}{}", " ".repeat(indent), bullet, rest)
}

/// Style every line of `text` for the terminal.
pub fn style_text(text: &str) -> String {
    expand_shortcodes(text)
        .lines()
        .map(style_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_shortcodes() {
        assert_eq!(
            expand_shortcodes(":page_facing_up: View attachment"),
            "📄 View attachment"
        );
        assert_eq!(expand_shortcodes("ratio 1:2:3 :unknown:"), "ratio 1:2:3 :unknown:");
    }

    #[test]
    fn test_style_text_bullets() {
        colored::control::set_override(false);
        let styled = style_text("- Unit: B3 AC\n  - Status: OUT_OF_RANGE\nplain **bold**");
        assert_eq!(styled, "• Unit: B3 AC\n  ◦ Status: OUT_OF_RANGE\nplain bold");
    }
}

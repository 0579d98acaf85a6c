//! Terminal rendering of serialized chart figures.
//!
//! Figures are plotly-style documents (`{"data": [...], "layout": {...}}`).
//! The terminal cannot plot them, so each trace is summarized with its range
//! and a sparkline spanning the full window width.

use crate::error::{AbotError, Result};
use colored::*;
use serde_json::{Map, Value};

pub const PLOT_BGCOLOR: &str = "rgba(16,24,24,0.6)";

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone, PartialEq)]
pub struct TraceSummary {
    pub name: Option<String>,
    pub values: Vec<f64>,
    pub first_x: Option<String>,
    pub last_x: Option<String>,
}

impl TraceSummary {
    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSummary {
    pub title: Option<String>,
    pub y_label: Option<String>,
    pub plot_bgcolor: String,
    pub traces: Vec<TraceSummary>,
}

/// Accept a figure object, or a string holding the serialized figure.
pub fn parse_figure(document: &Value) -> Result<Value> {
    let figure = match document {
        Value::String(raw) => serde_json::from_str(raw)
            .map_err(|e| AbotError::MalformedReply(format!("Chart is not valid JSON: {}", e)))?,
        other => other.clone(),
    };

    if figure.is_object() {
        Ok(figure)
    } else {
        Err(AbotError::MalformedReply(
            "Chart document is not a figure object".to_string(),
        ))
    }
}

/// Force the plot background to the chat theme.
pub fn apply_background(figure: &mut Value) {
    let Some(root) = figure.as_object_mut() else {
        return;
    };
    let layout = root
        .entry("layout")
        .or_insert_with(|| Value::Object(Map::new()));
    if !layout.is_object() {
        *layout = Value::Object(Map::new());
    }
    if let Some(layout) = layout.as_object_mut() {
        layout.insert(
            "plot_bgcolor".to_string(),
            Value::String(PLOT_BGCOLOR.to_string()),
        );
    }
}

fn title_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Object(o) => o.get("text").and_then(|t| t.as_str()).map(str::to_string),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn summarize(document: &Value) -> Result<ChartSummary> {
    let mut figure = parse_figure(document)?;
    apply_background(&mut figure);

    let layout = figure.get("layout");
    let traces = figure
        .get("data")
        .and_then(|d| d.as_array())
        .map(|data| {
            data.iter()
                .map(|trace| {
                    let xs = trace.get("x").and_then(|x| x.as_array());
                    TraceSummary {
                        name: trace.get("name").and_then(|n| n.as_str()).map(str::to_string),
                        values: trace
                            .get("y")
                            .and_then(|y| y.as_array())
                            .map(|ys| ys.iter().filter_map(as_number).collect())
                            .unwrap_or_default(),
                        first_x: xs.and_then(|xs| xs.first()).and_then(as_label),
                        last_x: xs.and_then(|xs| xs.last()).and_then(as_label),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(ChartSummary {
        title: title_text(layout.and_then(|l| l.get("title"))),
        y_label: title_text(layout.and_then(|l| l.get("yaxis")).and_then(|y| y.get("title"))),
        plot_bgcolor: layout
            .and_then(|l| l.get("plot_bgcolor"))
            .and_then(|c| c.as_str())
            .unwrap_or(PLOT_BGCOLOR)
            .to_string(),
        traces,
    })
}

/// Squeeze `values` into at most `width` block characters.
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let buckets: Vec<f64> = if values.len() <= width {
        values.to_vec()
    } else {
        (0..width)
            .map(|i| {
                let start = i * values.len() / width;
                let end = ((i + 1) * values.len() / width).max(start + 1);
                let slice = &values[start..end];
                slice.iter().sum::<f64>() / slice.len() as f64
            })
            .collect()
    };

    let min = buckets.iter().copied().fold(f64::INFINITY, f64::min);
    let max = buckets.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    buckets
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                SPARK_LEVELS[SPARK_LEVELS.len() / 2]
            } else {
                let level = ((v - min) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

fn parse_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let inner = color
        .trim()
        .strip_prefix("rgba(")
        .or_else(|| color.trim().strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>().ok());
    Some((parts.next()??, parts.next()??, parts.next()??))
}

impl ChartSummary {
    /// Plain text lines, each padded to `width`.
    pub fn render_plain(&self, width: usize) -> Vec<String> {
        let width = width.max(20);
        let mut lines = Vec::new();

        let title = self.title.as_deref().unwrap_or("Chart");
        lines.push(format!("📈 {}", title));

        if self.traces.is_empty() {
            lines.push("(no data)".to_string());
        }

        for trace in &self.traces {
            let name = trace.name.as_deref().unwrap_or("series");
            let unit = self.y_label.as_deref().unwrap_or("");
            match (trace.min(), trace.max(), trace.last()) {
                (Some(min), Some(max), Some(last)) => lines.push(format!(
                    "{}: {} points, min {:.1}{}, max {:.1}{}, last {:.1}{}",
                    name,
                    trace.values.len(),
                    min,
                    unit,
                    max,
                    unit,
                    last,
                    unit
                )),
                _ => lines.push(format!("{}: no numeric values", name)),
            }
            let spark = sparkline(&trace.values, width);
            if !spark.is_empty() {
                lines.push(spark);
            }
            if let (Some(first), Some(last)) = (&trace.first_x, &trace.last_x) {
                lines.push(format!("{} → {}", first, last));
            }
        }

        lines
            .into_iter()
            .map(|line| {
                let len = line.chars().count();
                if len < width {
                    format!("{}{}", line, " ".repeat(width - len))
                } else {
                    line
                }
            })
            .collect()
    }

    /// Lines painted on the plot background colour.
    pub fn render(&self, width: usize) -> Vec<String> {
        let (r, g, b) = parse_rgb(&self.plot_bgcolor).unwrap_or((16, 24, 24));
        self.render_plain(width)
            .into_iter()
            .map(|line| line.white().on_truecolor(r, g, b).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn figure() -> Value {
        json!({
            "data": [{
                "name": "B1 Cipla 1_temp",
                "x": ["2023-08-02 00:00:00", "2023-08-02 01:00:00", "2023-08-02 02:00:00"],
                "y": [24.0, 26.5, "25.1"]
            }],
            "layout": {"title": {"text": "Temperature"}, "yaxis": {"title": "°C"}, "plot_bgcolor": "white"}
        })
    }

    #[test]
    fn test_background_is_overridden() {
        let summary = summarize(&figure()).unwrap();
        assert_eq!(summary.plot_bgcolor, PLOT_BGCOLOR);

        let mut bare = json!({"data": []});
        apply_background(&mut bare);
        assert_eq!(bare["layout"]["plot_bgcolor"], PLOT_BGCOLOR);
    }

    #[test]
    fn test_summarize_reads_traces() {
        let summary = summarize(&figure()).unwrap();
        assert_eq!(summary.title.as_deref(), Some("Temperature"));
        assert_eq!(summary.y_label.as_deref(), Some("°C"));
        let trace = &summary.traces[0];
        assert_eq!(trace.values, vec![24.0, 26.5, 25.1]);
        assert_eq!(trace.min(), Some(24.0));
        assert_eq!(trace.max(), Some(26.5));
        assert_eq!(trace.last_x.as_deref(), Some("2023-08-02 02:00:00"));
    }

    #[test]
    fn test_string_document_is_parsed() {
        let raw = Value::String(figure().to_string());
        assert_eq!(summarize(&raw).unwrap().traces.len(), 1);
    }

    #[test]
    fn test_malformed_documents_are_errors() {
        assert!(summarize(&json!("not json")).is_err());
        assert!(summarize(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_sparkline_width_and_levels() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let spark = sparkline(&values, 10);
        assert_eq!(spark.chars().count(), 10);
        assert_eq!(spark.chars().next(), Some('▁'));
        assert_eq!(spark.chars().last(), Some('█'));
        assert_eq!(sparkline(&[3.0, 3.0], 10), "▅▅");
        assert_eq!(sparkline(&[], 10), "");
    }

    #[test]
    fn test_render_plain_pads_to_width() {
        let lines = summarize(&figure()).unwrap().render_plain(60);
        assert!(lines[0].contains("Temperature"));
        assert!(lines.iter().all(|l| l.chars().count() >= 60));
        assert!(lines[1].contains("3 points"));
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_rgb(PLOT_BGCOLOR), Some((16, 24, 24)));
        assert_eq!(parse_rgb("white"), None);
    }
}

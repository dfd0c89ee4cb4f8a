//! Display rendering for the terminal

use console::style;
use keypad_calc::core::history::HistoryEntry;
use keypad_calc::core::{CalcError, DisplayLines};
use keypad_calc::keypad::{Button, Keypad};
use serde::{Deserialize, Serialize};

use crate::error::CliResult;

/// Output format for the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Past line then current line
    #[default]
    Text,
    /// One JSON object
    Json,
}

/// Display after one key of a traced sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    /// Key label
    pub key: String,
    /// Past line after the key
    pub past: String,
    /// Current line after the key
    pub current: String,
}

impl TraceStep {
    /// Captures the display after `button`
    #[must_use]
    pub fn new(button: Button, lines: &DisplayLines) -> Self {
        Self {
            key: button.label(),
            past: lines.past.clone(),
            current: lines.current.clone(),
        }
    }
}

/// Everything one command prints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Per-key displays, when tracing
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<TraceStep>,
    /// Final past line
    pub past: String,
    /// Final current line
    pub current: String,
    /// Completed calculations, oldest first, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tape: Option<Vec<HistoryEntry>>,
}

impl Report {
    /// Report of a display
    #[must_use]
    pub fn from_lines(lines: &DisplayLines) -> Self {
        Self {
            steps: Vec::new(),
            past: lines.past.clone(),
            current: lines.current.clone(),
            tape: None,
        }
    }

    /// Attach trace steps
    #[must_use]
    pub fn with_steps(mut self, steps: Vec<TraceStep>) -> Self {
        self.steps = steps;
        self
    }

    /// Attach the tape
    #[must_use]
    pub fn with_tape(mut self, tape: Vec<HistoryEntry>) -> Self {
        self.tape = Some(tape);
        self
    }

    /// Renders the report. `brief` prints only the current line in text mode.
    pub fn render(&self, format: OutputFormat, brief: bool, color: bool) -> CliResult<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string(self)?),
            OutputFormat::Text => Ok(self.render_text(brief, color)),
        }
    }

    fn render_text(&self, brief: bool, color: bool) -> String {
        let mut lines = Vec::new();
        for step in &self.steps {
            lines.push(format!("{:>4}  {:<24} {}", step.key, step.past, step.current));
        }
        if !brief {
            lines.push(style(&self.past).dim().force_styling(color).to_string());
        }
        let current = if self.current == CalcError::DISPLAY {
            style(&self.current).red().bold()
        } else {
            style(&self.current).bold()
        };
        lines.push(current.force_styling(color).to_string());
        if let Some(tape) = &self.tape {
            if !brief {
                lines.push("Tape:".to_string());
            }
            lines.extend(tape.iter().map(ToString::to_string));
        }
        lines.join("\n")
    }
}

/// Renders the keypad grid
pub fn render_keypad(keypad: &Keypad, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Text => Ok(keypad.render_text()),
        OutputFormat::Json => {
            let (_, cols) = keypad.dimensions();
            let labels: Vec<String> = keypad.buttons().map(|b| b.label()).collect();
            let rows: Vec<&[String]> = labels.chunks(cols.max(1)).collect();
            Ok(serde_json::to_string(&rows)?)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn lines(past: &str, current: &str) -> DisplayLines {
        DisplayLines {
            past: past.into(),
            current: current.into(),
        }
    }

    #[test]
    fn test_text_two_lines() {
        let report = Report::from_lines(&lines("3 + 4", "7"));
        let text = report.render(OutputFormat::Text, false, false).unwrap();
        assert_eq!(text, "3 + 4\n7");
    }

    #[test]
    fn test_text_brief_only_current() {
        let report = Report::from_lines(&lines("3 + 4", "7"));
        let text = report.render(OutputFormat::Text, true, false).unwrap();
        assert_eq!(text, "7");
    }

    #[test]
    fn test_text_with_color_has_escapes() {
        let report = Report::from_lines(&lines("5 / ", "Error"));
        let text = report.render(OutputFormat::Text, false, true).unwrap();
        assert!(text.contains('\u{1b}'));
        assert!(text.contains("Error"));
    }

    #[test]
    fn test_json_shape() {
        let report = Report::from_lines(&lines("", "42"));
        let json = report.render(OutputFormat::Json, false, false).unwrap();
        assert_eq!(json, r#"{"past":"","current":"42"}"#);
    }

    #[test]
    fn test_json_with_tape() {
        let report = Report::from_lines(&lines("1 + 1", "2"))
            .with_tape(vec![HistoryEntry::new("1 + 1", "2")]);
        let json = report.render(OutputFormat::Json, false, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["tape"][0]["result"], "2");
    }

    #[test]
    fn test_trace_steps() {
        let step = TraceStep::new(Button::Digit(9), &lines("", "9"));
        let report = Report::from_lines(&lines("", "9")).with_steps(vec![step]);
        let text = report.render(OutputFormat::Text, false, false).unwrap();
        assert!(text.starts_with("   9  "));
        let json = report.render(OutputFormat::Json, false, false).unwrap();
        assert!(json.starts_with(r#"{"steps":[{"key":"9""#));
    }

    #[test]
    fn test_text_tape_lines() {
        let report = Report::from_lines(&lines("3 + 4", "7"))
            .with_tape(vec![HistoryEntry::new("3 + 4", "7")]);
        let text = report.render(OutputFormat::Text, false, false).unwrap();
        assert!(text.ends_with("Tape:\n3 + 4 = 7"));
    }

    #[test]
    fn test_render_keypad() {
        let keypad = Keypad::new();
        let text = render_keypad(&keypad, OutputFormat::Text).unwrap();
        assert_eq!(text.lines().count(), 5);
        let json = render_keypad(&keypad, OutputFormat::Json).unwrap();
        let rows: Vec<Vec<String>> = serde_json::from_str(&json).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], ["AC", "+/-", "%", "/"]);
    }
}

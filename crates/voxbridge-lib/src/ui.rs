//! Rendering glue for the demo surface.
//!
//! In-memory counterparts of the page's transcript list and status
//! indicator: a growing list of timestamped, role-labelled lines and a
//! single replaceable status line.

use std::fmt;

/// Visual class of the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Loading,
    Ready,
    Active,
    Error,
}

impl StatusClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Loading => "loading",
            StatusClass::Ready => "ready",
            StatusClass::Active => "active",
            StatusClass::Error => "error",
        }
    }
}

/// The status indicator: one class plus one line of text, replaced whole.
#[derive(Debug, Clone)]
pub struct StatusIndicator {
    class: StatusClass,
    text: String,
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self {
            class: StatusClass::Loading,
            text: "Initializing...".into(),
        }
    }
}

impl StatusIndicator {
    /// Replaces both the class and the text.
    pub fn update_status(&mut self, class: StatusClass, text: impl Into<String>) {
        self.class = class;
        self.text = text.into();
    }

    pub fn class(&self) -> StatusClass {
        self.class
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for StatusIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.class.as_str(), self.text)
    }
}

/// The transcript list: append-only, newest last.
#[derive(Debug, Default)]
pub struct TranscriptView {
    lines: Vec<String>,
}

impl TranscriptView {
    /// Appends one line: local time, uppercased role label, content.
    pub fn add_transcript(&mut self, role: &str, content: &str) {
        let time = chrono::Local::now().format("%H:%M:%S");
        self.lines.push(format!(
            "{time} {role}: {content}",
            role = role.to_uppercase()
        ));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole transcript, one entry per line.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

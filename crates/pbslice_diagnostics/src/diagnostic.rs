//! Structured diagnostic messages with severity, codes, and notes.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message.
///
/// Each diagnostic carries a severity, a unique code, the main message and,
/// when the condition can be pinned to a place in the input file, the byte
/// offset it was detected at. Notes and help lines add context.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The unique code identifying the type of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// Byte offset in the input where the condition was detected.
    pub offset: Option<usize>,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Creates a new warning diagnostic with the given code and message.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Warning, code, message)
    }

    /// Creates a new note diagnostic with the given code and message.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::with_severity(Severity::Note, code, message)
    }

    fn with_severity(severity: Severity, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            offset: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Attaches the byte offset the condition was detected at.
    pub fn at_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_warning() {
        let code = DiagnosticCode::new(Category::Device, 1);
        let diag = Diagnostic::warning(code, "unknown device model");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(format!("{}", diag.code), "D001");
        assert!(diag.offset.is_none());
    }

    #[test]
    fn create_note() {
        let diag = Diagnostic::note(DiagnosticCode::new(Category::Device, 4), "device overridden");
        assert_eq!(diag.severity, Severity::Note);
        assert!(diag.notes.is_empty());
    }

    #[test]
    fn builder_methods() {
        let code = DiagnosticCode::new(Category::Container, 2);
        let diag = Diagnostic::warning(code, "trailing data")
            .at_offset(0x40)
            .with_note("3 bytes follow the content field")
            .with_help("re-export the bitstream");
        assert_eq!(diag.offset, Some(0x40));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let diag = Diagnostic::note(DiagnosticCode::new(Category::Output, 1), "swapped")
            .at_offset(12);
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.severity, Severity::Note);
        assert_eq!(back.offset, Some(12));
        assert_eq!(back.message, "swapped");
    }
}

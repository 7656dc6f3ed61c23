//! Structured diagnostics for bitstream loading and extraction.
//!
//! Recoverable conditions (an unknown device, a missing start-of-config
//! marker, trailing bytes after the content field) are reported as
//! [`Diagnostic`] values instead of errors. The thread-safe
//! [`DiagnosticSink`] accumulates them and [`TerminalRenderer`] formats them
//! for the command line.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;

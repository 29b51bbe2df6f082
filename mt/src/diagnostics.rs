//! Non-fatal load diagnostics
//!
//! The loader reports conditions that do not fail a load (currently only a
//! missing optional text part) through a [`DiagnosticSink`]. No sink is
//! installed by default.

use std::fmt;
use std::path::PathBuf;

use tracing::warn;

use crate::key::TemplateKey;

/// A non-fatal condition observed while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The optional text part does not exist for this template
    MissingText { key: TemplateKey, path: PathBuf },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingText { key, path } => {
                write!(f, "template {}: optional text part not found at {}", key, path.display())
            }
        }
    }
}

/// Receives diagnostics emitted during a load
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn emit(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// Forwards diagnostics to `tracing` at warn level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        warn!("{}", diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_missing_text_message() {
        let diagnostic = Diagnostic::MissingText {
            key: TemplateKey::from("weeklyUsage"),
            path: PathBuf::from("templates/weeklyUsage/text.txt"),
        };
        let msg = diagnostic.to_string();
        assert!(msg.contains("weeklyUsage"));
        assert!(msg.contains("text.txt"));
    }

    #[test]
    fn test_closure_sink_receives_diagnostic() {
        let seen = Mutex::new(Vec::new());
        let sink = |d: &Diagnostic| seen.lock().unwrap().push(d.clone());
        let diagnostic = Diagnostic::MissingText {
            key: TemplateKey::from("a"),
            path: PathBuf::from("a/text.txt"),
        };
        sink.emit(&diagnostic);
        assert_eq!(seen.lock().unwrap().as_slice(), &[diagnostic]);
    }

    #[test]
    fn test_tracing_sink_does_not_panic() {
        TracingSink.emit(&Diagnostic::MissingText {
            key: TemplateKey::from("a"),
            path: PathBuf::from("a/text.txt"),
        });
    }
}

//! Diagnostics collected during a match attempt
//!
//! Recoverable problems (a literal that matched past the cursor, a rejected
//! file) are reported here, keyed by filename and line, instead of aborting
//! the match. They end up in the [`ParseReport`](crate::engine::ParseReport)
//! and are mirrored to the `log` facade.

use std::fmt;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub filename: String,
    pub line: usize,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        filename: impl Into<String>,
        line: usize,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            line,
            severity,
            message: message.into(),
        }
    }

    pub fn error(filename: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::new(filename, line, Severity::Error, message)
    }

    pub fn warning(filename: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::new(filename, line, Severity::Warning, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.filename, self.line, self.severity, self.message
        )
    }
}

//! Test support
//!
//! Fluent assertions over a [`ParseReport`], so tests read as a list of
//! expectations:
//!
//! ```rust,ignore
//! use confgram::testing::assert_report;
//!
//! let report = parse_str(&grammar, "abbbc")?;
//! assert_report(&report).accepted().offset(5).line(1).no_diagnostics();
//! ```
//!
//! [`trace_of`] runs a match with a trace sink attached and hands back the
//! trace text next to the result.

use crate::config::ParseOptions;
use crate::diagnostics::Severity;
use crate::engine::{parse, ParseReport};
use crate::error::MatchError;
use crate::grammar::Grammar;
use crate::trace::TraceFlags;

pub struct ReportAssertion<'a> {
    report: &'a ParseReport,
}

pub fn assert_report(report: &ParseReport) -> ReportAssertion<'_> {
    ReportAssertion { report }
}

impl ReportAssertion<'_> {
    #[track_caller]
    pub fn accepted(self) -> Self {
        assert!(
            self.report.accepted,
            "Expected input to be accepted, but it was rejected at offset {} (line {}): {:?}",
            self.report.offset, self.report.line, self.report.diagnostics
        );
        self
    }

    #[track_caller]
    pub fn rejected(self) -> Self {
        assert!(
            !self.report.accepted,
            "Expected input to be rejected, but it was accepted"
        );
        self
    }

    #[track_caller]
    pub fn applied(self) -> Self {
        assert!(
            self.report.applied,
            "Expected the start rule to apply, but it did not"
        );
        self
    }

    #[track_caller]
    pub fn not_applied(self) -> Self {
        assert!(
            !self.report.applied,
            "Expected the start rule not to apply, but it did"
        );
        self
    }

    #[track_caller]
    pub fn offset(self, expected: usize) -> Self {
        assert_eq!(
            self.report.offset, expected,
            "Expected cursor at offset {}, but it is at {}",
            expected, self.report.offset
        );
        self
    }

    #[track_caller]
    pub fn line(self, expected: usize) -> Self {
        assert_eq!(
            self.report.line, expected,
            "Expected cursor on line {}, but it is on line {}",
            expected, self.report.line
        );
        self
    }

    #[track_caller]
    pub fn no_diagnostics(self) -> Self {
        assert!(
            self.report.diagnostics.is_empty(),
            "Expected no diagnostics, got {:?}",
            self.report.diagnostics
        );
        self
    }

    #[track_caller]
    pub fn diagnostic_count(self, expected: usize) -> Self {
        assert_eq!(
            self.report.diagnostics.len(),
            expected,
            "Expected {} diagnostics, got {:?}",
            expected,
            self.report.diagnostics
        );
        self
    }

    /// Some diagnostic of `severity` whose message contains `text`
    #[track_caller]
    pub fn has_diagnostic(self, severity: Severity, text: &str) -> Self {
        assert!(
            self.report
                .diagnostics
                .iter()
                .any(|d| d.severity == severity && d.message.contains(text)),
            "Expected a {} diagnostic containing '{}', got {:?}",
            severity,
            text,
            self.report.diagnostics
        );
        self
    }
}

/// Match `text` with `flags` traced and return the trace next to the result
pub fn trace_of(
    grammar: &Grammar,
    text: &str,
    flags: TraceFlags,
) -> (Result<ParseReport, MatchError>, String) {
    let options = ParseOptions::default().with_trace(flags);
    let mut out = Vec::new();
    let result = parse(grammar, "<trace>", text, &options, Some(&mut out));
    (result, String::from_utf8_lossy(&out).into_owned())
}

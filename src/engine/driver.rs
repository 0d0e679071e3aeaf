//! Top-level entry point

use super::matcher::Matcher;
use crate::config::ParseOptions;
use crate::diagnostics::{Diagnostic, Severity};
use crate::error::MatchError;
use crate::grammar::Grammar;
use std::io::Write;

/// Filename used by [`parse_str`]
pub const ANONYMOUS_INPUT: &str = "<input>";

/// What a match attempt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub filename: String,
    /// The start rule applied and the whole input was consumed
    pub accepted: bool,
    /// Outcome of the start rule alone
    pub applied: bool,
    /// Final byte offset of the cursor
    pub offset: usize,
    /// Final line of the cursor
    pub line: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseReport {
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

/// Match `text` against `grammar`'s start rule.
///
/// The input is accepted only when the start rule applies *and* the cursor
/// ends exactly at the end of the input; leftover text is a rejection, not a
/// partial success. A rejection is an `Ok` report carrying a `Parse failed`
/// error diagnostic. `Err` means the attempt was aborted (see [`MatchError`]).
pub fn parse(
    grammar: &Grammar,
    filename: &str,
    text: &str,
    options: &ParseOptions,
    sink: Option<&mut dyn Write>,
) -> Result<ParseReport, MatchError> {
    let mut matcher = Matcher::new(grammar, filename, text, *options, sink);
    let applied = matcher.enter_rule(grammar.start())?.applied();
    let accepted = applied && matcher.cursor().is_at_end();
    if !accepted {
        matcher.report(Severity::Error, "Parse failed");
    }

    let cursor = matcher.cursor();
    let (offset, line) = (cursor.offset(), cursor.line());
    Ok(ParseReport {
        filename: filename.to_string(),
        accepted,
        applied,
        offset,
        line,
        diagnostics: matcher.into_diagnostics(),
    })
}

/// [`parse`] with default options and no tracing
pub fn parse_str(grammar: &Grammar, text: &str) -> Result<ParseReport, MatchError> {
    parse(grammar, ANONYMOUS_INPUT, text, &ParseOptions::default(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{lit, seq, GrammarBuilder};

    #[test]
    fn test_rejection_reports_parse_failed() {
        let mut b = GrammarBuilder::new();
        let a = b.text("a");
        b.rule("start", seq([lit(a)])).unwrap();
        let g = b.build().unwrap();

        let report = parse_str(&g, "ab").unwrap();
        assert!(report.applied);
        assert!(!report.is_accepted());
        let errors: Vec<_> = report.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "<input>:1: error: Parse failed");
        assert_eq!(report.warnings().count(), 0);
    }

    #[test]
    fn test_empty_input_with_nullable_start() {
        let mut b = GrammarBuilder::new();
        let a = b.text("a");
        b.rule("start", seq([lit(a)]).star()).unwrap();
        let g = b.build().unwrap();

        let report = parse_str(&g, "").unwrap();
        assert!(report.is_accepted());
        assert!(report.diagnostics.is_empty());
    }
}

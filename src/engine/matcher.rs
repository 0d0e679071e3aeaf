//! The matching context threaded through the descent
//!
//! One `Matcher` exists per match attempt. It borrows the grammar, owns the
//! cursor, and is passed by `&mut self` through every recursive call; the
//! operations themselves live in the sibling modules (`lexer`, `lookahead`,
//! `quantifier`, `dispatch`).

use super::cursor::Cursor;
use crate::config::ParseOptions;
use crate::diagnostics::{Diagnostic, Severity};
use crate::error::MatchError;
use crate::grammar::{Abbrev, AbbrevId, Grammar, Literal, LiteralId, Match, MatchId, Rule, RuleId};
use crate::trace::Tracer;
use std::io::Write;

/// Result of one match operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NotApplied,
}

impl Outcome {
    pub fn applied(self) -> bool {
        self == Outcome::Applied
    }
}

pub struct Matcher<'g, 't, 's> {
    pub(crate) grammar: &'g Grammar,
    pub(crate) cursor: Cursor<'t>,
    pub(crate) tracer: Tracer<'s>,
    pub(crate) options: ParseOptions,
    pub(crate) depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'g, 't, 's> Matcher<'g, 't, 's> {
    /// Start a match attempt at line 1, offset 0 of `text`.
    ///
    /// Trace categories from `options.trace` are written to `sink`; without a
    /// sink nothing is traced.
    pub fn new(
        grammar: &'g Grammar,
        filename: &'t str,
        text: &'t str,
        options: ParseOptions,
        sink: Option<&'s mut dyn Write>,
    ) -> Self {
        Self {
            grammar,
            cursor: Cursor::new(filename, text),
            tracer: Tracer::new(options.trace, sink),
            options,
            depth: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn cursor(&self) -> &Cursor<'t> {
        &self.cursor
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Record a recoverable problem at the cursor's line
    pub(crate) fn report(&mut self, severity: Severity, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(
            self.cursor.filename(),
            self.cursor.line(),
            severity,
            message,
        );
        if diagnostic.is_error() {
            log::error!("{}", diagnostic);
        } else {
            log::warn!("{}", diagnostic);
        }
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn node(&self, id: MatchId) -> Result<&'g Match, MatchError> {
        self.grammar.node(id).ok_or_else(|| {
            MatchError::internal(self.cursor.line(), format!("no match node {}", id.index()))
        })
    }

    pub(crate) fn rule(&self, id: RuleId) -> Result<&'g Rule, MatchError> {
        self.grammar.rule(id).ok_or_else(|| {
            MatchError::internal(self.cursor.line(), format!("no rule {}", id.index()))
        })
    }

    pub(crate) fn literal(&self, id: LiteralId) -> Result<&'g Literal, MatchError> {
        self.grammar.literal(id).ok_or_else(|| {
            MatchError::internal(self.cursor.line(), format!("no literal {}", id.index()))
        })
    }

    pub(crate) fn abbrev(&self, id: AbbrevId) -> Result<&'g Abbrev, MatchError> {
        self.grammar.abbrev(id).ok_or_else(|| {
            MatchError::internal(
                self.cursor.line(),
                format!("no abbreviation {}", id.index()),
            )
        })
    }
}

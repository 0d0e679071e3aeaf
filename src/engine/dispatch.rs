//! Dispatch over match kinds, plus field and rule resolution
//!
//! Rule references and fields are resolved on every visit, so a recursive
//! grammar turns into ordinary recursion here, bounded by
//! `ParseOptions::max_depth`.

use super::matcher::{Matcher, Outcome};
use crate::config::AlternativePolicy;
use crate::error::MatchError;
use crate::grammar::{LiteralId, MatchId, MatchKind, RuleId};
use crate::trace::{escape_chars, TraceFlags};

impl Matcher<'_, '_, '_> {
    /// Match node `id` at the cursor.
    ///
    /// The outcome is also left in the cursor's applied flag. Every dispatch
    /// is one nesting level counted against `max_depth`, so recursion through
    /// rules and fields alike ends in `DepthExceeded`.
    pub fn dispatch(&mut self, id: MatchId) -> Result<Outcome, MatchError> {
        if self.depth >= self.options.max_depth {
            return Err(MatchError::DepthExceeded {
                filename: self.cursor.filename().to_string(),
                line: self.cursor.line(),
                limit: self.options.max_depth,
            });
        }

        self.depth += 1;
        let outcome = self.match_node(id);
        self.depth -= 1;

        let outcome = outcome?;
        self.cursor.set_applied(outcome.applied());
        Ok(outcome)
    }

    fn match_node(&mut self, id: MatchId) -> Result<Outcome, MatchError> {
        let node = self.node(id)?;
        match node.kind() {
            MatchKind::Literal(literal) => self.match_literal(*literal),
            MatchKind::Any => self.match_literal(self.grammar.any_literal()),
            // abbreviations always apply exactly once
            MatchKind::AbbrevRef(abbrev) => {
                let literal = self.abbrev(*abbrev)?.literal();
                self.match_literal(literal)
            }
            MatchKind::Field { owner, name } => self.match_field(*owner, name),
            MatchKind::Alternative { children, quant } => {
                self.quantified(id, *quant, |m| m.match_alternative(children))
            }
            MatchKind::Sequence { children, quant } => {
                self.quantified(id, *quant, |m| m.match_sequence(children))
            }
            MatchKind::RuleRef { rule, quant } => {
                self.quantified(id, *quant, |m| m.enter_rule(*rule))
            }
        }
    }

    /// Enter rule `id` and match its body
    pub fn enter_rule(&mut self, id: RuleId) -> Result<Outcome, MatchError> {
        let rule = self.rule(id)?;
        self.tracer
            .emit(TraceFlags::RULE, format_args!("R {}:", rule.name()))?;
        self.dispatch(rule.body())
    }

    fn match_literal(&mut self, literal: LiteralId) -> Result<Outcome, MatchError> {
        let Some(len) = self.lex(literal)? else {
            return Ok(Outcome::NotApplied);
        };
        if self.tracer.enabled(TraceFlags::TOKEN) {
            let start = self.cursor.offset();
            let token = self
                .cursor
                .text()
                .get(start..start + len)
                .unwrap_or_default();
            let (token, _) = escape_chars(token.chars());
            self.tracer
                .emit(TraceFlags::TOKEN, format_args!("T literal:{}:", token))?;
        }
        self.cursor.advance(len, &mut self.tracer)?;
        Ok(Outcome::Applied)
    }

    fn match_field(&mut self, owner: RuleId, name: &str) -> Result<Outcome, MatchError> {
        match self.grammar.find_field(owner, name) {
            Some(target) => self.dispatch(target),
            None => Err(MatchError::UnresolvedField {
                rule: self.rule(owner)?.name().to_string(),
                field: name.to_string(),
            }),
        }
    }

    /// Take the first child whose lookahead succeeds
    fn match_alternative(&mut self, children: &[MatchId]) -> Result<Outcome, MatchError> {
        for &child in children {
            if self.applies(child)? {
                let outcome = self.dispatch(child)?;
                return Ok(match self.options.alternatives {
                    AlternativePolicy::Compatible => Outcome::Applied,
                    AlternativePolicy::Strict => outcome,
                });
            }
        }
        Ok(Outcome::NotApplied)
    }

    /// Match children in order, stopping at the first failure
    fn match_sequence(&mut self, children: &[MatchId]) -> Result<Outcome, MatchError> {
        for &child in children {
            if !self.dispatch(child)?.applied() {
                return Ok(Outcome::NotApplied);
            }
        }
        Ok(Outcome::Applied)
    }
}

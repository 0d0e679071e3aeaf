//! Literal matcher: test one literal at the cursor without moving it

use super::matcher::Matcher;
use crate::diagnostics::Severity;
use crate::error::MatchError;
use crate::grammar::LiteralId;
use crate::trace::TraceFlags;

impl Matcher<'_, '_, '_> {
    /// Length of the match of `literal` at the cursor, if any.
    ///
    /// A match that starts after the cursor is still accepted, with a
    /// `Skipped N characters` warning. The caller advances the cursor by the
    /// returned length.
    pub fn lex(&mut self, literal: LiteralId) -> Result<Option<usize>, MatchError> {
        let lit = self.literal(literal)?;
        let offset = self.cursor.offset();
        let found = lit.find_at(self.cursor.text(), offset);

        match &found {
            Some(range) => self.tracer.emit(
                TraceFlags::MATCH,
                format_args!("M {} {} {}..{}", offset, lit, range.start, range.end),
            )?,
            None => self
                .tracer
                .emit(TraceFlags::MATCH, format_args!("M {} {} -", offset, lit))?,
        }

        let Some(range) = found else {
            return Ok(None);
        };
        if range.start < offset || range.end < range.start {
            return Err(MatchError::internal(
                self.cursor.line(),
                format!(
                    "{} reported {}..{} for offset {}",
                    lit, range.start, range.end, offset
                ),
            ));
        }
        if range.start > offset {
            self.report(
                Severity::Warning,
                format!("Skipped {} characters", range.start - offset),
            );
        }
        Ok(Some(range.end - range.start))
    }
}

//! Input cursor: byte offset, line number and the last outcome
//!
//! The cursor only ever moves forward. There is no rollback: input consumed
//! by a sub-match stays consumed even when an enclosing construct fails.

use crate::error::MatchError;
use crate::trace::{escape_chars, TraceFlags, Tracer};

/// Characters shown before the cursor in `ADVANCE` trace lines
const WINDOW: usize = 28;
/// Characters shown after the cursor in `ADVANCE` trace lines
const LOOKAHEAD: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<'t> {
    filename: &'t str,
    text: &'t str,
    offset: usize,
    line: usize,
    applied: bool,
}

impl<'t> Cursor<'t> {
    pub fn new(filename: &'t str, text: &'t str) -> Self {
        Self {
            filename,
            text,
            offset: 0,
            line: 1,
            applied: false,
        }
    }

    pub fn filename(&self) -> &'t str {
        self.filename
    }

    pub fn text(&self) -> &'t str {
        self.text
    }

    /// Byte offset into the input
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line number of the cursor
    pub fn line(&self) -> usize {
        self.line
    }

    /// Outcome of the most recently completed match operation
    pub fn applied(&self) -> bool {
        self.applied
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.text.len()
    }

    pub fn rest(&self) -> &'t str {
        self.text.get(self.offset..).unwrap_or_default()
    }

    pub(crate) fn set_applied(&mut self, applied: bool) {
        self.applied = applied;
    }

    /// Move forward by `count` bytes, counting newlines on the way.
    ///
    /// Moving past the end of the input, or into the middle of a character,
    /// means the caller computed a bogus length; that is an internal error.
    pub fn advance(&mut self, count: usize, tracer: &mut Tracer<'_>) -> Result<(), MatchError> {
        if count == 0 {
            return Ok(());
        }

        let end = self
            .offset
            .checked_add(count)
            .filter(|end| *end <= self.text.len())
            .ok_or_else(|| MatchError::internal(self.line, "moved beyond end of input"))?;
        let consumed = self.text.get(self.offset..end).ok_or_else(|| {
            MatchError::internal(self.line, "advance stopped inside a character")
        })?;

        self.line += consumed.bytes().filter(|b| *b == b'\n').count();
        self.offset = end;

        if tracer.enabled(TraceFlags::ADVANCE) {
            let line = self.window(count);
            tracer.emit(TraceFlags::ADVANCE, format_args!("{}", line))?;
        }
        Ok(())
    }

    /// `A <count>` followed by the text around the cursor, with the cursor
    /// marked as `|=|` and both sides padded to a fixed width.
    fn window(&self, count: usize) -> String {
        let consumed = &self.text[..self.offset];
        let mut before: Vec<char> = consumed.chars().rev().take(WINDOW).collect();
        before.reverse();
        let (before, before_width) = escape_chars(before);
        let (after, after_width) = escape_chars(self.rest().chars().take(LOOKAHEAD));

        let mut line = format!("A {:>3} ", count);
        if before_width < WINDOW + 10 {
            line.push_str(&format!("{:>w$}", "<", w = WINDOW + 10 - before_width));
        }
        line.push_str(&before);
        line.push_str("|=|");
        line.push_str(&after);
        line.push_str(&format!("{:>w$}", ">", w = WINDOW.saturating_sub(after_width)));
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_counts_lines() {
        let mut tracer = Tracer::disabled();
        let mut cursor = Cursor::new("hosts", "a\nb\n\nc");
        cursor.advance(2, &mut tracer).unwrap();
        assert_eq!((cursor.offset(), cursor.line()), (2, 2));
        cursor.advance(0, &mut tracer).unwrap();
        assert_eq!((cursor.offset(), cursor.line()), (2, 2));
        cursor.advance(3, &mut tracer).unwrap();
        assert_eq!((cursor.offset(), cursor.line()), (5, 4));
        assert_eq!(cursor.rest(), "c");
        assert!(!cursor.is_at_end());
        cursor.advance(1, &mut tracer).unwrap();
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_advance_past_end_is_internal_error() {
        let mut tracer = Tracer::disabled();
        let mut cursor = Cursor::new("hosts", "ab");
        cursor.advance(2, &mut tracer).unwrap();
        let err = cursor.advance(1, &mut tracer).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("moved beyond end of input"));
        // the failed advance left the cursor alone
        assert_eq!(cursor.offset(), 2);
    }

    #[test]
    fn test_advance_inside_character_is_internal_error() {
        let mut tracer = Tracer::disabled();
        let mut cursor = Cursor::new("hosts", "é");
        let err = cursor.advance(1, &mut tracer).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_advance_trace_window() {
        let mut out = Vec::new();
        {
            let mut tracer = Tracer::new(TraceFlags::ADVANCE, Some(&mut out));
            let mut cursor = Cursor::new("t", "ab\ncd");
            cursor.advance(3, &mut tracer).unwrap();
        }
        let expected = format!(
            "A   3 {}<ab\\n|=|cd{}>\n",
            " ".repeat(33),
            " ".repeat(25)
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_advance_trace_window_is_bounded() {
        let text = "x".repeat(40) + &"y".repeat(30);
        let mut out = Vec::new();
        {
            let mut tracer = Tracer::new(TraceFlags::ADVANCE, Some(&mut out));
            let mut cursor = Cursor::new("t", &text);
            cursor.advance(40, &mut tracer).unwrap();
        }
        let expected = format!(
            "A  40 {}<{}|=|{}{}>\n",
            " ".repeat(9),
            "x".repeat(28),
            "y".repeat(20),
            " ".repeat(7)
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}

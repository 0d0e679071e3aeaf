//! The matching engine
//!
//! A single-pass, non-backtracking interpreter that walks a [`Grammar`] and
//! the input in lockstep:
//!
//! - `cursor`: position, line counting and the last outcome
//! - `lexer`: anchored test of one literal at the cursor
//! - `lookahead`: first-set check used to pick alternatives and repetitions
//! - `quantifier`: once / `?` / `*` / `+` policies
//! - `dispatch`: per-kind matching, field and rule resolution
//! - `driver`: [`parse`], the top-level entry point
//!
//! [`Grammar`]: crate::grammar::Grammar

mod cursor;
mod dispatch;
mod driver;
mod lexer;
mod lookahead;
mod matcher;
mod quantifier;

pub use cursor::Cursor;
pub use driver::{parse, parse_str, ParseReport, ANONYMOUS_INPUT};
pub use matcher::{Matcher, Outcome};

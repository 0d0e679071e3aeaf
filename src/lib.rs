//! # confgram
//!
//! A grammar-driven matching engine for configuration file dialects.
//!
//! A [`Grammar`](grammar::Grammar) describes the shape of a dialect as named
//! rules built from literals, sequences, alternatives, repetitions, field
//! references and (possibly recursive) rule references. The
//! [`engine`] walks that grammar and a text buffer in lockstep, consuming
//! text and tracking lines, and reports whether the whole file matched.
//!
//! The engine is single-pass and never backtracks: alternatives and
//! repetitions are chosen by one-token lookahead over precomputed
//! first-sets, and consumed input stays consumed.
//!
//! Layout
//!
//! src/
//!   ├── grammar      Arena model, builder, literals, first-set analysis
//!   ├── engine       Cursor, lexer, lookahead, quantifiers, dispatch, driver
//!   ├── trace        Trace categories and sink
//!   ├── config       Per-attempt options
//!   ├── diagnostics  Recoverable problems keyed by file and line
//!   ├── error        Build, match and config errors
//!   └── testing      Fluent report assertions for tests
//!
//! ```rust,ignore
//! use confgram::grammar::{lit, seq, GrammarBuilder};
//!
//! let mut b = GrammarBuilder::new();
//! let a = b.text("a");
//! let bee = b.text("b");
//! let c = b.text("c");
//! b.rule("start", seq([lit(a), lit(bee).star(), lit(c).maybe()]))?;
//! let grammar = b.build()?;
//!
//! assert!(confgram::parse_str(&grammar, "abbbc")?.accepted);
//! ```

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod testing;
pub mod trace;

pub use crate::config::{AlternativePolicy, ParseOptions};
pub use engine::{parse, parse_str, ParseReport};
pub use error::{BuildError, ConfigError, MatchError};
pub use trace::TraceFlags;

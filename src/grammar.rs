//! Grammar model consumed by the matching engine
//!
//! A [`Grammar`] is an arena of literals, abbreviations, match nodes and
//! rules. It is produced by [`GrammarBuilder`] and never changes afterwards.

mod analysis;
mod builder;
mod literal;
mod model;

pub use builder::{abbrev, alt, any, field, lit, rule, seq, Expr, GrammarBuilder};
pub use literal::{
    Literal, LiteralSource, PatternMatcher, RegexMatcher, TextMatcher, ANY_TOKEN_PATTERN,
};
pub use model::{
    Abbrev, AbbrevId, Grammar, LiteralId, Match, MatchId, MatchKind, Quantifier, Rule, RuleId,
};

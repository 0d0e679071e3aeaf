//! Literals and the pattern matching capability behind them
//!
//! The engine never searches: it asks a [`PatternMatcher`] whether a literal
//! matches *at* the cursor. [`RegexMatcher`] provides that on top of the
//! `regex` crate by anchoring the pattern and matching the remaining text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::ops::Range;

/// Pattern behind [`MatchKind::Any`](super::MatchKind::Any): the rest of the
/// current line.
pub const ANY_TOKEN_PATTERN: &str = r"[^\n]*";

static ANY_TOKEN: Lazy<RegexMatcher> = Lazy::new(|| RegexMatcher::new(ANY_TOKEN_PATTERN).unwrap());

/// Anchored matching of one pattern against the input.
///
/// `find_at` reports the byte range of a match that begins at `offset`.
/// Implementations may report a range that starts slightly after `offset`;
/// the engine accepts it with a warning.
pub trait PatternMatcher: fmt::Debug + Send + Sync {
    fn find_at(&self, text: &str, offset: usize) -> Option<Range<usize>>;
}

/// Regular expression matcher anchored at the requested offset
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    anchored: Regex,
}

impl RegexMatcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let anchored = Regex::new(&format!("^(?:{})", pattern))?;
        Ok(Self { anchored })
    }
}

impl PatternMatcher for RegexMatcher {
    fn find_at(&self, text: &str, offset: usize) -> Option<Range<usize>> {
        // Slicing keeps `^` pinned to the cursor instead of the buffer start
        let rest = text.get(offset..)?;
        self.anchored
            .find(rest)
            .map(|m| offset + m.start()..offset + m.end())
    }
}

/// Exact string matcher
#[derive(Debug, Clone)]
pub struct TextMatcher {
    text: String,
}

impl TextMatcher {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl PatternMatcher for TextMatcher {
    fn find_at(&self, text: &str, offset: usize) -> Option<Range<usize>> {
        let rest = text.get(offset..)?;
        rest.starts_with(self.text.as_str())
            .then(|| offset..offset + self.text.len())
    }
}

/// What a literal was written as, used for display in traces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralSource {
    Regex(String),
    Text(String),
}

#[derive(Debug)]
pub struct Literal {
    source: LiteralSource,
    matcher: Box<dyn PatternMatcher>,
}

impl Literal {
    /// Compile a regular expression literal
    pub fn regex(pattern: &str) -> Result<Literal, regex::Error> {
        Ok(Literal {
            source: LiteralSource::Regex(pattern.to_string()),
            matcher: Box::new(RegexMatcher::new(pattern)?),
        })
    }

    /// A literal that matches `text` exactly
    pub fn text(text: &str) -> Literal {
        Literal {
            source: LiteralSource::Text(text.to_string()),
            matcher: Box::new(TextMatcher::new(text)),
        }
    }

    /// The designated any-token literal
    pub fn any() -> Literal {
        Literal {
            source: LiteralSource::Regex(ANY_TOKEN_PATTERN.to_string()),
            matcher: Box::new(ANY_TOKEN.clone()),
        }
    }

    /// A literal backed by a caller supplied matcher
    pub fn with_matcher(source: LiteralSource, matcher: impl PatternMatcher + 'static) -> Literal {
        Literal {
            source,
            matcher: Box::new(matcher),
        }
    }

    pub fn source(&self) -> &LiteralSource {
        &self.source
    }

    pub fn find_at(&self, text: &str, offset: usize) -> Option<Range<usize>> {
        self.matcher.find_at(text, offset)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            LiteralSource::Regex(pattern) => write!(f, "/{}/", pattern),
            LiteralSource::Text(text) => write!(f, "'{}'", text),
        }
    }
}

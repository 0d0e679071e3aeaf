//! Error types for grammar construction, option loading and matching

use std::fmt;
use std::io;

/// Errors raised while assembling a [`Grammar`](crate::grammar::Grammar)
#[derive(Debug)]
pub enum BuildError {
    /// Two rules registered under the same name
    DuplicateRule(String),
    /// Two abbreviations registered under the same name
    DuplicateAbbrev(String),
    /// A rule reference names a rule that was never registered
    UnknownRule { name: String, referenced_from: String },
    /// An abbreviation reference names an abbreviation that was never registered
    UnknownAbbrev { name: String, referenced_from: String },
    /// A field reference does not name a labelled node of its owner rule
    UnresolvedField { rule: String, field: String },
    /// A regular expression literal failed to compile
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
    /// The builder holds no rules at all
    NoRules,
    /// The requested start rule does not exist
    UnknownStart(String),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::DuplicateRule(name) => write!(f, "Rule '{}' is defined twice", name),
            BuildError::DuplicateAbbrev(name) => {
                write!(f, "Abbreviation '{}' is defined twice", name)
            }
            BuildError::UnknownRule {
                name,
                referenced_from,
            } => write!(
                f,
                "Rule '{}' references undefined rule '{}'",
                referenced_from, name
            ),
            BuildError::UnknownAbbrev {
                name,
                referenced_from,
            } => write!(
                f,
                "Rule '{}' references undefined abbreviation '{}'",
                referenced_from, name
            ),
            BuildError::UnresolvedField { rule, field } => {
                write!(f, "Rule '{}' has no field named '{}'", rule, field)
            }
            BuildError::InvalidPattern { pattern, source } => {
                write!(f, "Invalid pattern /{}/: {}", pattern, source)
            }
            BuildError::NoRules => write!(f, "Grammar has no rules"),
            BuildError::UnknownStart(name) => write!(f, "Start rule '{}' is not defined", name),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors that abort a match attempt.
///
/// Failing to match the input is *not* an error: it shows up as a rejected
/// [`ParseReport`](crate::engine::ParseReport). These are the conditions under
/// which matching cannot continue at all.
#[derive(Debug)]
pub enum MatchError {
    /// A one-or-more repetition did not apply even once
    MissingRepetition { filename: String, line: usize },
    /// Match nodes nested deeper than the configured limit
    DepthExceeded {
        filename: String,
        line: usize,
        limit: usize,
    },
    /// A field reference could not be resolved against its owner rule
    UnresolvedField { rule: String, field: String },
    /// The engine's own invariants were violated
    Internal { line: usize, message: String },
    /// Writing to the trace sink failed
    Trace(io::Error),
}

impl MatchError {
    pub(crate) fn internal(line: usize, message: impl Into<String>) -> Self {
        MatchError::Internal {
            line,
            message: message.into(),
        }
    }

    /// True for errors caused by a malformed grammar or an engine bug rather
    /// than by the input text.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MatchError::UnresolvedField { .. } | MatchError::Internal { .. }
        )
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::MissingRepetition { filename, line } => {
                write!(f, "{}:{}: match did not apply", filename, line)
            }
            MatchError::DepthExceeded {
                filename,
                line,
                limit,
            } => write!(
                f,
                "{}:{}: match nesting exceeds the limit of {}",
                filename, line, limit
            ),
            MatchError::UnresolvedField { rule, field } => {
                write!(f, "internal error: rule '{}' has no field '{}'", rule, field)
            }
            MatchError::Internal { line, message } => {
                write!(f, "internal error at line {}: {}", line, message)
            }
            MatchError::Trace(err) => write!(f, "Failed to write trace output: {}", err),
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Trace(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MatchError {
    fn from(err: io::Error) -> Self {
        MatchError::Trace(err)
    }
}

/// Errors raised while loading [`ParseOptions`](crate::config::ParseOptions)
#[derive(Debug)]
pub enum ConfigError {
    /// The options source could not be read or deserialized
    Load(::config::ConfigError),
    /// A trace category name is not recognised
    UnknownTraceCategory(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(err) => write!(f, "Failed to load options: {}", err),
            ConfigError::UnknownTraceCategory(name) => {
                write!(f, "Unknown trace category: '{}'", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(err) => Some(err),
            ConfigError::UnknownTraceCategory(_) => None,
        }
    }
}

impl From<::config::ConfigError> for ConfigError {
    fn from(err: ::config::ConfigError) -> Self {
        ConfigError::Load(err)
    }
}

//! Trace output for the matching engine
//!
//! Tracing is off unless the caller hands [`parse`](crate::engine::parse) a
//! sink. Each category produces one line per event:
//!
//! - `ADVANCE`: `A <count> ...before|=|after...` window around the cursor
//! - `MATCH`: `M <offset> <literal> <start>..<end>` for every literal test
//! - `TOKEN`: `T literal:<text>:` for every consumed token
//! - `RULE`: `R <name>:` on rule entry

use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::io::{self, Write};
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Set of enabled trace categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct TraceFlags(u8);

impl TraceFlags {
    pub const NONE: TraceFlags = TraceFlags(0);
    pub const ADVANCE: TraceFlags = TraceFlags(1);
    pub const MATCH: TraceFlags = TraceFlags(1 << 1);
    pub const TOKEN: TraceFlags = TraceFlags(1 << 2);
    pub const RULE: TraceFlags = TraceFlags(1 << 3);
    pub const ALL: TraceFlags = TraceFlags(0b1111);

    const NAMES: [(&'static str, TraceFlags); 4] = [
        ("advance", TraceFlags::ADVANCE),
        ("match", TraceFlags::MATCH),
        ("token", TraceFlags::TOKEN),
        ("rule", TraceFlags::RULE),
    ];

    pub const fn contains(self, other: TraceFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Look up a single category by name (`advance`, `match`, `token`, `rule`,
    /// plus `all` and `none`).
    pub fn category(name: &str) -> Result<TraceFlags, ConfigError> {
        match name {
            "all" => Ok(TraceFlags::ALL),
            "none" => Ok(TraceFlags::NONE),
            _ => Self::NAMES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, flag)| *flag)
                .ok_or_else(|| ConfigError::UnknownTraceCategory(name.to_string())),
        }
    }
}

impl BitOr for TraceFlags {
    type Output = TraceFlags;

    fn bitor(self, rhs: TraceFlags) -> TraceFlags {
        TraceFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for TraceFlags {
    fn bitor_assign(&mut self, rhs: TraceFlags) {
        self.0 |= rhs.0;
    }
}

/// Parses a comma separated list such as `advance,rule`
impl FromStr for TraceFlags {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .try_fold(TraceFlags::NONE, |acc, part| {
                Ok(acc | TraceFlags::category(part)?)
            })
    }
}

impl TryFrom<Vec<String>> for TraceFlags {
    type Error = ConfigError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        names.iter().try_fold(TraceFlags::NONE, |acc, name| {
            Ok(acc | TraceFlags::category(name.trim())?)
        })
    }
}

impl fmt::Display for TraceFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        write!(f, "{}", names.join(","))
    }
}

/// Trace configuration bound to a caller-owned sink for one match attempt
pub struct Tracer<'s> {
    flags: TraceFlags,
    sink: Option<&'s mut dyn Write>,
}

impl<'s> Tracer<'s> {
    /// Without a sink every category is disabled, whatever `flags` says.
    pub fn new(flags: TraceFlags, sink: Option<&'s mut dyn Write>) -> Self {
        let flags = if sink.is_some() {
            flags
        } else {
            TraceFlags::NONE
        };
        Self { flags, sink }
    }

    pub fn disabled() -> Self {
        Self {
            flags: TraceFlags::NONE,
            sink: None,
        }
    }

    pub fn flags(&self) -> TraceFlags {
        self.flags
    }

    pub fn enabled(&self, category: TraceFlags) -> bool {
        !category.is_empty() && self.flags.contains(category)
    }

    /// Write one line for `category` if it is enabled
    pub fn emit(&mut self, category: TraceFlags, args: fmt::Arguments<'_>) -> io::Result<()> {
        if !self.enabled(category) {
            return Ok(());
        }
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.write_fmt(args)?;
            sink.write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Render text for a trace line with control characters escaped.
///
/// Returns the rendered string and its width in characters.
pub fn escape_chars<I>(chars: I) -> (String, usize)
where
    I: IntoIterator<Item = char>,
{
    let mut rendered = String::new();
    for c in chars {
        match c {
            '\n' => rendered.push_str("\\n"),
            '\t' => rendered.push_str("\\t"),
            '\r' => rendered.push_str("\\r"),
            _ => rendered.push(c),
        }
    }
    let width = rendered.chars().count();
    (rendered, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_from_str() {
        let flags: TraceFlags = "advance, rule".parse().unwrap();
        assert!(flags.contains(TraceFlags::ADVANCE));
        assert!(flags.contains(TraceFlags::RULE));
        assert!(!flags.contains(TraceFlags::MATCH));
        assert_eq!(flags.to_string(), "advance,rule");

        assert_eq!("all".parse::<TraceFlags>().unwrap(), TraceFlags::ALL);
        assert_eq!("".parse::<TraceFlags>().unwrap(), TraceFlags::NONE);
        assert!("verbose".parse::<TraceFlags>().is_err());
    }

    #[test]
    fn test_tracer_without_sink_is_disabled() {
        let tracer = Tracer::new(TraceFlags::ALL, None);
        assert!(!tracer.enabled(TraceFlags::RULE));
        assert_eq!(tracer.flags(), TraceFlags::NONE);
    }

    #[test]
    fn test_tracer_writes_enabled_categories_only() {
        let mut out = Vec::new();
        {
            let mut tracer = Tracer::new(TraceFlags::RULE, Some(&mut out));
            tracer
                .emit(TraceFlags::RULE, format_args!("R {}:", "file"))
                .unwrap();
            tracer
                .emit(TraceFlags::TOKEN, format_args!("T literal:x:"))
                .unwrap();
        }
        assert_eq!(String::from_utf8(out).unwrap(), "R file:\n");
    }

    #[test]
    fn test_escape_chars() {
        let (text, width) = escape_chars("a\tb\n".chars());
        assert_eq!(text, "a\\tb\\n");
        assert_eq!(width, 6);
    }
}

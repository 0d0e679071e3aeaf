//! Options for a single match attempt
//!
//! Options are plain `Deserialize` structs with defaults, so callers can
//! build them in code or load them through `config` from a JSON, YAML or
//! TOML file:
//!
//! ```yaml
//! trace: [rule, token]
//! max_depth: 256
//! alternatives: strict
//! ```

use crate::error::ConfigError;
use crate::trace::TraceFlags;
use ::config::{Config, File, FileFormat, Source};
use serde::Deserialize;
use std::path::Path;

/// Default limit on nested match nodes.
///
/// Each level takes several stack frames; 256 levels fit in the 2 MiB stack
/// of a spawned thread. A recursive rule reference nests at least two levels.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// How an alternative reports its outcome once a branch has been chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlternativePolicy {
    /// A chosen branch always counts as applied, even when it failed
    /// further in.
    #[default]
    Compatible,
    /// The alternative reports the chosen branch's real outcome.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseOptions {
    pub trace: TraceFlags,
    pub max_depth: usize,
    pub alternatives: AlternativePolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trace: TraceFlags::NONE,
            max_depth: DEFAULT_MAX_DEPTH,
            alternatives: AlternativePolicy::Compatible,
        }
    }
}

impl ParseOptions {
    pub fn with_trace(mut self, trace: TraceFlags) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_alternatives(mut self, policy: AlternativePolicy) -> Self {
        self.alternatives = policy;
        self
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Self::load(File::from_str(source, FileFormat::Json))
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Self::load(File::from_str(source, FileFormat::Yaml))
    }

    /// Load options from a file. The format follows the extension (`.json`,
    /// `.yaml`, `.toml` and the other formats `config` knows).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load(File::from(path.as_ref()).required(true))
    }

    fn load<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Ok(Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?)
    }
}

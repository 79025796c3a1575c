use std::path::PathBuf;

use thiserror::Error;

use crate::ids::{ItemClass, ItemId};

/// Problems found while building tables or the registry.
///
/// Every variant is fatal: a registry that fails to build never becomes
/// usable, so callers should abort startup rather than run with bad data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("weights slice is empty")]
    Empty,

    #[error("weights contain a negative value at index {index}: {value}")]
    Negative { index: usize, value: f64 },

    #[error("weights contain a non-finite value at index {index}: {value}")]
    NonFinite { index: usize, value: f64 },

    #[error("sum of weights is zero or not finite")]
    ZeroSum,

    #[error("category group has no member tables")]
    EmptyGroup,

    #[error("tier range {min}..={max} is empty or too wide")]
    InvalidTierRange { min: u32, max: u32 },

    #[error("tier {tier} has no source assigned")]
    TierGap { tier: u32 },

    #[error("tier {tier} is assigned more than one source")]
    TierConflict { tier: u32 },

    #[error("tier {tier} lies outside the configured range {min}..={max}")]
    TierOutOfBounds { tier: u32, min: u32, max: u32 },

    #[error("unknown table `{0}`")]
    UnknownTable(String),

    #[error("unknown group `{0}`")]
    UnknownGroup(String),

    #[error("item {id} is classified as both {first} and {second}")]
    ConflictingClass {
        id: ItemId,
        first: ItemClass,
        second: ItemClass,
    },

    #[error("{0} is configured more than once")]
    DuplicateAxis(String),

    #[error("{axis}: {source}")]
    InAxis {
        axis: String,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("invalid treasure config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Attach the name of the table, group or axis being built.
    pub(crate) fn in_axis(self, axis: impl Into<String>) -> Self {
        ConfigError::InAxis {
            axis: axis.into(),
            source: Box::new(self),
        }
    }
}

/// Recoverable per-call failures of a roll.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RollError {
    #[error("tier {tier} is outside the supported range {min}..={max}")]
    TierOutOfRange { tier: u32, min: u32, max: u32 },

    #[error("no tables configured for {axis}")]
    Unconfigured { axis: String },
}

/// An identifier that no indexed group ever produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("item {0} is not classified")]
    NotFound(ItemId),
}

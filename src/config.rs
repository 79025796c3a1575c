//! Declarative treasure configuration.
//!
//! Every axis is described by four things only: its candidates, their
//! weights, the tiers it supports and which source each tier draws from.
//! Tables and groups are named so several groups and tiers can share them.
//!
//! ```toml
//! duplicates = "first_wins"
//!
//! [tables.heavy_axe]
//! entries = [{ id = 1001, weight = 1.0 }, { id = 1002, weight = 1.0 }]
//!
//! [groups.heavy_low]
//! members = [{ class = "axe", table = "heavy_axe" }]
//!
//! [[weapons]]
//! class = "heavy"
//! bands = [{ from = 1, to = 8, source = "heavy_low" }]
//! ```

use std::ops::RangeInclusive;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    classify::DuplicatePolicy,
    error::ConfigError,
    ids::{ItemClass, ItemId, MaterialSlot, WeaponClass},
};

pub const DEFAULT_MIN_TIER: u32 = 1;
pub const DEFAULT_MAX_TIER: u32 = 8;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreasureConfig {
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
    /// Named chance tables, in declaration order.
    #[serde(default)]
    pub tables: IndexMap<String, TableConfig>,
    /// Named category groups; declaration order is indexing order.
    #[serde(default)]
    pub groups: IndexMap<String, GroupConfig>,
    #[serde(default)]
    pub weapons: Vec<WeaponAxisConfig>,
    #[serde(default)]
    pub materials: Vec<MaterialConfig>,
    #[serde(default)]
    pub spell_rarity: Option<TieredConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub entries: Vec<EntryConfig>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryConfig {
    pub id: ItemId,
    pub weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    /// Whether the group's items are fed to the reverse classifier.
    #[serde(default = "indexed_by_default")]
    pub indexed: bool,
    pub members: Vec<MemberConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberConfig {
    pub class: ItemClass,
    pub table: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TieredConfig {
    #[serde(default = "default_min_tier")]
    pub min_tier: u32,
    #[serde(default = "default_max_tier")]
    pub max_tier: u32,
    pub bands: Vec<BandConfig>,
}

/// Tiers `from..=to` draw from the named source.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BandConfig {
    pub from: u32,
    pub to: u32,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeaponAxisConfig {
    pub class: WeaponClass,
    #[serde(default = "default_min_tier")]
    pub min_tier: u32,
    #[serde(default = "default_max_tier")]
    pub max_tier: u32,
    pub bands: Vec<BandConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialConfig {
    pub slot: MaterialSlot,
    pub table: String,
}

fn indexed_by_default() -> bool {
    true
}

fn default_min_tier() -> u32 {
    DEFAULT_MIN_TIER
}

fn default_max_tier() -> u32 {
    DEFAULT_MAX_TIER
}

impl TreasureConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

impl TieredConfig {
    pub fn range(&self) -> RangeInclusive<u32> {
        self.min_tier..=self.max_tier
    }
}

impl WeaponAxisConfig {
    pub fn range(&self) -> RangeInclusive<u32> {
        self.min_tier..=self.max_tier
    }
}

impl BandConfig {
    pub fn tiers(&self) -> RangeInclusive<u32> {
        self.from..=self.to
    }
}

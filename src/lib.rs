//! # treasure_tables
//!
//! Tiered, weighted treasure tables with a reverse classifier.
//!
//! Given a power tier and a category, the crate draws one item identifier
//! from a weighted population. It can also map any identifier it produced back
//! to the structural class downstream stat logic needs ("a dagger with
//! multi-strike").
//!
//! The building blocks, leaf first:
//!
//! 1. [`ChanceTable`]: ordered `(item, weight)` pairs with one weighted draw
//!    (inverse-CDF over cached prefix sums).
//! 2. [`CategoryGroup`]: tagged tables for the sub-kinds of one category.
//!    Draws a member uniformly, then an item by weight inside it.
//! 3. [`TieredSelector`]: tier to table/group mapping, sources shared across
//!    adjacent tiers.
//! 4. [`ReverseClassifier`]: `identifier -> class` index built once from every
//!    indexed group.
//! 5. [`TreasureRegistry`]: every axis (weapon weight classes, material slots,
//!    spell rarity) assembled from a [`TreasureConfig`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use treasure_tables::{TreasureRegistry, WeaponClass, MaterialSlot};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = TreasureRegistry::builtin()?;
//! let mut rng = rand::rng();
//!
//! let (id, class) = registry.roll_weapon(WeaponClass::Finesse, 6, &mut rng)?;
//! assert_eq!(registry.classify(id)?, class);
//!
//! let material = registry.roll_material(MaterialSlot::Jewelry, &mut rng)?;
//! # Ok(()) }
//! ```
//!
//! ## Ad-hoc tables
//!
//! ```rust,ignore
//! use treasure_tables::ChanceTable;
//!
//! let table = ChanceTable::from_pairs([
//!     ("common", 60.0),
//!     ("uncommon", 30.0),
//!     ("rare", 9.0),
//!     ("legendary", 1.0),
//! ]).unwrap();
//!
//! let mut rng = rand::rng();
//! let tier = table.sample(&mut rng); // &&str
//! ```
//!
//! ## Concurrency
//! Everything is immutable once built and `Send + Sync`. Rolls take `&self`
//! and a caller-owned `&mut impl Rng`; give each worker its own generator
//! (`rand::rng()` or [`rng::worker_rng`]) and share the registry freely.
//!
//! ## Gotchas
//! * Weights must be **non-negative**, finite and not all zero.
//! * Configuration is closed after build. To rebalance, build a new registry.

mod classify;
mod config;
mod cumulative;
mod error;
mod group;
mod ids;
mod registry;
pub mod rng;
mod sampler;
mod table;
mod tiered;

#[cfg(test)]
mod test_support;

use rand::Rng;

/// A minimal interface for “index samplers”.
/// Implemented by `CumulativeSampler` (weighted) and `UniformSampler` (equal odds).
#[allow(clippy::len_without_is_empty)]
pub trait IndexSampler {
    fn len(&self) -> usize;
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize;
}

/// Anything that yields exactly one drop per roll.
///
/// [`TieredSelector`] is generic over this, so a tier can be backed by a
/// plain [`ChanceTable`] or by a tagged [`CategoryGroup`].
pub trait Pool {
    type Drop;
    fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Drop;
}

pub use classify::{Conflict, DuplicatePolicy, ReverseClassifier};
pub use config::{
    BandConfig, DEFAULT_MAX_TIER, DEFAULT_MIN_TIER, EntryConfig, GroupConfig, MaterialConfig,
    MemberConfig, TableConfig, TieredConfig, TreasureConfig, WeaponAxisConfig,
};
pub use cumulative::CumulativeSampler;
pub use error::{ConfigError, LookupError, RollError};
pub use group::CategoryGroup;
pub use ids::{ItemClass, ItemId, MaterialSlot, WeaponClass};
pub use registry::{TreasureRegistry, WeaponGroup};
pub use sampler::UniformSampler;
pub use table::ChanceTable;
pub use tiered::{MAX_TIER_SPAN, TieredSelector};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shared_types_are_thread_safe() {
        assert_send_sync::<TreasureRegistry>();
        assert_send_sync::<TieredSelector<WeaponGroup>>();
        assert_send_sync::<ReverseClassifier<ItemId, ItemClass>>();
    }
}
